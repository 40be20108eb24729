//! Application configuration module
//!
//! Settings are stored with `confy`, which picks the OS-specific config
//! directory and handles serialization.

use crate::constant::{APP_NAME, DEFAULT_FONT_SIZE, MAX_RECENT_FILES};
use crate::locale::Locale;
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Confy(#[from] confy::ConfyError),
}

pub struct Config {
    pub settings: Settings,
    writer: Sender<Settings>,
}

impl Config {
    /// Load configuration from disk, creating default if it doesn't exist
    pub fn load() -> Result<Self, ConfigError> {
        let settings: Settings = confy::load(APP_NAME, None)?;
        info!("Load config from {:?}", Self::config_path()?);
        Ok(Self::with_settings(settings))
    }

    fn with_settings(settings: Settings) -> Self {
        let (writer, _) = spawn_settings_writer(None);
        Self { settings, writer }
    }

    /// Save in the background since confy does synchronous IO
    pub fn save_in_background(&self) {
        if let Err(e) = self.writer.send(self.settings.clone()) {
            tracing::error!("Failed to queue settings save: {}", e);
        }
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(confy::get_configuration_file_path(APP_NAME, None)?)
    }

    /// Directory the file dialog opens in: the last used one, else the user's documents
    pub fn dialog_dir(&self) -> Option<PathBuf> {
        self.settings.last_directory.clone().or_else(|| {
            UserDirs::new().and_then(|dirs| dirs.document_dir().map(Path::to_path_buf))
        })
    }

    /// Remember a file the user opened and persist the change
    pub fn add_recent_file(&mut self, path: PathBuf) {
        self.settings.remember(path);
        self.save_in_background();
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!("Falling back to default settings: {}", e);
            Self::with_settings(Settings::default())
        })
    }
}

/// Writes settings snapshots to disk one at a time, in the order they were sent
pub struct SettingsWriter {
    receiver: Receiver<Settings>,
    /// Explicit config file, else confy's default location for the app
    path: Option<PathBuf>,
}

impl SettingsWriter {
    pub fn new(receiver: Receiver<Settings>, path: Option<PathBuf>) -> Self {
        Self { receiver, path }
    }

    pub fn run(&self) {
        while let Ok(mut settings) = self.receiver.recv() {
            // Skip to the newest queued snapshot
            while let Ok(newer) = self.receiver.try_recv() {
                settings = newer;
            }
            if let Err(e) = self.store(&settings) {
                tracing::error!("Failed to save settings: {}", e);
            }
        }
    }

    fn store(&self, settings: &Settings) -> Result<(), ConfigError> {
        match &self.path {
            Some(path) => confy::store_path(path, settings)?,
            None => confy::store(APP_NAME, None, settings)?,
        }
        Ok(())
    }
}

pub fn spawn_settings_writer(path: Option<PathBuf>) -> (Sender<Settings>, JoinHandle<()>) {
    let (sender, receiver) = std::sync::mpsc::channel();
    let handle = thread::spawn(move || {
        SettingsWriter::new(receiver, path).run();
    });
    (sender, handle)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Language of the interface
    #[serde(default)]
    pub locale: Locale,

    /// Font size of the diff panes
    #[serde(default = "default_font_size")]
    pub font_size: f32,

    /// Highlight the differing characters inside changed lines
    #[serde(default = "default_true")]
    pub char_highlight: bool,

    /// Recently opened file paths, most recent first
    #[serde(default)]
    pub recent_files: Vec<PathBuf>,

    /// Directory of the last opened file
    #[serde(default)]
    pub last_directory: Option<PathBuf>,
}

fn default_font_size() -> f32 {
    DEFAULT_FONT_SIZE
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            font_size: DEFAULT_FONT_SIZE,
            char_highlight: true,
            recent_files: Vec::new(),
            last_directory: None,
        }
    }
}

impl Settings {
    /// Move the path to the front of the recent list and remember its directory
    pub fn remember(&mut self, path: PathBuf) {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.last_directory = Some(parent.to_path_buf());
        }
        self.recent_files.retain(|p| p != &path);
        self.recent_files.insert(0, path);
        self.recent_files.truncate(MAX_RECENT_FILES);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remember_moves_path_to_front() {
        let mut settings = Settings::default();
        settings.remember(PathBuf::from("/data/a.xml"));
        settings.remember(PathBuf::from("/data/b.xml"));
        settings.remember(PathBuf::from("/data/a.xml"));

        assert_eq!(
            settings.recent_files,
            vec![PathBuf::from("/data/a.xml"), PathBuf::from("/data/b.xml")]
        );
        assert_eq!(settings.last_directory, Some(PathBuf::from("/data")));
    }

    #[test]
    fn test_recent_files_are_capped() {
        let mut settings = Settings::default();
        for i in 0..MAX_RECENT_FILES + 5 {
            settings.remember(PathBuf::from(format!("/data/{}.xml", i)));
        }
        assert_eq!(settings.recent_files.len(), MAX_RECENT_FILES);
        assert_eq!(
            settings.recent_files[0],
            PathBuf::from(format!("/data/{}.xml", MAX_RECENT_FILES + 4))
        );
    }

    #[test]
    fn test_settings_writer_keeps_latest_snapshot() {
        let test_dir =
            std::env::temp_dir().join(format!("test_config_{}", uuid::Uuid::new_v4()));
        let path = test_dir.join("settings.toml");
        let (sender, handle) = spawn_settings_writer(Some(path.clone()));

        let mut settings = Settings::default();
        settings.remember(PathBuf::from("/data/a.xml"));
        sender.send(settings.clone()).unwrap();
        settings.remember(PathBuf::from("/data/b.xml"));
        sender.send(settings).unwrap();
        drop(sender);
        handle.join().unwrap();

        let stored: Settings = confy::load_path(&path).unwrap();
        assert_eq!(
            stored.recent_files,
            vec![PathBuf::from("/data/b.xml"), PathBuf::from("/data/a.xml")]
        );

        std::fs::remove_dir_all(&test_dir).ok();
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"locale":"vietnamese"}"#).unwrap();
        assert_eq!(settings.locale, Locale::Vietnamese);
        assert_eq!(settings.font_size, DEFAULT_FONT_SIZE);
        assert!(settings.char_highlight);
        assert!(settings.recent_files.is_empty());
    }
}
