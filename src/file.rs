use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::string::FromUtf8Error;
use thiserror::Error;

const UTF8_BOM: &str = "\u{feff}";

#[derive(Error, Debug)]
pub enum FileReadError {
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{name} is not valid UTF-8 text: {source}")]
    Decode {
        name: String,
        #[source]
        source: FromUtf8Error,
    },

    #[error("{name} has no readable content")]
    Missing { name: String },
}

/// A loaded file: display name plus its decoded text.
/// The content is not checked for well-formed XML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInput {
    pub name: String,
    pub content: String,
}

impl FileInput {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Size in kilobytes, as shown on the drop zone
    pub fn size_kb(&self) -> f64 {
        self.content.len() as f64 / 1024.0
    }

    pub fn line_count(&self) -> usize {
        self.content.split('\n').count()
    }
}

/// Decode raw bytes as UTF-8 text, dropping a leading byte-order mark.
pub fn decode(name: impl Into<String>, bytes: Vec<u8>) -> Result<FileInput, FileReadError> {
    let name = name.into();
    let content = match String::from_utf8(bytes) {
        Ok(content) => content,
        Err(source) => return Err(FileReadError::Decode { name, source }),
    };
    let content = match content.strip_prefix(UTF8_BOM) {
        Some(stripped) => stripped.to_string(),
        None => content,
    };
    Ok(FileInput { name, content })
}

/// Read and decode a file from disk
pub fn read_file(path: &Path) -> Result<FileInput, FileReadError> {
    let bytes = fs::read(path).map_err(|source| FileReadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    decode(display_name(path), bytes)
}

/// File name without its directory, falling back to the full path
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
