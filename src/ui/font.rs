/// Font setup for the diff panes
///
/// XML reads best in a proper code font, so the system's preferred monospace
/// font replaces egui's built-in one when it can be found.
use eframe::egui::{FontData, FontDefinitions, FontFamily};
use font_kit::family_name::FamilyName;
use font_kit::handle::Handle;
use font_kit::properties::Properties;
use font_kit::source::SystemSource;

const SYSTEM_MONO_FONT_NAME: &str = "SystemMonospace";

/// Setup fonts for the application
///
/// # Font Priority by OS:
/// - macOS: SF Mono, Menlo, Monaco
/// - Windows: Cascadia Mono, Consolas, Courier New
/// - Linux: JetBrains Mono, DejaVu Sans Mono, Liberation Mono
///
/// Falls back to the generic monospace family, then to egui's defaults.
pub fn setup_fonts() -> FontDefinitions {
    let mut fonts = FontDefinitions::default();
    let source = SystemSource::new();

    for font_name in preferred_font_names() {
        if let Some(data) = load_family(&source, font_name) {
            tracing::info!("Using system font '{}' for code", font_name);
            register_monospace(&mut fonts, data);
            return fonts;
        }
    }

    match load_generic_monospace(&source) {
        Some(data) => {
            tracing::info!("Using generic system monospace font for code");
            register_monospace(&mut fonts, data);
        }
        None => tracing::warn!("Could not find a system monospace font, using defaults"),
    }

    fonts
}

fn preferred_font_names() -> &'static [&'static str] {
    match std::env::consts::OS {
        "macos" => &["SF Mono", "Menlo", "Monaco"],
        "windows" => &["Cascadia Mono", "Consolas", "Courier New"],
        "linux" => &["JetBrains Mono", "DejaVu Sans Mono", "Liberation Mono"],
        _ => &[],
    }
}

fn load_family(source: &SystemSource, font_name: &str) -> Option<Vec<u8>> {
    let family = source.select_family_by_name(font_name).ok()?;
    let handle = family.fonts().first()?.clone();
    read_handle(handle)
}

fn load_generic_monospace(source: &SystemSource) -> Option<Vec<u8>> {
    let handle = source
        .select_best_match(&[FamilyName::Monospace], &Properties::new())
        .ok()?;
    read_handle(handle)
}

fn read_handle(handle: Handle) -> Option<Vec<u8>> {
    match handle {
        Handle::Memory { bytes, .. } => Some(bytes.to_vec()),
        Handle::Path { path, .. } => match std::fs::read(&path) {
            Ok(data) => Some(data),
            Err(e) => {
                tracing::warn!("Could not read font {:?}: {}", path, e);
                None
            }
        },
    }
}

/// Put the font first in the monospace family; egui's bundled fonts stay as fallbacks
fn register_monospace(fonts: &mut FontDefinitions, data: Vec<u8>) {
    fonts.font_data.insert(
        SYSTEM_MONO_FONT_NAME.to_owned(),
        FontData::from_owned(data).into(),
    );
    if let Some(family) = fonts.families.get_mut(&FontFamily::Monospace) {
        family.insert(0, SYSTEM_MONO_FONT_NAME.to_owned());
    }
}
