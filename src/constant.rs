// Window size constants
pub const DEFAULT_WINDOW_WIDTH: f32 = 1200.0;
pub const DEFAULT_WINDOW_HEIGHT: f32 = 760.0;
pub const DEFAULT_WINDOW_TITLE: &str = "XML Diff Studio";

/// Application name and metadata constants
pub const APP_NAME: &str = "xml-diff-studio";

/// Extensions offered by the file dialog
pub const FILE_EXTENSIONS: &[&str] = &["xml", "txt"];

/// App related Magic Numbers
pub const MAX_RECENT_FILES: usize = 10;
pub const DEFAULT_FONT_SIZE: f32 = 12.0;

/// Character highlight limits for changed rows (combined bytes of both sides)
pub const MAX_HIGHLIGHT_LEN: usize = 20_000;
pub const CHAR_DIFF_TIMEOUT: std::time::Duration = std::time::Duration::from_millis(50);
