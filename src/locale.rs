//! User-facing strings
//!
//! Log messages stay in English; everything shown in the window comes from
//! one of the tables below.

use crate::file::FileReadError;
use crate::state::{AppError, ComparisonError, Side};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    English,
    Vietnamese,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::English, Locale::Vietnamese];

    pub fn strings(self) -> &'static Strings {
        match self {
            Locale::English => &ENGLISH,
            Locale::Vietnamese => &VIETNAMESE,
        }
    }

    /// Name of the language in that language
    pub fn native_name(self) -> &'static str {
        match self {
            Locale::English => "English",
            Locale::Vietnamese => "Tiếng Việt",
        }
    }
}

pub struct Strings {
    pub subtitle: &'static str,
    pub original_file: &'static str,
    pub modified_file: &'static str,
    pub drop_hint: &'static str,
    pub change_file: &'static str,
    pub loading: &'static str,
    pub lines: &'static str,
    pub compare: &'static str,
    pub reset: &'static str,
    pub statistics: &'static str,
    pub added: &'static str,
    pub removed: &'static str,
    pub changed: &'static str,
    pub identical: &'static str,
    pub copy_all: &'static str,
    pub copy_report: &'static str,
    pub copy_json: &'static str,
    pub next_difference: &'static str,
    pub previous_difference: &'static str,
    pub open: &'static str,
    pub open_file: &'static str,
    pub recent_files: &'static str,
    pub settings: &'static str,
    pub char_highlight: &'static str,
    pub language: &'static str,
    pub footer: &'static str,
    pub dismiss: &'static str,
    pub read_failed: &'static str,
    pub not_text: &'static str,
    pub missing_file: &'static str,
}

pub static ENGLISH: Strings = Strings {
    subtitle: "Line-by-line XML comparison",
    original_file: "Original file (A)",
    modified_file: "Modified file (B)",
    drop_hint: "Click to choose or drop an XML file here",
    change_file: "Change file",
    loading: "Loading...",
    lines: "lines",
    compare: "COMPARE NOW",
    reset: "New comparison",
    statistics: "Statistics:",
    added: "Added",
    removed: "Removed",
    changed: "Changed",
    identical: "Files are identical",
    copy_all: "Copy all",
    copy_report: "Copy report",
    copy_json: "Copy as JSON",
    next_difference: "Next difference",
    previous_difference: "Previous difference",
    open: "Open",
    open_file: "Open file...",
    recent_files: "Recent files",
    settings: "Settings",
    char_highlight: "Highlight changed characters",
    language: "Language",
    footer: "Line-by-line XML comparison tool",
    dismiss: "Dismiss",
    read_failed: "Could not read the file",
    not_text: "The file is not valid UTF-8 text",
    missing_file: "No file selected",
};

pub static VIETNAMESE: Strings = Strings {
    subtitle: "So sánh file XML chuyên dụng",
    original_file: "File gốc (A)",
    modified_file: "File thay thế (B)",
    drop_hint: "Chọn hoặc kéo thả file XML vào đây",
    change_file: "Thay đổi file",
    loading: "Đang tải...",
    lines: "dòng",
    compare: "SO SÁNH NGAY",
    reset: "Làm mới",
    statistics: "Thống kê:",
    added: "Thêm mới",
    removed: "Đã xóa",
    changed: "Thay đổi",
    identical: "Hai file giống nhau",
    copy_all: "Copy toàn bộ",
    copy_report: "Copy báo cáo",
    copy_json: "Copy dạng JSON",
    next_difference: "Khác biệt tiếp theo",
    previous_difference: "Khác biệt trước",
    open: "Mở",
    open_file: "Mở file...",
    recent_files: "File gần đây",
    settings: "Cài đặt",
    char_highlight: "Tô sáng ký tự thay đổi",
    language: "Ngôn ngữ",
    footer: "Công cụ so sánh XML dòng-theo-dòng",
    dismiss: "Đóng",
    read_failed: "Không thể đọc file",
    not_text: "File không phải văn bản UTF-8 hợp lệ",
    missing_file: "Chưa chọn file",
};

impl Strings {
    pub fn side_title(&self, side: Side) -> &'static str {
        match side {
            Side::A => self.original_file,
            Side::B => self.modified_file,
        }
    }

    /// Localized message for an error shown in the window
    pub fn error_message(&self, error: &AppError) -> String {
        match error {
            AppError::FileRead { side, source } => {
                let reason = match source {
                    FileReadError::Decode { .. } => self.not_text,
                    FileReadError::Io { .. } | FileReadError::Missing { .. } => self.read_failed,
                };
                format!("{} ({}): {}", reason, self.side_title(*side), source)
            }
            AppError::Comparison(ComparisonError::MissingInput(side)) => {
                format!("{}: {}", self.missing_file, self.side_title(*side))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_input_message() {
        let error = AppError::from(ComparisonError::MissingInput(Side::B));
        assert_eq!(
            Locale::Vietnamese.strings().error_message(&error),
            "Chưa chọn file: File thay thế (B)"
        );
        assert_eq!(
            Locale::English.strings().error_message(&error),
            "No file selected: Modified file (B)"
        );
    }

    #[test]
    fn test_decode_error_message() {
        let source = String::from_utf8(vec![0xff]).unwrap_err();
        let error = AppError::FileRead {
            side: Side::A,
            source: FileReadError::Decode {
                name: "a.xml".to_string(),
                source,
            },
        };
        let message = Locale::English.strings().error_message(&error);
        assert!(message.starts_with("The file is not valid UTF-8 text (Original file (A))"));
    }

    #[test]
    fn test_locale_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Locale::Vietnamese).unwrap(), "\"vietnamese\"");
    }
}
