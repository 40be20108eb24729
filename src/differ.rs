//! Positional line differ
//!
//! Lines of the two texts are paired purely by index: line `i` of A is
//! compared with line `i` of B and nothing else. A single inserted line near
//! the top of B therefore marks every following line as changed. Both output
//! sequences always have the same length so the two panes line up row for row.

use crate::constant::{CHAR_DIFF_TIMEOUT, MAX_HIGHLIGHT_LEN};
use serde::Serialize;
use similar::{ChangeTag, TextDiff};
use std::ops::Range;

/// How a line is shown in its pane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    Unchanged,
    Removed,
    Added,
}

/// A trimmed line annotated with its kind and its shared row position
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedLine {
    pub kind: LineKind,
    pub text: String,
    /// 1-based, identical for both panes at the same row
    pub position: usize,
}

impl ClassifiedLine {
    fn new(kind: LineKind, text: &str, position: usize) -> Self {
        Self {
            kind,
            text: text.to_string(),
            position,
        }
    }
}

/// What happened at a single row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RowChange {
    Unchanged,
    /// Only B has a line here
    Added,
    /// Only A has a line here
    Removed,
    /// Both have a line here and they differ
    Changed,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DiffSummary {
    pub added: usize,
    pub removed: usize,
    pub changed: usize,
}

impl DiffSummary {
    pub fn total(&self) -> usize {
        self.added + self.removed + self.changed
    }
}

/// Result of comparing two texts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comparison {
    pub left: Vec<ClassifiedLine>,
    pub right: Vec<ClassifiedLine>,
    pub changes: Vec<RowChange>,
    pub summary: DiffSummary,
}

impl Comparison {
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn is_identical(&self) -> bool {
        self.summary.total() == 0
    }

    /// Rows as `(left, right, change)` triples
    pub fn rows(&self) -> impl Iterator<Item = (&ClassifiedLine, &ClassifiedLine, RowChange)> {
        self.left
            .iter()
            .zip(self.right.iter())
            .zip(self.changes.iter().copied())
            .map(|((l, r), c)| (l, r, c))
    }

    /// Index of the first differing row after `after`, wrapping around to the top.
    /// `None` starts the search at row 0.
    pub fn next_difference(&self, after: Option<usize>) -> Option<usize> {
        let len = self.len();
        if len == 0 {
            return None;
        }
        let start = after.map_or(0, |i| i + 1);
        (0..len)
            .map(|offset| (start + offset) % len)
            .find(|&i| self.changes[i] != RowChange::Unchanged)
    }

    /// Index of the last differing row before `before`, wrapping around to the bottom.
    /// `None` starts the search at the last row.
    pub fn previous_difference(&self, before: Option<usize>) -> Option<usize> {
        let len = self.len();
        if len == 0 {
            return None;
        }
        let start = before.map_or(len - 1, |i| (i + len - 1) % len);
        (0..len)
            .map(|offset| (start + len - offset) % len)
            .find(|&i| self.changes[i] != RowChange::Unchanged)
    }
}

/// Split on `\n` or `\r\n` and trim every line.
///
/// Trimming uses Rust's Unicode `White_Space` property, so U+0085 is trimmed
/// and U+FEFF is not.
///
/// An empty text yields a single empty line, and a trailing newline yields a
/// trailing empty line.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n').map(str::trim).collect()
}

/// Compare two texts line by line, pairing lines by index.
pub fn compare(text_a: &str, text_b: &str) -> Comparison {
    let lines_a = split_lines(text_a);
    let lines_b = split_lines(text_b);
    let row_count = lines_a.len().max(lines_b.len());

    let mut left = Vec::with_capacity(row_count);
    let mut right = Vec::with_capacity(row_count);
    let mut changes = Vec::with_capacity(row_count);
    let mut summary = DiffSummary::default();

    for i in 0..row_count {
        let position = i + 1;
        let change = match (lines_a.get(i).copied(), lines_b.get(i).copied()) {
            (Some(a), Some(b)) if a == b => {
                left.push(ClassifiedLine::new(LineKind::Unchanged, a, position));
                right.push(ClassifiedLine::new(LineKind::Unchanged, b, position));
                RowChange::Unchanged
            }
            (Some(a), None) => {
                left.push(ClassifiedLine::new(LineKind::Removed, a, position));
                right.push(ClassifiedLine::new(LineKind::Added, "", position));
                summary.removed += 1;
                RowChange::Removed
            }
            (None, Some(b)) => {
                left.push(ClassifiedLine::new(LineKind::Removed, "", position));
                right.push(ClassifiedLine::new(LineKind::Added, b, position));
                summary.added += 1;
                RowChange::Added
            }
            (Some(a), Some(b)) => {
                left.push(ClassifiedLine::new(LineKind::Removed, a, position));
                right.push(ClassifiedLine::new(LineKind::Added, b, position));
                summary.changed += 1;
                RowChange::Changed
            }
            // i < row_count, so at least one side has a line
            (None, None) => break,
        };
        changes.push(change);
    }

    Comparison {
        left,
        right,
        changes,
        summary,
    }
}

/// Byte ranges of a changed row that differ, per side.
///
/// Character-level diff (better for CJK); used only to highlight text inside a
/// changed row, never to classify it. Rows longer than [`MAX_HIGHLIGHT_LEN`]
/// get no spans, and a diff that runs past [`CHAR_DIFF_TIMEOUT`] settles for a
/// coarser result.
pub fn char_changes(left: &str, right: &str) -> (Vec<Range<usize>>, Vec<Range<usize>>) {
    if left.len() + right.len() > MAX_HIGHLIGHT_LEN {
        return (Vec::new(), Vec::new());
    }
    let diff = TextDiff::configure()
        .timeout(CHAR_DIFF_TIMEOUT)
        .diff_chars(left, right);
    let mut removed = Vec::new();
    let mut added = Vec::new();
    let mut left_pos = 0usize;
    let mut right_pos = 0usize;

    for change in diff.iter_all_changes() {
        let len = change.value().len();
        match change.tag() {
            ChangeTag::Equal => {
                left_pos += len;
                right_pos += len;
            }
            ChangeTag::Delete => {
                push_merged(&mut removed, left_pos..left_pos + len);
                left_pos += len;
            }
            ChangeTag::Insert => {
                push_merged(&mut added, right_pos..right_pos + len);
                right_pos += len;
            }
        }
    }

    (removed, added)
}

fn push_merged(ranges: &mut Vec<Range<usize>>, range: Range<usize>) {
    if let Some(last) = ranges.last_mut()
        && last.end == range.start
    {
        last.end = range.end;
        return;
    }
    ranges.push(range);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(lines: &[ClassifiedLine]) -> Vec<&str> {
        lines.iter().map(|l| l.text.as_str()).collect()
    }

    fn kinds(lines: &[ClassifiedLine]) -> Vec<LineKind> {
        lines.iter().map(|l| l.kind).collect()
    }

    #[test]
    fn sequences_have_length_of_longer_text() {
        let cases = [
            ("a\nb\nc", "a"),
            ("a", "a\nb\nc\nd"),
            ("", "x\ny"),
            ("one\r\ntwo\r\n", "one\ntwo\n"),
        ];
        for (a, b) in cases {
            let result = compare(a, b);
            let expected = split_lines(a).len().max(split_lines(b).len());
            assert_eq!(result.left.len(), expected);
            assert_eq!(result.right.len(), expected);
            assert_eq!(result.changes.len(), expected);
        }
    }

    #[test]
    fn summary_partitions_differing_rows() {
        let result = compare("a\nb\nc\nd", "a\nx\nc");
        assert_eq!(
            result.summary,
            DiffSummary {
                added: 0,
                removed: 1,
                changed: 1,
            }
        );
        let unchanged = result
            .rows()
            .filter(|(l, r, _)| l.kind == LineKind::Unchanged && r.kind == LineKind::Unchanged)
            .count();
        assert_eq!(unchanged + result.summary.total(), result.len());
    }

    #[test]
    fn identical_texts_are_all_unchanged() {
        let text = "<root>\n  <child id=\"1\"/>\n</root>\n";
        let result = compare(text, text);
        assert!(result.is_identical());
        assert_eq!(result.summary, DiffSummary::default());
        assert!(result.changes.iter().all(|c| *c == RowChange::Unchanged));
        assert!(kinds(&result.left).iter().all(|k| *k == LineKind::Unchanged));
        assert!(kinds(&result.right).iter().all(|k| *k == LineKind::Unchanged));
    }

    #[test]
    fn appended_line_counts_as_added() {
        let result = compare("a\nb", "a\nb\nc");
        assert_eq!(result.len(), 3);
        assert_eq!(result.left[2].kind, LineKind::Removed);
        assert_eq!(result.left[2].text, "");
        assert_eq!(result.right[2].kind, LineKind::Added);
        assert_eq!(result.right[2].text, "c");
        assert_eq!(result.changes[2], RowChange::Added);
        assert_eq!(
            result.summary,
            DiffSummary {
                added: 1,
                removed: 0,
                changed: 0,
            }
        );
    }

    #[test]
    fn dropped_line_counts_as_removed() {
        let result = compare("a\nb\nc", "a\nb");
        assert_eq!(result.left[2].kind, LineKind::Removed);
        assert_eq!(result.left[2].text, "c");
        assert_eq!(result.right[2].kind, LineKind::Added);
        assert_eq!(result.right[2].text, "");
        assert_eq!(
            result.summary,
            DiffSummary {
                added: 0,
                removed: 1,
                changed: 0,
            }
        );
    }

    #[test]
    fn only_line_boundary_whitespace_is_ignored() {
        assert!(compare("  x  ", "x").is_identical());
        assert!(compare("\t<a/>", "<a/>   ").is_identical());

        let result = compare("x y", "x  y");
        assert_eq!(result.summary.changed, 1);
        assert_eq!(result.changes[0], RowChange::Changed);
    }

    #[test]
    fn crlf_and_lf_compare_equal() {
        let result = compare("<a>\r\n<b/>\r\n</a>", "<a>\n<b/>\n</a>");
        assert!(result.is_identical());
        assert_eq!(texts(&result.left), vec!["<a>", "<b/>", "</a>"]);
    }

    #[test]
    fn insertion_at_top_cascades_as_changes() {
        let result = compare("a\nb\nc", "new\na\nb\nc");
        assert_eq!(
            result.changes,
            vec![
                RowChange::Changed,
                RowChange::Changed,
                RowChange::Changed,
                RowChange::Added,
            ]
        );
        assert_eq!(result.summary.changed, 3);
        assert_eq!(result.summary.added, 1);
    }

    #[test]
    fn positions_are_shared_and_one_based() {
        let result = compare("a\nb", "a\nc\nd");
        let left: Vec<usize> = result.left.iter().map(|l| l.position).collect();
        let right: Vec<usize> = result.right.iter().map(|l| l.position).collect();
        assert_eq!(left, vec![1, 2, 3]);
        assert_eq!(left, right);
    }

    #[test]
    fn repeated_comparisons_are_identical() {
        let a = String::from("<x>\n  1\n</x>");
        let b = String::from("<x>\n  2\n</x>\n");
        let first = compare(&a, &b);
        let second = compare(&a, &b);
        assert_eq!(first, second);
        assert_eq!(a, "<x>\n  1\n</x>");
        assert_eq!(b, "<x>\n  2\n</x>\n");
    }

    #[test]
    fn empty_texts_yield_one_unchanged_empty_row() {
        let result = compare("", "");
        assert_eq!(result.len(), 1);
        assert_eq!(result.left[0].kind, LineKind::Unchanged);
        assert_eq!(result.left[0].text, "");
        assert_eq!(result.right[0].text, "");
        assert_eq!(result.summary, DiffSummary::default());
    }

    #[test]
    fn empty_against_non_empty() {
        let result = compare("", "a\nb");
        // The single empty line of A is paired with "a"
        assert_eq!(result.changes, vec![RowChange::Changed, RowChange::Added]);
        assert_eq!(result.summary.changed, 1);
        assert_eq!(result.summary.added, 1);
    }

    #[test]
    fn trailing_newline_adds_an_empty_line() {
        assert_eq!(split_lines("a\nb\n"), vec!["a", "b", ""]);
        let result = compare("a\nb\n", "a\nb");
        assert_eq!(result.changes[2], RowChange::Removed);
        assert_eq!(result.summary.removed, 1);
    }

    #[test]
    fn difference_navigation_wraps() {
        let result = compare("a\nb\nc\nd\ne", "a\nB\nc\nD\ne");
        assert_eq!(result.next_difference(None), Some(1));
        assert_eq!(result.next_difference(Some(1)), Some(3));
        assert_eq!(result.next_difference(Some(3)), Some(1));
        assert_eq!(result.previous_difference(None), Some(3));
        assert_eq!(result.previous_difference(Some(3)), Some(1));
        assert_eq!(result.previous_difference(Some(1)), Some(3));
    }

    #[test]
    fn navigation_without_differences() {
        let result = compare("a\nb", "a\nb");
        assert_eq!(result.next_difference(None), None);
        assert_eq!(result.previous_difference(Some(0)), None);
    }

    #[test]
    fn char_changes_mark_differing_spans() {
        let (removed, added) = char_changes("<a id=\"1\"/>", "<a id=\"2\"/>");
        assert_eq!(removed, vec![7..8]);
        assert_eq!(added, vec![7..8]);

        let (removed, added) = char_changes("abc", "abcdef");
        assert!(removed.is_empty());
        assert_eq!(added, vec![3..6]);
    }

    #[test]
    fn char_changes_use_byte_offsets() {
        let (removed, added) = char_changes("tệp cũ", "tệp mới");
        for range in removed {
            assert!("tệp cũ".get(range).is_some());
        }
        for range in added {
            assert!("tệp mới".get(range).is_some());
        }
    }

    #[test]
    fn split_lines_trims_unicode_white_space() {
        assert_eq!(split_lines("\u{85}<a/>\u{3000}\r\n\u{feff}<b/>"), vec!["<a/>", "\u{feff}<b/>"]);
    }

    #[test]
    fn char_changes_skip_long_lines() {
        let left = format!("<root>{}</root>", "<item a=\"1\"/>".repeat(MAX_HIGHLIGHT_LEN / 10));
        let right = left.replace("a=\"1\"", "a=\"2\"");
        let (removed, added) = char_changes(&left, &right);
        assert!(removed.is_empty());
        assert!(added.is_empty());
    }
}
