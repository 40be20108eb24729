//! Clipboard exports of a finished comparison

use crate::differ::{Comparison, DiffSummary, RowChange};
use serde::Serialize;
use std::fmt::Write;

/// Plain-text listing of every row that differs.
///
/// ```text
/// --- a.xml
/// +++ b.xml
/// +1 -0 ~1
/// @@ line 2 @@
/// -<old/>
/// +<new/>
/// ```
pub fn render_text(comparison: &Comparison, name_a: &str, name_b: &str) -> String {
    let mut out = String::new();
    let DiffSummary {
        added,
        removed,
        changed,
    } = comparison.summary;

    let _ = writeln!(out, "--- {}", name_a);
    let _ = writeln!(out, "+++ {}", name_b);
    let _ = writeln!(out, "+{} -{} ~{}", added, removed, changed);

    for (left, right, change) in comparison.rows() {
        if change == RowChange::Unchanged {
            continue;
        }
        let _ = writeln!(out, "@@ line {} @@", left.position);
        if change != RowChange::Added {
            let _ = writeln!(out, "-{}", left.text);
        }
        if change != RowChange::Removed {
            let _ = writeln!(out, "+{}", right.text);
        }
    }

    out
}

#[derive(Serialize)]
struct JsonReport<'a> {
    file_a: &'a str,
    file_b: &'a str,
    #[serde(flatten)]
    comparison: &'a Comparison,
}

/// The full comparison, both sequences included, as pretty JSON
pub fn render_json(
    comparison: &Comparison,
    name_a: &str,
    name_b: &str,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonReport {
        file_a: name_a,
        file_b: name_b,
        comparison,
    })
}
