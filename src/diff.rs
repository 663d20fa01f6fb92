use std::fmt::Write as _;

use crate::line::{RawLine, strip_terminator};

/// Renders the before/after state of a raw-line span: a leading blank
/// line, then untouched lines behind `"> "`, changed lines as a `"- "` /
/// `"+ "` pair, insertions as `"+ "` only and deletions as `"- "` only.
/// Texts print without their trailing terminator.
pub fn render(raw: &[RawLine]) -> String {
    let mut out = String::from("\n");
    for line in raw {
        if line.is_synthetic() {
            if !line.is_deleted() {
                let _ = writeln!(out, "+ {}", strip_terminator(line.text()));
            }
        } else if line.is_deleted() {
            let _ = writeln!(out, "- {}", strip_terminator(line.orig()));
        } else if line.is_changed() {
            let _ = writeln!(out, "- {}", strip_terminator(line.orig()));
            let _ = writeln!(out, "+ {}", strip_terminator(line.text()));
        } else {
            let _ = writeln!(out, "> {}", strip_terminator(line.text()));
        }
    }
    out
}
