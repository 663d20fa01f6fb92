use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use rustc_hash::FxHashMap;
use tempfile::NamedTempFile;

use crate::config::RunMode;
use crate::diagnostic::Reporter;
use crate::line::{Line, RawLine, strip_terminator};

/// Reads a file and splits it into logical lines: physical lines keep
/// their terminators, and a line whose content ends in a backslash is
/// joined with its successors into one statement.
pub fn load_lines(path: &Path, reporter: &Reporter) -> Result<Vec<Line>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    let lines = lines_from_str(path, &contents, reporter);
    tracing::debug!(file = %path.display(), lines = lines.len(), "loaded");
    Ok(lines)
}

pub(crate) fn lines_from_str(path: &Path, contents: &str, reporter: &Reporter) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut pending: Vec<String> = Vec::new();
    let mut first_number = 1;

    for physical in split_physical(contents) {
        let continued = strip_terminator(&physical).ends_with('\\');
        pending.push(physical);
        if !continued {
            let count = pending.len();
            lines.push(Line::new(
                reporter.clone(),
                path,
                first_number,
                std::mem::take(&mut pending),
            ));
            first_number += count;
        }
    }
    // A dangling continuation on the very last physical line still forms
    // a statement.
    if !pending.is_empty() {
        lines.push(Line::new(reporter.clone(), path, first_number, pending));
    }

    lines
}

// Splits into physical lines, each including its terminator; the final
// line may lack one.
fn split_physical(contents: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut rest = contents;
    while let Some(pos) = rest.find('\n') {
        out.push(rest[..=pos].to_string());
        rest = &rest[pos + 1..];
    }
    if !rest.is_empty() {
        out.push(rest.to_string());
    }
    out
}

/// Flushes the effective edits of a processed set of lines back to disk.
///
/// Only an `Apply` run writes anything, and within it only files where at
/// least one raw line differs from its original text. Each rewrite goes
/// through a temp file in the target directory and is persisted over the
/// original in one step, so a file is either rewritten completely or left
/// alone. Returns the number of files written.
pub fn save_autofix_changes(lines: &[Line], reporter: &Reporter) -> Result<usize> {
    if reporter.mode() != RunMode::Apply {
        return Ok(0);
    }

    // Group raw lines by file, in first-seen order so the trailers come
    // out deterministically.
    let mut order: Vec<&Path> = Vec::new();
    let mut by_file: FxHashMap<&Path, Vec<&RawLine>> = FxHashMap::default();
    for line in lines {
        let file = line.location().file();
        match by_file.get_mut(file) {
            Some(bucket) => bucket.extend(line.raw()),
            None => {
                order.push(file);
                by_file.insert(file, line.raw().iter().collect());
            }
        }
    }

    let mut written = 0;
    for file in order {
        let raw = &by_file[file];
        if !raw.iter().any(|line| line.is_changed()) {
            continue;
        }
        write_file(file, raw).with_context(|| format!("Failed to write file: {}", file.display()))?;
        tracing::debug!(file = %file.display(), "rewrote");
        reporter.file_fixed(file);
        written += 1;
    }
    Ok(written)
}

fn write_file(path: &Path, raw: &[&RawLine]) -> Result<()> {
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    let mut tmp = NamedTempFile::new_in(dir.unwrap_or(Path::new(".")))?;
    for line in raw {
        if !line.is_deleted() {
            tmp.write_all(line.text().as_bytes())?;
        }
    }
    tmp.persist(path).map_err(|err| err.error)?;
    Ok(())
}
