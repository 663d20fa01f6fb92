use regex::Regex;

use crate::config::RunMode;
use crate::diagnostic::Severity;
use crate::diff;
use crate::line::{Line, RawLine};

// One staged operation. Kept in call order so the action lines of a commit
// read in the order the rule requested them. Insertions are applied to the
// raw lines right away; their entry here only carries the action wording.
enum Op {
    ReplaceRegex {
        pattern: Regex,
        replacement: String,
        // 0 means unlimited.
        limit: usize,
    },
    Replace {
        old: String,
        new: String,
    },
    ReplaceAfter {
        anchor: String,
        old: String,
        new: String,
    },
    ReplaceAt {
        raw_index: usize,
        offset: usize,
        old: String,
        new: String,
    },
    InsertBefore {
        text: String,
    },
    InsertAfter {
        text: String,
    },
    Delete,
}

/// The edit builder: accumulates a staged diagnostic and a batch of text
/// operations on one line, and resolves them together in [`Autofix::commit`].
///
/// The central invariant lives here: a staged diagnostic asserts "this is
/// fixable", and if the whole batch computes to nothing, the assertion is
/// false and the diagnostic vanishes without a trace, in every run mode.
pub struct Autofix<'a> {
    line: &'a mut Line,
    diagnostic: Option<(Severity, String)>,
    explanation: Vec<String>,
    ops: Vec<Op>,
}

impl<'a> Autofix<'a> {
    pub(crate) fn new(line: &'a mut Line) -> Self {
        Self {
            line,
            diagnostic: None,
            explanation: Vec::new(),
            ops: Vec::new(),
        }
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.diagnostic = Some((Severity::Error, message.into()));
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.diagnostic = Some((Severity::Warn, message.into()));
    }

    pub fn note(&mut self, message: impl Into<String>) {
        self.diagnostic = Some((Severity::Note, message.into()));
    }

    pub fn explain(&mut self, lines: &[&str]) {
        self.explanation = lines.iter().map(|line| line.to_string()).collect();
    }

    /// Queues a regex replacement over the line's physical texts.
    /// `limit` caps the number of replacements across the whole span;
    /// `None` replaces every match.
    pub fn replace_regex(&mut self, pattern: &Regex, replacement: &str, limit: Option<usize>) {
        self.ops.push(Op::ReplaceRegex {
            pattern: pattern.clone(),
            replacement: replacement.to_string(),
            limit: limit.unwrap_or(0),
        });
    }

    /// Queues a literal replacement of the first occurrence of `old`.
    pub fn replace(&mut self, old: &str, new: &str) {
        self.ops.push(Op::Replace {
            old: old.to_string(),
            new: new.to_string(),
        });
    }

    /// Queues a literal replacement of the first `old` that directly
    /// follows `anchor`; the anchor itself is kept.
    pub fn replace_after(&mut self, anchor: &str, old: &str, new: &str) {
        self.ops.push(Op::ReplaceAfter {
            anchor: anchor.to_string(),
            old: old.to_string(),
            new: new.to_string(),
        });
    }

    /// Queues a replacement of `old` at an exact byte offset of one
    /// physical line of the span.
    pub fn replace_at(&mut self, raw_index: usize, offset: usize, old: &str, new: &str) {
        self.ops.push(Op::ReplaceAt {
            raw_index,
            offset,
            old: old.to_string(),
            new: new.to_string(),
        });
    }

    /// Inserts a synthetic line immediately before the original content.
    /// The raw lines grow right away; the action is reported by the next
    /// commit, together with whatever diagnostic is staged then.
    pub fn insert_before(&mut self, text: &str) {
        let pos = self
            .line
            .raw
            .iter()
            .take_while(|raw| raw.is_synthetic())
            .count();
        self.line
            .raw
            .insert(pos, RawLine::synthetic(with_terminator(text)));
        self.ops.push(Op::InsertBefore {
            text: text.to_string(),
        });
    }

    /// Inserts a synthetic line immediately after the original content.
    pub fn insert_after(&mut self, text: &str) {
        self.line
            .raw
            .push(RawLine::synthetic(with_terminator(text)));
        self.ops.push(Op::InsertAfter {
            text: text.to_string(),
        });
    }

    /// Tombstones the line's own physical lines on the next commit.
    /// Synthetic lines inserted by earlier operations survive, so an
    /// insert-then-delete batch nets out to a replacement.
    pub fn delete(&mut self) {
        self.ops.push(Op::Delete);
    }

    /// Resolves the staged batch and clears it. Returns whether the edit
    /// was effective; an ineffective batch leaves no trace at all.
    pub fn commit(&mut self) -> bool {
        let ops = std::mem::take(&mut self.ops);
        let diagnostic = self.diagnostic.take();
        let explanation = std::mem::take(&mut self.explanation);

        let mut actions: Vec<String> = Vec::new();
        let mut effective = false;

        for op in ops {
            match op {
                Op::ReplaceRegex {
                    pattern,
                    replacement,
                    limit,
                } => {
                    if apply_regex(&mut self.line.raw, &pattern, &replacement, limit) {
                        actions.push(format!(
                            "Replacing regular expression \"{}\" with \"{replacement}\".",
                            pattern.as_str()
                        ));
                        effective = true;
                    }
                }
                Op::Replace { old, new } => {
                    if apply_literal(&mut self.line.raw, &old, &new) {
                        actions.push(format!("Replacing \"{old}\" with \"{new}\"."));
                        effective = true;
                    }
                }
                Op::ReplaceAfter { anchor, old, new } => {
                    if apply_after(&mut self.line.raw, &anchor, &old, &new) {
                        actions.push(format!("Replacing \"{old}\" with \"{new}\"."));
                        effective = true;
                    }
                }
                Op::ReplaceAt {
                    raw_index,
                    offset,
                    old,
                    new,
                } => {
                    if apply_at(&mut self.line.raw, raw_index, offset, &old, &new) {
                        actions.push(format!("Replacing \"{old}\" with \"{new}\"."));
                        effective = true;
                    }
                }
                Op::InsertBefore { text } => {
                    actions.push(format!("Inserting a line \"{text}\" before this line."));
                    effective = true;
                }
                Op::InsertAfter { text } => {
                    actions.push(format!("Inserting a line \"{text}\" after this line."));
                    effective = true;
                }
                Op::Delete => {
                    if apply_delete(&mut self.line.raw) {
                        actions.push("Deleting this line.".to_string());
                        effective = true;
                    }
                }
            }
        }

        if !effective {
            return false;
        }

        self.line.refresh_text();
        self.line.changed = true;

        let reporter = self.line.reporter.clone();
        let diff = if reporter.options().show_source && reporter.mode() != RunMode::Silent {
            Some(diff::render(&self.line.raw))
        } else {
            None
        };
        reporter.fixed(
            &self.line.location,
            diagnostic
                .as_ref()
                .map(|(severity, message)| (*severity, message.as_str())),
            &actions,
            diff.as_deref(),
            &explanation,
        );
        true
    }
}

fn with_terminator(text: &str) -> String {
    if text.ends_with('\n') {
        text.to_string()
    } else {
        format!("{text}\n")
    }
}

// Each `apply_*` helper reports whether it actually changed text; a match
// that reproduces the original text counts as no match, which is what keeps
// ineffective fixes invisible.

fn apply_regex(raw: &mut [RawLine], pattern: &Regex, replacement: &str, limit: usize) -> bool {
    let mut remaining = limit;
    let mut matched = false;
    for line in raw.iter_mut() {
        if line.is_deleted() {
            continue;
        }
        if limit != 0 && remaining == 0 {
            break;
        }
        let old = line.text().to_string();
        let here = if limit == 0 { 0 } else { remaining };
        let new = pattern.replacen(&old, here, replacement).into_owned();
        if new != old {
            if limit != 0 {
                remaining -= pattern.find_iter(&old).count().min(remaining);
            }
            line.set_text(new);
            matched = true;
        }
    }
    matched
}

fn apply_literal(raw: &mut [RawLine], old: &str, new: &str) -> bool {
    if old.is_empty() {
        return false;
    }
    for line in raw.iter_mut() {
        if line.is_deleted() {
            continue;
        }
        if let Some(pos) = line.text().find(old) {
            let mut text = line.text().to_string();
            text.replace_range(pos..pos + old.len(), new);
            if text == line.text() {
                return false;
            }
            line.set_text(text);
            return true;
        }
    }
    false
}

fn apply_after(raw: &mut [RawLine], anchor: &str, old: &str, new: &str) -> bool {
    if old.is_empty() {
        return false;
    }
    let needle = format!("{anchor}{old}");
    for line in raw.iter_mut() {
        if line.is_deleted() {
            continue;
        }
        if let Some(pos) = line.text().find(&needle) {
            let start = pos + anchor.len();
            let mut text = line.text().to_string();
            text.replace_range(start..start + old.len(), new);
            if text == line.text() {
                return false;
            }
            line.set_text(text);
            return true;
        }
    }
    false
}

fn apply_at(raw: &mut [RawLine], raw_index: usize, offset: usize, old: &str, new: &str) -> bool {
    if old.is_empty() || old == new {
        return false;
    }
    let Some(line) = raw.get_mut(raw_index) else {
        return false;
    };
    if line.is_deleted() {
        return false;
    }
    let matches_here = line
        .text()
        .get(offset..)
        .is_some_and(|rest| rest.starts_with(old));
    if !matches_here {
        return false;
    }
    let mut text = line.text().to_string();
    text.replace_range(offset..offset + old.len(), new);
    line.set_text(text);
    true
}

fn apply_delete(raw: &mut [RawLine]) -> bool {
    let mut deleted = false;
    for line in raw.iter_mut() {
        if !line.is_synthetic() && !line.is_deleted() {
            line.set_text(String::new());
            deleted = true;
        }
    }
    deleted
}
