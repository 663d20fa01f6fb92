use std::cell::Cell;
use std::path::PathBuf;

use smallvec::SmallVec;

use crate::autofix::Autofix;
use crate::diagnostic::{Reporter, Severity};
use crate::location::Location;

/// One physical source line: the text as first loaded and the text as
/// edited so far, both including their line terminator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawLine {
    // Positive for lines from the original file; 0 marks a synthetic
    // (inserted) line.
    number: usize,
    // Immutable after loading; empty for synthetic lines.
    orig: String,
    // Current text; empty means the line is tombstoned (deleted but kept
    // in the sequence so diffs can still show it).
    text: String,
}

impl RawLine {
    pub(crate) fn from_source(number: usize, text: String) -> Self {
        Self {
            number,
            orig: text.clone(),
            text,
        }
    }

    pub(crate) fn synthetic(text: String) -> Self {
        Self {
            number: 0,
            orig: String::new(),
            text,
        }
    }

    pub fn number(&self) -> usize {
        self.number
    }

    pub fn orig(&self) -> &str {
        &self.orig
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_synthetic(&self) -> bool {
        self.number == 0
    }

    pub fn is_deleted(&self) -> bool {
        self.text.is_empty()
    }

    pub fn is_changed(&self) -> bool {
        self.text != self.orig
    }

    pub(crate) fn set_text(&mut self, text: String) {
        self.text = text;
    }
}

/// One logical statement, possibly spanning several physical lines via
/// backslash continuation. The anchor every rule reports against, and the
/// exclusive owner of its raw lines.
pub struct Line {
    pub(crate) location: Location,
    pub(crate) text: String,
    pub(crate) raw: SmallVec<[RawLine; 1]>,
    pub(crate) changed: bool,
    pub(crate) reporter: Reporter,
    // Whether the most recent bare diagnostic was actually emitted, so
    // `explain` knows to stay quiet for a discarded one.
    last_emitted: Cell<bool>,
}

impl Line {
    /// A statement starting at physical line `first_number`, one entry per
    /// physical line, terminators included.
    pub fn new(
        reporter: Reporter,
        file: impl Into<PathBuf>,
        first_number: usize,
        raw_texts: Vec<String>,
    ) -> Self {
        let raw: SmallVec<[RawLine; 1]> = raw_texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| RawLine::from_source(first_number + i, text))
            .collect();
        let last_number = first_number + raw.len().saturating_sub(1);
        let text = logical_text(&raw);
        Self {
            location: Location::new(file, first_number, last_number),
            text,
            raw,
            changed: false,
            reporter,
            last_emitted: Cell::new(false),
        }
    }

    /// An anchor for diagnostics about the file as a whole. Owns no raw
    /// lines, so it never contributes to persistence.
    pub fn whole_file(reporter: Reporter, file: impl Into<PathBuf>) -> Self {
        Self {
            location: Location::whole_file(file),
            text: String::new(),
            raw: SmallVec::new(),
            changed: false,
            reporter,
            last_emitted: Cell::new(false),
        }
    }

    /// The end-of-file sentinel. Insertions on it append to the file.
    pub fn eof(reporter: Reporter, file: impl Into<PathBuf>) -> Self {
        Self {
            location: Location::eof(file),
            text: String::new(),
            raw: SmallVec::new(),
            changed: false,
            reporter,
            last_emitted: Cell::new(false),
        }
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    /// The logical content, continuation markers resolved, no terminator.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The current physical lines, including synthetic and tombstoned
    /// entries.
    pub fn raw(&self) -> &[RawLine] {
        &self.raw
    }

    /// True once any committed edit has produced a real difference.
    pub fn is_changed(&self) -> bool {
        self.changed
    }

    pub fn error(&self, message: impl AsRef<str>) {
        self.diagnostic(Severity::Error, message.as_ref());
    }

    pub fn warn(&self, message: impl AsRef<str>) {
        self.diagnostic(Severity::Warn, message.as_ref());
    }

    pub fn note(&self, message: impl AsRef<str>) {
        self.diagnostic(Severity::Note, message.as_ref());
    }

    fn diagnostic(&self, severity: Severity, message: &str) {
        let emitted = self.reporter.diagnostic(severity, &self.location, message);
        self.last_emitted.set(emitted);
    }

    /// Explains the diagnostic reported just before. Stays silent when that
    /// diagnostic was discarded, or when `--explain` is not active.
    pub fn explain(&self, lines: &[&str]) {
        if !self.last_emitted.get() {
            return;
        }
        self.reporter.explain(lines);
    }

    /// The edit builder for this line. The `&mut` borrow makes the builder
    /// exclusive for as long as it lives; call again for further edits.
    pub fn autofix(&mut self) -> Autofix<'_> {
        Autofix::new(self)
    }

    /// Convenience path: a first-occurrence literal replacement applied
    /// right away, without a staged diagnostic. Returns whether anything
    /// changed.
    pub fn replace_now(&mut self, old: &str, new: &str) -> bool {
        let mut fix = self.autofix();
        fix.replace(old, new);
        fix.commit()
    }

    pub(crate) fn refresh_text(&mut self) {
        self.text = logical_text(&self.raw);
    }
}

/// Joins the physical lines of a statement into its logical text: the
/// backslash-newline of a continuation and the following indentation
/// collapse into a single space, and the final terminator is dropped.
/// Synthetic lines are separate statements-to-be, not continuations, so
/// they stay out; tombstoned lines are gone.
pub(crate) fn logical_text(raw: &[RawLine]) -> String {
    let mut text = String::new();
    let mut first = true;
    for line in raw {
        if line.is_synthetic() || line.is_deleted() {
            continue;
        }
        let mut content = strip_terminator(line.text());
        if let Some(stripped) = content.strip_suffix('\\') {
            content = stripped.trim_end();
        }
        if !first {
            content = content.trim_start();
            if !text.is_empty() && !content.is_empty() {
                text.push(' ');
            }
        }
        text.push_str(content);
        first = false;
    }
    text
}

/// The text of a physical line without its `\n` or `\r\n` terminator.
pub(crate) fn strip_terminator(text: &str) -> &str {
    let text = text.strip_suffix('\n').unwrap_or(text);
    text.strip_suffix('\r').unwrap_or(text)
}
