use std::cell::{Cell, RefCell};
use std::fmt;
use std::io::Write;
use std::path::Path;
use std::rc::Rc;

use colored::{ColoredString, Colorize};

use crate::config::{Options, RunMode};
use crate::location::Location;

/// Diagnostic severities, from most to least serious.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warn,
    Note,
}

impl Severity {
    fn keyword(self) -> &'static str {
        match self {
            Severity::Error => "ERROR",
            Severity::Warn => "WARN",
            Severity::Note => "NOTE",
        }
    }

    fn painted(self) -> ColoredString {
        match self {
            Severity::Error => self.keyword().red().bold(),
            Severity::Warn => self.keyword().yellow().bold(),
            Severity::Note => self.keyword().green(),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// The diagnostic sink. It owns the run options and the output stream and
/// decides, per run mode, whether a diagnostic is printed immediately,
/// resolved together with a fix, or discarded.
///
/// Lines hold cheap clones of this handle. The engine is single-threaded,
/// so an `Rc` with interior mutability is all the sharing that is needed.
#[derive(Clone)]
pub struct Reporter {
    inner: Rc<ReporterInner>,
}

struct ReporterInner {
    options: Options,
    out: RefCell<Box<dyn Write>>,
    errors: Cell<usize>,
    warnings: Cell<usize>,
    notes: Cell<usize>,
    files_fixed: Cell<usize>,
}

impl Reporter {
    pub fn new(options: Options, out: Box<dyn Write>) -> Self {
        Self {
            inner: Rc::new(ReporterInner {
                options,
                out: RefCell::new(out),
                errors: Cell::new(0),
                warnings: Cell::new(0),
                notes: Cell::new(0),
                files_fixed: Cell::new(0),
            }),
        }
    }

    pub fn options(&self) -> Options {
        self.inner.options
    }

    pub fn mode(&self) -> RunMode {
        self.inner.options.mode
    }

    // Writes are `.ok()` so a broken stdout pipe never panics the linter.
    fn write_line(&self, text: &str) {
        let mut out = self.inner.out.borrow_mut();
        writeln!(out, "{text}").ok();
    }

    fn write_text(&self, text: &str) {
        let mut out = self.inner.out.borrow_mut();
        write!(out, "{text}").ok();
    }

    fn count(&self, severity: Severity) {
        let counter = match severity {
            Severity::Error => &self.inner.errors,
            Severity::Warn => &self.inner.warnings,
            Severity::Note => &self.inner.notes,
        };
        counter.set(counter.get() + 1);
    }

    /// A diagnostic issued directly on a line, with no fix attached.
    /// Returns whether it was actually emitted: a bare diagnostic has
    /// nothing to preview, so `Preview` discards it unconditionally.
    pub(crate) fn diagnostic(
        &self,
        severity: Severity,
        location: &Location,
        message: &str,
    ) -> bool {
        if self.mode() == RunMode::Preview {
            return false;
        }
        self.write_line(&format!("{}: {location}: {message}", severity.painted()));
        self.count(severity);
        true
    }

    /// The explanation paragraph attached to an emitted diagnostic: a blank
    /// line, each explanation line behind a tab, and a closing blank line.
    pub(crate) fn explain<S: AsRef<str>>(&self, lines: &[S]) {
        if !self.inner.options.show_explain || lines.is_empty() {
            return;
        }
        self.write_line("");
        for line in lines {
            self.write_line(&format!("\t{}", line.as_ref()));
        }
        self.write_line("");
    }

    /// Resolves a committed, effective fix: the staged diagnostic (if any
    /// was staged), one action line per performed edit, the rendered diff,
    /// and the explanation, each shown or suppressed according to the mode.
    pub(crate) fn fixed(
        &self,
        location: &Location,
        diagnostic: Option<(Severity, &str)>,
        actions: &[String],
        diff: Option<&str>,
        explanation: &[String],
    ) {
        match self.mode() {
            RunMode::Silent => {
                if let Some((severity, message)) = diagnostic {
                    self.write_line(&format!("{}: {location}: {message}", severity.painted()));
                    self.count(severity);
                    self.explain(explanation);
                }
            }
            RunMode::Preview => {
                if let Some((severity, message)) = diagnostic {
                    self.write_line(&format!("{}: {location}: {message}", severity.painted()));
                    self.count(severity);
                }
                for action in actions {
                    self.write_line(&format!("AUTOFIX: {location}: {action}"));
                }
                if let Some(diff) = diff {
                    self.write_text(diff);
                }
                if diagnostic.is_some() {
                    self.explain(explanation);
                }
            }
            RunMode::Apply => {
                // The fix replaces the complaint; the diagnostic line is
                // suppressed but still counted for the summary.
                if let Some((severity, _)) = diagnostic {
                    self.count(severity);
                }
                for action in actions {
                    self.write_line(&format!("AUTOFIX: {location}: {action}"));
                }
                if let Some(diff) = diff {
                    self.write_text(diff);
                }
            }
        }
    }

    /// The per-file trailer printed after a successful rewrite.
    pub(crate) fn file_fixed(&self, file: &Path) {
        self.write_line(&format!(
            "AUTOFIX: {}: Has been auto-fixed. Please re-run mklint.",
            file.display()
        ));
        self.inner.files_fixed.set(self.inner.files_fixed.get() + 1);
    }

    pub fn files_fixed(&self) -> usize {
        self.inner.files_fixed.get()
    }

    pub fn findings(&self) -> usize {
        self.inner.errors.get() + self.inner.warnings.get() + self.inner.notes.get()
    }

    pub fn has_findings(&self) -> bool {
        self.findings() > 0
    }

    pub fn summary(&self) {
        self.write_line("");
        match self.findings() {
            0 => self.write_line("All checks passed!"),
            1 => self.write_line("Found 1 problem."),
            n => self.write_line(&format!("Found {n} problems.")),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::RunMode;
    use crate::diagnostic::Severity;
    use crate::location::Location;
    use crate::utils_test::reporter;

    #[test]
    fn bare_diagnostic_prints_in_silent_and_apply() {
        for mode in [RunMode::Silent, RunMode::Apply] {
            let (reporter, out) = reporter(mode, false, false);
            let location = Location::new("Makefile", 2, 2);
            assert!(reporter.diagnostic(Severity::Warn, &location, "Something looks off."));
            assert_eq!(out.contents(), "WARN: Makefile:2: Something looks off.\n");
            assert!(reporter.has_findings());
        }
    }

    #[test]
    fn bare_diagnostic_is_discarded_in_preview() {
        let (reporter, out) = reporter(RunMode::Preview, true, true);
        let location = Location::new("Makefile", 2, 2);
        assert!(!reporter.diagnostic(Severity::Error, &location, "Something looks off."));
        assert_eq!(out.contents(), "");
        assert!(!reporter.has_findings());
    }

    #[test]
    fn explanation_requires_the_flag() {
        let (silent, out) = reporter(RunMode::Silent, false, false);
        silent.explain(&["Some background."]);
        assert_eq!(out.contents(), "");

        let (explaining, out) = reporter(RunMode::Silent, false, true);
        explaining.explain(&["Some background."]);
        assert_eq!(out.contents(), "\n\tSome background.\n\n");
    }

    #[test]
    fn summary_pluralizes() {
        let (clean, out) = reporter(RunMode::Silent, false, false);
        clean.summary();
        assert_eq!(out.contents(), "\nAll checks passed!\n");

        let (flagged, out) = reporter(RunMode::Silent, false, false);
        let location = Location::new("Makefile", 1, 1);
        flagged.diagnostic(Severity::Note, &location, "One.");
        flagged.diagnostic(Severity::Warn, &location, "Two.");
        flagged.summary();
        assert!(out.contents().ends_with("\nFound 2 problems.\n"));
    }
}
