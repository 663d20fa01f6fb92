use std::io;
use std::path::Path;

use anyhow::Result;

use crate::config::Config;
use crate::diagnostic::Reporter;
use crate::fs;
use crate::line::Line;
use crate::lints;
use crate::status::ExitStatus;

/// Lints every configured path, applying or previewing fixes as requested,
/// and prints the run summary.
pub fn check(config: Config) -> Result<ExitStatus> {
    let reporter = Reporter::new(config.options, Box::new(io::stdout()));
    check_with(&config, &reporter)
}

pub fn check_with(config: &Config, reporter: &Reporter) -> Result<ExitStatus> {
    for path in &config.paths {
        check_path(path, reporter)?;
    }

    reporter.summary();

    Ok(if reporter.has_findings() {
        ExitStatus::Failure
    } else {
        ExitStatus::Success
    })
}

// Files are processed one after the other, and each file's edits are
// flushed before the next file is loaded, so an aborted run never leaves a
// half-processed file behind.
fn check_path(path: &Path, reporter: &Reporter) -> Result<()> {
    tracing::debug!(file = %path.display(), "checking");
    let mut lines = fs::load_lines(path, reporter)?;
    check_lines(path, &mut lines, reporter);
    fs::save_autofix_changes(&lines, reporter)?;
    Ok(())
}

fn check_lines(path: &Path, lines: &mut [Line], reporter: &Reporter) {
    if lines.is_empty() {
        Line::whole_file(reporter.clone(), path).note("This file is empty.");
        return;
    }

    let mut previous_blank = false;
    for line in lines.iter_mut() {
        lints::trailing_whitespace(line);
        lints::assignment_spacing(line);
        lints::line_length(line);

        let blank = line.raw().len() == 1 && line.text().trim().is_empty();
        if blank && previous_blank {
            lints::duplicate_blank_line(line);
        }
        previous_blank = blank;
    }

    // The last physical line of the file decides whether the file is
    // properly terminated.
    let unterminated = lines
        .last()
        .and_then(|line| line.raw().last())
        .is_some_and(|raw| !raw.text().is_empty() && !raw.text().ends_with('\n'));
    if unterminated {
        Line::eof(reporter.clone(), path).error("File does not end with a newline.");
    }
}
