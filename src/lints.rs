use std::sync::LazyLock;

use regex::Regex;

use crate::line::Line;

static TRAILING_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)[ \t]+$").unwrap());

static SPACES_AFTER_ASSIGN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z_][A-Za-z0-9_.]*)([?+:]?=)[ ]+").unwrap());

/// ## What it does
///
/// Checks for physical lines ending in spaces or tabs.
///
/// ## Why is this bad?
///
/// Trailing whitespace is invisible in most editors, shows up in diffs and
/// patch reviews, and some make implementations include it in variable
/// values.
pub fn trailing_whitespace(line: &mut Line) {
    if !line
        .raw()
        .iter()
        .any(|raw| TRAILING_WHITESPACE.is_match(raw.text()))
    {
        return;
    }

    let mut fix = line.autofix();
    fix.note("Trailing whitespace.");
    fix.explain(&[
        "Whitespace at the end of a line serves no purpose and is",
        "invisible in most editors, so it tends to survive unnoticed and",
        "to pollute otherwise unrelated diffs.",
    ]);
    fix.replace_regex(&TRAILING_WHITESPACE, "", None);
    fix.commit();
}

/// ## What it does
///
/// Checks for variable assignments whose value is separated from the
/// operator by spaces.
///
/// ## Why is this bad?
///
/// The convention for build scripts in this dialect is a single tab
/// between the assignment operator and the value, so that consecutive
/// assignments line up in one column.
///
/// ## Example
///
/// ```makefile
/// DISTNAME=  package-1.0
/// ```
///
/// Use instead:
///
/// ```makefile
/// DISTNAME=	package-1.0
/// ```
pub fn assignment_spacing(line: &mut Line) {
    if !SPACES_AFTER_ASSIGN.is_match(line.text()) {
        return;
    }

    let mut fix = line.autofix();
    fix.warn("Values should be separated from the assignment operator by a tab, not spaces.");
    fix.explain(&[
        "A single tab after the operator keeps the values of consecutive",
        "assignments aligned at the same column, which makes blocks of",
        "variable definitions easier to scan.",
    ]);
    fix.replace_regex(&SPACES_AFTER_ASSIGN, "$1$2\t", Some(1));
    fix.commit();
}

/// Flags logical lines longer than 120 characters. No automatic fix;
/// breaking a line needs human judgement.
pub fn line_length(line: &Line) {
    if line.text().chars().count() <= 120 {
        return;
    }
    line.note("Line is longer than 120 characters.");
}

/// Deletes the second of two consecutive blank lines. The driver decides
/// when a line qualifies, since that needs the preceding line.
pub fn duplicate_blank_line(line: &mut Line) {
    let mut fix = line.autofix();
    fix.note("Contiguous blank lines.");
    fix.delete();
    fix.commit();
}
