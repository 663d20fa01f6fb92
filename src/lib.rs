//! Core functionality for the mklint build-script linter
//!
//! This crate provides the line-editing and diagnostic engine every lint
//! rule builds on:
//! - logical lines spanning physical continuation lines
//! - diagnostic reporting gated by the run mode
//! - automatic fixes that vanish entirely when they turn out to be no-ops
//! - before/after previews and atomic write-back of fixed files

pub mod args;
pub mod autofix;
pub mod check;
pub mod config;
pub mod diagnostic;
pub mod diff;
pub mod discovery;
pub mod fs;
pub mod line;
pub mod lints;
pub mod location;
pub mod logging;
pub mod status;

#[cfg(test)]
pub mod utils_test;

use colored::Colorize;

use crate::args::Args;
use crate::status::ExitStatus;

pub fn run(args: Args) -> anyhow::Result<ExitStatus> {
    let paths = discovery::discover_build_files(&args.files);

    if paths.is_empty() {
        println!(
            "{}: {}",
            "Warning".yellow().bold(),
            "No build-script files found under the given path(s)."
        );
        return Ok(ExitStatus::Success);
    }

    let config = config::build_config(&args, paths);
    check::check(config)
}
