use std::path::PathBuf;

use clap::Parser;

use crate::logging::LogLevel;

#[derive(Debug, Parser)]
#[command(
    author,
    name = "mklint",
    about = "mklint: Find and Fix Lints in Makefile-style Build Scripts"
)]
#[command(version)]
pub struct Args {
    #[arg(
        required = true,
        help = "Files or directories to check, for example `mklint .`."
    )]
    pub files: Vec<PathBuf>,
    #[arg(
        long,
        default_value = "false",
        help = "Automatically fix the issues detected by the linter and write the files back."
    )]
    pub autofix: bool,
    #[arg(
        long,
        conflicts_with = "autofix",
        default_value = "false",
        help = "Show which fixes would be applied, without writing any file."
    )]
    pub show_autofix: bool,
    #[arg(
        long,
        default_value = "false",
        help = "Show the source lines affected by a fix, in a before/after view."
    )]
    pub source: bool,
    #[arg(
        long,
        default_value = "false",
        help = "Print the detailed explanation attached to a diagnostic, if it has one."
    )]
    pub explain: bool,

    /// The log level. One of: `error`, `warn`, `info`, `debug`, or `trace`.
    /// Defaults to `warn`.
    #[arg(long)]
    pub log_level: Option<LogLevel>,

    /// Disable colored output. To turn colored output off, either set this
    /// option or set the environment variable `NO_COLOR` to any non-zero
    /// value.
    #[arg(long)]
    pub no_color: bool,
}
