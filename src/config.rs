use std::path::PathBuf;

use crate::args::Args;

/// How the run treats fixable diagnostics. Exactly one mode is active per
/// run; the CLI enforces that `--autofix` and `--show-autofix` are mutually
/// exclusive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RunMode {
    /// Report diagnostics only.
    #[default]
    Silent,
    /// Show what each fix would do, without writing any file.
    Preview,
    /// Apply the fixes and persist the changed files.
    Apply,
}

/// Reporting options, read-only once a run starts. These are threaded into
/// the reporter at construction time rather than living in a global.
#[derive(Clone, Copy, Debug, Default)]
pub struct Options {
    pub mode: RunMode,
    /// Render the before/after source of effective fixes.
    pub show_source: bool,
    /// Print the explanation paragraphs attached to diagnostics.
    pub show_explain: bool,
}

pub struct Config {
    /// Paths to files to lint.
    pub paths: Vec<PathBuf>,
    pub options: Options,
}

pub fn build_config(args: &Args, paths: Vec<PathBuf>) -> Config {
    let mode = if args.autofix {
        RunMode::Apply
    } else if args.show_autofix {
        RunMode::Preview
    } else {
        RunMode::Silent
    };

    Config {
        paths,
        options: Options {
            mode,
            show_source: args.source,
            show_explain: args.explain,
        },
    }
}
