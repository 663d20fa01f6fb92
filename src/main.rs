use std::process::ExitCode;

use clap::Parser;

use mklint::args::Args;
use mklint::logging;
use mklint::status::ExitStatus;

fn main() -> ExitCode {
    let args = Args::parse();

    logging::init_logging(args.log_level.unwrap_or_default());

    if args.no_color {
        colored::control::set_override(false);
    }

    match mklint::run(args) {
        Ok(status) => status.into(),
        Err(err) => {
            use std::io::Write;

            // Use `writeln` instead of `eprintln` to avoid panicking when the
            // stderr pipe is broken.
            let mut stderr = std::io::stderr().lock();

            writeln!(stderr, "mklint failed").ok();

            for cause in err.chain() {
                writeln!(stderr, "  Cause: {cause}").ok();
            }

            ExitStatus::Error.into()
        }
    }
}
