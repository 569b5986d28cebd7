mod types;
mod validators;

pub use types::*;

use clap::Parser;
use std::process;

/// Parse command line arguments and validate them
///
/// Exits the process with status 1 if parsing or validation fails.
/// `--help` and `--version` still exit 0.
#[must_use]
pub fn args_checks() -> Args {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            process::exit(1);
        }
    };

    if let Err(e) = args.validate() {
        eprintln!("Error: {e}");
        process::exit(1);
    }

    args
}
