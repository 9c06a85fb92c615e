//! petrocost - main CLI entry point

use std::process::ExitCode;

use clap::Parser;

use petrocost_cli::{Args, app};

fn main() -> ExitCode {
    let args = Args::parse();

    match app::run(args) {
        Ok(code) => code,
        Err(err) => {
            // Logging may not be initialized yet (configuration errors).
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
