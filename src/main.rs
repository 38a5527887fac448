use std::process::ExitCode;

use chownr::cli::Cli;
use clap::Parser as _;
use tracing::debug;

fn main() -> ExitCode {
    let cli = Cli::parse();
    cli.setup_tracing();
    debug!("Parsed CLI arguments: {cli:?}");

    match cli.run() {
        Ok(outcome) => outcome.exit_code(),
        Err(err) => {
            eprintln!("chownr: {err}");
            err.exit_code()
        }
    }
}
