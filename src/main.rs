//! Entry point for the dupescan CLI.

use clap::Parser;
use dupescan::cli::Cli;
use dupescan::error::ExitCode;
use dupescan::logging::init_logging;

fn main() {
    // Clap handles usage errors itself (usage message, exit code 2).
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    match dupescan::run_app(cli) {
        Ok(code) => std::process::exit(code.as_i32()),
        Err(err) => {
            eprintln!("Error: {err:#}");
            std::process::exit(ExitCode::GeneralError.as_i32());
        }
    }
}
