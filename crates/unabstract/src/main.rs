use std::process::ExitCode;

use clap::Parser;

use unabstract::cli::{self, Cli};
use unabstract::logging::{init_logging, targets};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli::run(&cli) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(target: targets::CLI, error = %err, "run aborted");
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
