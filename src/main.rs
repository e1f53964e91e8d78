mod cli;

use std::process::ExitCode;

use clap::Parser;

use lead_console::logging;

#[tokio::main]
async fn main() -> ExitCode {
    logging::init_tracing();

    let args = cli::Cli::parse();
    match cli::run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
