use std::process::ExitCode;

use clap::Parser;
use logistics_optimizer::{app, args::Args, logging};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.debug_verbosity);

    match app::run(args).await {
        Ok(code) => code,
        Err(e) => {
            logging::log_error(&e);
            ExitCode::FAILURE
        }
    }
}
