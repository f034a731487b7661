use clap::Parser;
use ipmentor::config::{Config, APP_NAME, VERSION};
use ipmentor::logging::init_logging;
use std::error::Error;
use std::process::ExitCode;

mod cli;

fn main() -> Result<ExitCode, Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    let cli = cli::Cli::parse();
    let config = Config::from_env()?;
    init_logging(&config)?;
    log::info!("#Start {APP_NAME} v{VERSION}");

    cli::run(cli, &config)
}
