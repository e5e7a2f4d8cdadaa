use std::fs;
use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use tmsgeo::cli::{run, Cli};
use tmsgeo::Result;

fn execute(cli: &Cli) -> Result<()> {
    let contents = match &cli.config {
        Some(path) => Some(fs::read_to_string(path)?),
        None => None,
    };
    let config = cli.resolve_config(contents.as_deref())?;

    run(cli, &config, io::stdin().lock(), io::stdout().lock())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
