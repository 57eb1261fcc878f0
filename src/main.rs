//! Entry point for run-odoo.
use std::process::ExitCode;

use clap::Parser;
use run_odoo::{
    cli::{self, CliArgs, CliExit},
    lib::telemetry,
};

#[tokio::main]
async fn main() -> ExitCode {
    match bootstrap().await {
        Ok(_) => ExitCode::SUCCESS,
        Err(exit) => exit.report(),
    }
}

async fn bootstrap() -> Result<(), CliExit> {
    let args = CliArgs::parse();
    telemetry::init_tracing(args.verbose).map_err(CliExit::from_error)?;
    cli::execute(args).await.map_err(CliExit::from_error)
}
