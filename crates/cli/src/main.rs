//! `cfgctl`: command-line access to the configuration service.
//!
//! This binary is the composition root. Responsibilities:
//!
//! 1. **Parse arguments**: subcommand, coordinate, `--base-url`, `--log-format`.
//! 2. **Wire observability**: configure `tracing-subscriber` (and an OTLP
//!    exporter when `OTEL_EXPORTER_OTLP_ENDPOINT` is set). All events emitted
//!    by `config-client` flow through this subscriber.
//! 3. **Construct the client**: resolve the base URL once and build the single
//!    shared transport.
//! 4. **Run one operation**: print JSON pretty-printed, native text verbatim.
//!
//! Exit status is non-zero on any failure.

mod commands;
mod telemetry;

use std::io::Write;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use config_client::ConfigClient;
use tracing::info;

use crate::commands::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let telemetry = match telemetry::init(cli.log_format) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let result = run(cli).await;
    telemetry.shutdown();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = commands::settings(cli.base_url.as_deref())
        .context("invalid configuration service settings")?;
    info!(base_url = %settings.base_url(), "using configuration service");

    let client = ConfigClient::from_settings(&settings).context("failed to build client")?;
    let output = commands::execute(&client, &cli.command)
        .await
        .context("request failed")?;

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(output.render().as_bytes())
        .context("failed to write output")?;
    stdout.flush().context("failed to write output")?;
    Ok(())
}
