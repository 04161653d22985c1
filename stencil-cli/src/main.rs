//! Stencil command-line tool
//!
//! Usage:
//!   stencil validate payload.json
//!   stencil extract welcome.txt --content PLAIN_TEXT
//!   stencil render welcome.txt --var name=Ada
//!   stencil upload invoice.html --name invoice --summary "Monthly invoice" --content HTML
//!
//! Logs go to stderr; command output goes to stdout.

use anyhow::Result;
use clap::Parser;
use stencil_cli::{Cli, run};
use tracing::debug;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    debug!(command = ?cli.command, "Running");
    let output = run(cli.command)?;
    println!("{output}");
    Ok(())
}
