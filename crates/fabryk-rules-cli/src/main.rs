//! fabryk-rules CLI
//!
//! Compiles front-end search requests into search-engine query documents.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use anyhow::Result;
use clap::Parser;
use fabryk_rules_cli::{Cli, commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging on stderr; stdout carries the query document
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    commands::run(cli)?;
    Ok(())
}
