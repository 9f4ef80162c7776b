//! # dockmem
//!
//! Live terminal chart of one container's memory usage against its limit,
//! fed by the container daemon's streaming stats endpoint.

mod commands;

use clap::Parser;

use crate::commands::Cli;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    commands::execute(&cli)
}
