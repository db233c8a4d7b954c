//! Binary crate for the `wttrbar` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments and merging them with the config file
//! - Wiring the wttr.in provider to the formatters
//! - Printing one JSON value for Waybar on stdout

use clap::Parser;

mod cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // stdout carries the JSON for the bar, so logs go to stderr only
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
