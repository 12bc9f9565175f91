//! Binary crate for the `weatherly` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments into UI events
//! - Interactive configuration
//! - Writing the rendered panels to stdout or an HTML page

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    cmd.init_tracing();
    cmd.run().await
}
