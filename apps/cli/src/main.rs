//! qgroups CLI — resolve question-group content into a normalized model.
//!
//! Reads question-group markdown documents, resolves long-form answers,
//! topics, authors, and related guides, and prints the result.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
