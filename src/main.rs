mod cli;
mod commands;
mod config;
mod domain;
mod error;
mod pipeline;
mod presentation;
mod sources;
mod utils;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use commands::{Global, Runnable};

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    let g = Global { json: cli.json };

    match cli.command {
        Commands::Rank(cmd) => cmd.run(&g),
        Commands::Render(cmd) => cmd.run(&g),
    }
}
