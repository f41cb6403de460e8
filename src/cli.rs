use clap::{Parser, Subcommand};

use crate::commands::{Rank, Render};

/// 🔍 Which of your repositories moved most recently?
#[derive(Parser)]
#[command(
    name = "toprepos",
    version,
    about = "✨ Rank repositories by their latest commit and render a report",
    long_about = None,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 🧾 JSON output for every command
    #[arg(long, global = true)]
    pub json: bool,

    /// 🔊 Log level (error, warn, info, debug, trace); RUST_LOG wins if set
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    pub log_level: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🏆 Rank repositories by most recent commit
    Rank(Rank),

    /// 📝 Render a saved report through a template
    Render(Render),
}
