use clap::{Parser, ValueEnum};

pub mod subcommands;

pub use subcommands::{Commands, ConfigCommands, LiveCommands, TicketCommands, VotingCommands};

/// Output mode shared by all commands.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    Json,
    /// Single-line JSON.
    Raw,
}

/// Top-level CLI parser for the `p3` binary.
#[derive(Debug, Parser)]
#[command(
    name = "p3",
    version,
    about = "Inspect conference talk-voting and live-stream routing decisions"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}
