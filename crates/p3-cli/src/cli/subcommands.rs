use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Talk voting eligibility.
    Voting {
        #[command(subcommand)]
        action: VotingCommands,
    },
    /// Live-stream routing.
    Live {
        #[command(subcommand)]
        action: LiveCommands,
    },
    /// Ticket queries.
    Tickets {
        #[command(subcommand)]
        action: TicketCommands,
    },
    /// Effective configuration.
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Identity flags shared by voting commands.
#[derive(Clone, Debug, Args)]
pub struct UserArgs {
    /// Attendee email; omit for an anonymous visitor.
    #[arg(long)]
    pub email: Option<String>,
    /// Treat the attendee as a superuser.
    #[arg(long)]
    pub superuser: bool,
}

#[derive(Clone, Debug, Subcommand)]
pub enum VotingCommands {
    /// Decide whether a user may vote on talks.
    Check(VotingCheckArgs),
    /// Decide whether a user may open the voting page.
    Opened(VotingOpenedArgs),
}

#[derive(Clone, Debug, Args)]
pub struct VotingCheckArgs {
    /// JSON snapshot with `tickets` and `speakers` arrays.
    #[arg(long)]
    pub records: PathBuf,
    #[command(flatten)]
    pub user: UserArgs,
}

#[derive(Clone, Debug, Args)]
pub struct VotingOpenedArgs {
    #[command(flatten)]
    pub user: UserArgs,
    /// Voting start (RFC 3339).
    #[arg(long)]
    pub start: DateTime<Utc>,
    /// Voting end, exclusive (RFC 3339).
    #[arg(long)]
    pub end: DateTime<Utc>,
    /// Evaluate at this instant instead of now (RFC 3339).
    #[arg(long)]
    pub at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Subcommand)]
pub enum LiveCommands {
    /// Playback URL for a track or event.
    Redirect(LiveArgs),
    /// Embeddable player markup for a track or event.
    Embed(LiveArgs),
}

#[derive(Clone, Debug, Args)]
pub struct LiveArgs {
    /// Requester's remote address.
    #[arg(long)]
    pub addr: String,
    /// Requester's user-agent header.
    #[arg(long, default_value = "")]
    pub ua: String,
    /// Track id.
    #[arg(long)]
    pub track: Option<String>,
    /// Scheduled event as JSON, e.g. `{"tags": ["keynote"], "tracks": ["track1"]}`.
    #[arg(long)]
    pub event: Option<String>,
}

#[derive(Clone, Debug, Subcommand)]
pub enum TicketCommands {
    /// List paid tickets of a conference.
    List(TicketListArgs),
}

#[derive(Clone, Debug, Args)]
pub struct TicketListArgs {
    /// JSON snapshot with a `tickets` array.
    #[arg(long)]
    pub records: PathBuf,
    /// Conference id (defaults to the configured current conference).
    #[arg(long)]
    pub conference: Option<String>,
    /// Ticket type, e.g. `conference`.
    #[arg(long = "type")]
    pub ticket_type: Option<String>,
    /// Fare code; a trailing `%` matches by prefix.
    #[arg(long)]
    pub fare: Option<String>,
}

#[derive(Clone, Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML.
    Show,
}
