use p3_config::P3Config;
use p3_core::Attendee;

use crate::cli::subcommands::UserArgs;
use crate::cli::{Commands, ConfigCommands, LiveCommands, OutputFormat, TicketCommands, VotingCommands};

mod config;
mod live;
mod tickets;
mod voting;

/// Route a parsed command to its handler.
pub async fn dispatch(
    command: Commands,
    config: &P3Config,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match command {
        Commands::Voting { action } => match action {
            VotingCommands::Check(args) => voting::check(&args, config, format),
            VotingCommands::Opened(args) => voting::opened(&args, config, format),
        },
        Commands::Live { action } => match action {
            LiveCommands::Redirect(args) => live::redirect(&args, config, format),
            LiveCommands::Embed(args) => live::embed(&args, config, format).await,
        },
        Commands::Tickets { action } => match action {
            TicketCommands::List(args) => tickets::list(&args, config, format),
        },
        Commands::Config { action } => match action {
            ConfigCommands::Show => config::show(config),
        },
    }
}

fn attendee(user: &UserArgs) -> anyhow::Result<Attendee> {
    match &user.email {
        Some(email) => Ok(Attendee::authenticated(email.as_str(), user.superuser)?),
        None if user.superuser => anyhow::bail!("--superuser requires --email"),
        None => Ok(Attendee::anonymous()),
    }
}
