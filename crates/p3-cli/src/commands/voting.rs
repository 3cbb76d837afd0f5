use anyhow::Context;
use chrono::Utc;
use p3_config::P3Config;
use p3_core::{ConferenceEdition, VotingWindow};
use p3_voting::{InMemoryRecords, VotingPolicy, is_voting_opened};
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::cli::subcommands::{VotingCheckArgs, VotingOpenedArgs};
use crate::output::output;

#[derive(Debug, Serialize)]
struct VotingDecision<'a> {
    email: Option<&'a str>,
    conference: &'a str,
    allowed: bool,
    /// Where to send users who may not vote, if configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    redirect: Option<&'a str>,
}

/// Handle `p3 voting check`.
pub fn check(args: &VotingCheckArgs, config: &P3Config, format: OutputFormat) -> anyhow::Result<()> {
    let user = super::attendee(&args.user)?;
    let records = InMemoryRecords::from_json_file(&args.records)
        .with_context(|| format!("failed to load records from {}", args.records.display()))?;

    let policy = VotingPolicy::from_config(&config.voting);
    let allowed = policy.allows(&records, &user);

    let redirect = (!allowed && config.voting.has_disallowed_redirect())
        .then_some(config.voting.disallowed_redirect.as_str());

    output(
        &VotingDecision {
            email: user.email(),
            conference: policy.current_conference().as_str(),
            allowed,
            redirect,
        },
        format,
    )
}

#[derive(Debug, Serialize)]
struct VotingOpened<'a> {
    email: Option<&'a str>,
    conference: &'a str,
    opened: bool,
}

/// Handle `p3 voting opened`.
pub fn opened(args: &VotingOpenedArgs, config: &P3Config, format: OutputFormat) -> anyhow::Result<()> {
    if args.end <= args.start {
        anyhow::bail!("--end must be after --start");
    }
    let user = super::attendee(&args.user)?;
    let edition = ConferenceEdition::new(
        config.voting.current_conference.clone(),
        config.general.conference_name.clone(),
    )
    .with_voting(VotingWindow {
        start: args.start,
        end: args.end,
    });

    let now = args.at.unwrap_or_else(Utc::now);
    output(
        &VotingOpened {
            email: user.email(),
            conference: edition.id.as_str(),
            opened: is_voting_opened(&user, &edition, now),
        },
        format,
    )
}
