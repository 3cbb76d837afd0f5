use anyhow::Context;
use p3_config::P3Config;
use p3_core::{ConferenceId, TicketFilter};
use p3_voting::InMemoryRecords;

use crate::cli::OutputFormat;
use crate::cli::subcommands::TicketListArgs;
use crate::output::output;

/// Handle `p3 tickets list`.
pub fn list(args: &TicketListArgs, config: &P3Config, format: OutputFormat) -> anyhow::Result<()> {
    let records = InMemoryRecords::from_json_file(&args.records)
        .with_context(|| format!("failed to load records from {}", args.records.display()))?;

    let filter = build_filter(args, config);
    output(&filter.apply(&records.tickets), format)
}

fn build_filter(args: &TicketListArgs, config: &P3Config) -> TicketFilter {
    let conference = args
        .conference
        .as_deref()
        .map_or_else(|| config.voting.current_conference.clone(), ConferenceId::from);

    let mut filter = TicketFilter::new(conference);
    if let Some(ticket_type) = &args.ticket_type {
        filter = filter.ticket_type(ticket_type.as_str());
    }
    if let Some(fare) = &args.fare {
        filter = filter.fare_code(fare.as_str());
    }
    filter
}
