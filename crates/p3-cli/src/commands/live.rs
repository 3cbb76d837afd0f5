use anyhow::Context;
use p3_config::P3Config;
use p3_core::{LiveEvent, RequestOrigin, TrackId};
use p3_live::{Embed, LiveRouter, MemoryCache, Network, OEmbedClient};
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::cli::subcommands::LiveArgs;
use crate::output::output;

#[derive(Debug, Serialize)]
struct LiveResponse {
    network: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    markup: Option<String>,
}

struct ParsedArgs {
    origin: RequestOrigin,
    track: Option<TrackId>,
    event: Option<LiveEvent>,
}

fn parse(args: &LiveArgs) -> anyhow::Result<ParsedArgs> {
    let origin = RequestOrigin::new(args.addr.as_str(), args.ua.as_str())?;
    let event = args
        .event
        .as_deref()
        .map(serde_json::from_str::<LiveEvent>)
        .transpose()
        .context("--event is not valid event JSON")?;
    Ok(ParsedArgs {
        origin,
        track: args.track.as_deref().map(TrackId::from),
        event,
    })
}

const fn network_name(network: Network) -> &'static str {
    match network {
        Network::Internal => "internal",
        Network::External => "external",
    }
}

/// Handle `p3 live redirect`.
pub fn redirect(args: &LiveArgs, config: &P3Config, format: OutputFormat) -> anyhow::Result<()> {
    let parsed = parse(args)?;
    let router = LiveRouter::redirect_only(&config.live);

    let url = router.redirect_url(&parsed.origin, parsed.track.as_ref(), parsed.event.as_ref())?;
    if url.is_none() {
        tracing::info!("no stream configured for the requested target");
    }

    output(
        &LiveResponse {
            network: network_name(router.classify(&parsed.origin)),
            url,
            markup: None,
        },
        format,
    )
}

/// Handle `p3 live embed`.
pub async fn embed(args: &LiveArgs, config: &P3Config, format: OutputFormat) -> anyhow::Result<()> {
    let parsed = parse(args)?;
    let router = LiveRouter::new(
        &config.live,
        OEmbedClient::from_config(&config.live)?,
        MemoryCache::new(),
    );

    let embed = router
        .embed_markup(&parsed.origin, parsed.track.as_ref(), parsed.event.as_ref())
        .await?;
    if let Embed::FetchFailed(error) = &embed {
        tracing::warn!(%error, "oEmbed fetch failed; stream unavailable");
    }

    output(
        &LiveResponse {
            network: network_name(router.classify(&parsed.origin)),
            url: None,
            markup: embed.into_markup(),
        },
        format,
    )
}
