//! Playback URL and embed markup routing.
//!
//! On-site requests (remote address matching a configured prefix) are sent
//! straight to the internal streaming server. Everyone else gets the public
//! video host, with embed markup fetched over oEmbed and cached per track.

use p3_config::LiveConfig;
use p3_core::{LiveEvent, RequestOrigin, TrackId};

use crate::cache::EmbedCache;
use crate::error::{LiveError, OEmbedError};
use crate::oembed::OEmbedFetcher;

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// What the caller wants to watch: a track, or a scheduled event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamTarget<'a> {
    Track(&'a TrackId),
    Event(&'a LiveEvent),
}

impl<'a> StreamTarget<'a> {
    /// # Errors
    ///
    /// Returns [`LiveError::InvalidArgument`] unless exactly one of `track`
    /// and `event` is given.
    pub fn from_parts(
        track: Option<&'a TrackId>,
        event: Option<&'a LiveEvent>,
    ) -> Result<Self, LiveError> {
        match (track, event) {
            (Some(track), None) => Ok(Self::Track(track)),
            (None, Some(event)) => Ok(Self::Event(event)),
            (Some(_), Some(_)) => Err(LiveError::InvalidArgument(
                "track or event, not both".into(),
            )),
            (None, None) => Err(LiveError::InvalidArgument(
                "one of track or event is required".into(),
            )),
        }
    }

    /// Track whose stream serves this target.
    ///
    /// Keynotes and events spanning several tracks are recorded in
    /// `keynote_track`. An event with no track resolves to `None`.
    #[must_use]
    pub fn resolve(self, keynote_track: &TrackId) -> Option<TrackId> {
        match self {
            Self::Track(track) => Some(track.clone()),
            Self::Event(event) if event.has_tag("keynote") || event.tracks.len() > 1 => {
                Some(keynote_track.clone())
            }
            Self::Event(event) => event.tracks.first().cloned(),
        }
    }
}

/// Which side of the network a request comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    Internal,
    External,
}

/// On-site playback protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playback {
    Rtsp,
    Hls,
    Rtmp,
}

impl Playback {
    /// Case-insensitive user-agent sniffing. Android first, then Apple
    /// handhelds, everything else gets RTMP.
    #[must_use]
    pub fn for_user_agent(user_agent: &str) -> Self {
        let ua = user_agent.to_ascii_lowercase();
        if ua.contains("android") {
            Self::Rtsp
        } else if ["iphone", "ipad", "ipod"].iter().any(|d| ua.contains(d)) {
            Self::Hls
        } else {
            Self::Rtmp
        }
    }

    /// Playback URL for an internal `host:port/path` base.
    #[must_use]
    pub fn url(self, base: &str) -> String {
        match self {
            Self::Rtsp => format!("rtsp://{base}"),
            Self::Hls => format!("http://{base}/playlist.m3u8"),
            Self::Rtmp => format!("rtmp://{base}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

/// Result of an embed lookup.
#[derive(Debug)]
pub enum Embed {
    Markup(String),
    /// No stream is configured for the target.
    Unavailable,
    /// The oEmbed fetch failed. Nothing was cached; a later call retries.
    FetchFailed(OEmbedError),
}

impl Embed {
    /// Collapse to markup, dropping the failure reason.
    #[must_use]
    pub fn into_markup(self) -> Option<String> {
        match self {
            Self::Markup(html) => Some(html),
            Self::Unavailable | Self::FetchFailed(_) => None,
        }
    }

    #[must_use]
    pub fn markup(&self) -> Option<&str> {
        match self {
            Self::Markup(html) => Some(html.as_str()),
            Self::Unavailable | Self::FetchFailed(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Routes playback requests using the live configuration, an oEmbed source,
/// and a shared markup cache.
pub struct LiveRouter<'a, F, C> {
    config: &'a LiveConfig,
    fetcher: F,
    cache: C,
}

impl<'a> LiveRouter<'a, (), ()> {
    /// Router for redirects only. It has no oEmbed source or cache, so
    /// [`LiveRouter::embed_markup`] is unavailable.
    #[must_use]
    pub const fn redirect_only(config: &'a LiveConfig) -> Self {
        Self {
            config,
            fetcher: (),
            cache: (),
        }
    }
}

impl<'a, F: OEmbedFetcher, C: EmbedCache> LiveRouter<'a, F, C> {
    pub const fn new(config: &'a LiveConfig, fetcher: F, cache: C) -> Self {
        Self {
            config,
            fetcher,
            cache,
        }
    }

    pub const fn cache(&self) -> &C {
        &self.cache
    }

    /// Embeddable player markup for a track or event.
    ///
    /// Internal viewers get links to the on-site server. External viewers
    /// get the video host's oEmbed markup, cached per track for the
    /// configured TTL.
    ///
    /// # Errors
    ///
    /// Returns [`LiveError::InvalidArgument`] unless exactly one of `track`
    /// and `event` is given.
    pub async fn embed_markup(
        &self,
        origin: &RequestOrigin,
        track: Option<&TrackId>,
        event: Option<&LiveEvent>,
    ) -> Result<Embed, LiveError> {
        let target = StreamTarget::from_parts(track, event)?;
        let Some(track) = target.resolve(&self.config.keynote_track) else {
            return Ok(Embed::Unavailable);
        };

        match self.classify(origin) {
            Network::Internal => Ok(self
                .internal_base(&track)
                .map_or(Embed::Unavailable, |base| {
                    Embed::Markup(internal_markup(&track, &base))
                })),
            Network::External => Ok(self.external_embed(&track).await),
        }
    }

    async fn external_embed(&self, track: &TrackId) -> Embed {
        let key = format!("{}{}", self.config.cache_key_prefix, track);
        if let Some(html) = self.cache.get(&key) {
            tracing::debug!(%track, "embed cache hit");
            return Embed::Markup(html);
        }

        let Some(watch_url) = self.watch_url(track) else {
            return Embed::Unavailable;
        };

        let html = match self.fetcher.fetch(&watch_url).await {
            Ok(data) => data.into_html(),
            Err(error) => Err(error),
        };
        match html {
            Ok(html) => {
                tracing::debug!(%track, "embed cache fill");
                self.cache
                    .set(&key, html.clone(), self.config.embed_cache_ttl());
                Embed::Markup(html)
            }
            Err(error) => Embed::FetchFailed(error),
        }
    }
}

impl<F, C> LiveRouter<'_, F, C> {
    #[must_use]
    pub fn classify(&self, origin: &RequestOrigin) -> Network {
        if self.config.is_internal_addr(origin.remote_addr()) {
            Network::Internal
        } else {
            Network::External
        }
    }

    /// URL to redirect a viewer to, or `None` if the track has no stream.
    ///
    /// # Errors
    ///
    /// Returns [`LiveError::InvalidArgument`] unless exactly one of `track`
    /// and `event` is given.
    pub fn redirect_url(
        &self,
        origin: &RequestOrigin,
        track: Option<&TrackId>,
        event: Option<&LiveEvent>,
    ) -> Result<Option<String>, LiveError> {
        let target = StreamTarget::from_parts(track, event)?;
        let Some(track) = target.resolve(&self.config.keynote_track) else {
            return Ok(None);
        };

        let url = match self.classify(origin) {
            Network::Internal => self
                .internal_base(&track)
                .map(|base| Playback::for_user_agent(origin.user_agent()).url(&base)),
            Network::External => self.watch_url(&track),
        };
        Ok(url)
    }

    fn internal_base(&self, track: &TrackId) -> Option<String> {
        self.config
            .track(track)
            .map(|streams| format!("{}/{}", self.config.internal_server, streams.internal))
    }

    fn watch_url(&self, track: &TrackId) -> Option<String> {
        self.config
            .track(track)
            .map(|streams| format!("{}{}", self.config.watch_url_base, streams.external))
    }
}

/// Player links for the on-site server, one per protocol.
///
/// Values are interpolated unescaped; `LiveConfig::validate` restricts track
/// ids, stream paths and the server address to markup-safe characters.
fn internal_markup(track: &TrackId, base: &str) -> String {
    let stream = base.rsplit('/').next().unwrap_or(base);
    let links = [
        (Playback::Rtsp, "RTSP", "Linux, Windows, Android"),
        (Playback::Hls, "HLS", "Apple devices"),
        (Playback::Rtmp, "RTMP", "Flash players"),
    ]
    .iter()
    .map(|(playback, label, hint)| {
        format!(
            "  <div class=\"button\"><h5><a href=\"{}\">{label}</a></h5>{hint}</div>\n",
            playback.url(base)
        )
    })
    .collect::<String>();

    format!(
        "<div class=\"live-stream\" data-stream=\"{stream}\">\n{links}  <div id=\"stream-{track}\" class=\"player\"></div>\n</div>\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Mozilla/5.0 (Linux; Android 9; Pixel 3)", Playback::Rtsp)]
    #[case("Mozilla/5.0 (iPhone; CPU iPhone OS 12_3 like Mac OS X)", Playback::Hls)]
    #[case("Mozilla/5.0 (IPAD; CPU OS 12_3)", Playback::Hls)]
    #[case("ipod touch", Playback::Hls)]
    #[case("Mozilla/5.0 (X11; Linux x86_64) Firefox/67.0", Playback::Rtmp)]
    #[case("", Playback::Rtmp)]
    fn user_agent_selects_playback(#[case] ua: &str, #[case] expected: Playback) {
        assert_eq!(Playback::for_user_agent(ua), expected);
    }

    #[test]
    fn android_wins_over_apple_keywords() {
        assert_eq!(
            Playback::for_user_agent("Android emulator pretending to be an iPad"),
            Playback::Rtsp
        );
    }

    #[test]
    fn playback_urls() {
        let base = "live.ep:1935/live/lasagne";
        assert_eq!(Playback::Rtsp.url(base), "rtsp://live.ep:1935/live/lasagne");
        assert_eq!(
            Playback::Hls.url(base),
            "http://live.ep:1935/live/lasagne/playlist.m3u8"
        );
        assert_eq!(Playback::Rtmp.url(base), "rtmp://live.ep:1935/live/lasagne");
    }

    #[test]
    fn target_requires_exactly_one_input() {
        let track = TrackId::from("track1");
        let event = LiveEvent::default();
        assert!(StreamTarget::from_parts(None, None).is_err());
        assert!(StreamTarget::from_parts(Some(&track), Some(&event)).is_err());
        assert_eq!(
            StreamTarget::from_parts(Some(&track), None).unwrap(),
            StreamTarget::Track(&track)
        );
    }

    #[rstest]
    #[case(&["keynote"], &["track3"], Some("track2"))]
    #[case(&[], &["track1", "track3"], Some("track2"))]
    #[case(&["pydata"], &["track3"], Some("track3"))]
    #[case(&[], &[], None)]
    fn event_resolution(
        #[case] tags: &[&str],
        #[case] tracks: &[&str],
        #[case] expected: Option<&str>,
    ) {
        let event = LiveEvent {
            tags: tags.iter().map(ToString::to_string).collect(),
            tracks: tracks.iter().copied().map(TrackId::from).collect(),
        };
        let keynote = TrackId::from("track2");
        assert_eq!(
            StreamTarget::Event(&event).resolve(&keynote),
            expected.map(TrackId::from)
        );
    }

    #[test]
    fn internal_markup_links_every_protocol() {
        let html = internal_markup(&TrackId::from("track2"), "live.ep:1935/live/lasagne");
        assert!(html.contains("rtsp://live.ep:1935/live/lasagne"));
        assert!(html.contains("http://live.ep:1935/live/lasagne/playlist.m3u8"));
        assert!(html.contains("rtmp://live.ep:1935/live/lasagne"));
        assert!(html.contains("id=\"stream-track2\""));
        assert!(html.contains("data-stream=\"lasagne\""));
    }

    #[test]
    fn embed_collapses_to_markup() {
        assert_eq!(
            Embed::Markup("<p/>".into()).into_markup().as_deref(),
            Some("<p/>")
        );
        assert_eq!(Embed::Unavailable.into_markup(), None);
        assert_eq!(Embed::FetchFailed(OEmbedError::MissingHtml).markup(), None);
    }
}
