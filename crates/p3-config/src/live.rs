//! Live-stream routing configuration.

use std::collections::BTreeMap;
use std::time::Duration;

use p3_core::{TrackId, TrackStreams};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_internal_ip_prefixes() -> Vec<String> {
    vec!["2.228.78.".into(), "10.3.3.".into(), "127.0.0.1".into()]
}

fn default_internal_server() -> String {
    "live.ep:1935".to_string()
}

fn default_tracks() -> BTreeMap<TrackId, TrackStreams> {
    [
        ("track1", "WQnU7Qvy-xg", "live/spaghetti"),
        ("track2", "urwOdSH3Tyg", "live/lasagne"),
        ("track3", "tdGKPPlhqAI", "live/ravioli"),
        ("track4", "IeKx5Qy_8lY", "live/tagliatelle"),
        ("track-ita", "JSjXKGom9VI", "live/bigmac"),
        ("training1", "6CG-25uxPdI", "live/pizzamargherita"),
        ("training2", "iy1phHF-mec", "live/pizzanapoli"),
    ]
    .into_iter()
    .map(|(track, external, internal)| (TrackId::from(track), TrackStreams::new(external, internal)))
    .collect()
}

/// Keynotes and multi-track events are all recorded in this track.
fn default_keynote_track() -> TrackId {
    TrackId::from("track2")
}

fn default_watch_url_base() -> String {
    "https://www.youtube.com/watch?v=".to_string()
}

fn default_oembed_endpoint() -> String {
    "https://www.youtube.com/oembed".to_string()
}

const fn default_embed_cache_ttl_secs() -> u64 {
    3600
}

/// Upper bound for `embed_cache_ttl_secs`: one day.
pub const MAX_EMBED_CACHE_TTL_SECS: u64 = 86_400;

/// Track ids, stream paths and the server address end up in player markup
/// attributes and URLs, so they are limited to a plain character set.
fn is_markup_safe(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/' | ':'))
}

fn default_cache_key_prefix() -> String {
    "p3_live_embed_".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LiveConfig {
    /// Remote address prefixes treated as on-site requests.
    #[serde(default = "default_internal_ip_prefixes")]
    pub internal_ip_prefixes: Vec<String>,

    /// On-site streaming server, `host:port`.
    #[serde(default = "default_internal_server")]
    pub internal_server: String,

    /// Track id to stream locations. Figment merges user tables into the
    /// defaults, so configured tracks add to or replace built-in ones.
    #[serde(default = "default_tracks")]
    pub tracks: BTreeMap<TrackId, TrackStreams>,

    #[serde(default = "default_keynote_track")]
    pub keynote_track: TrackId,

    /// Public watch URL; the external video id is appended.
    #[serde(default = "default_watch_url_base")]
    pub watch_url_base: String,

    #[serde(default = "default_oembed_endpoint")]
    pub oembed_endpoint: String,

    #[serde(default = "default_embed_cache_ttl_secs")]
    pub embed_cache_ttl_secs: u64,

    #[serde(default = "default_cache_key_prefix")]
    pub cache_key_prefix: String,
}

impl Default for LiveConfig {
    fn default() -> Self {
        Self {
            internal_ip_prefixes: default_internal_ip_prefixes(),
            internal_server: default_internal_server(),
            tracks: default_tracks(),
            keynote_track: default_keynote_track(),
            watch_url_base: default_watch_url_base(),
            oembed_endpoint: default_oembed_endpoint(),
            embed_cache_ttl_secs: default_embed_cache_ttl_secs(),
            cache_key_prefix: default_cache_key_prefix(),
        }
    }
}

impl LiveConfig {
    #[must_use]
    pub const fn embed_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.embed_cache_ttl_secs)
    }

    #[must_use]
    pub fn track(&self, id: &TrackId) -> Option<&TrackStreams> {
        self.tracks.get(id)
    }

    /// Whether `remote_addr` starts with one of the on-site prefixes.
    #[must_use]
    pub fn is_internal_addr(&self, remote_addr: &str) -> bool {
        self.internal_ip_prefixes
            .iter()
            .any(|prefix| remote_addr.starts_with(prefix.as_str()))
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if the keynote track is not in
    /// the track map, the cache TTL is zero or above
    /// [`MAX_EMBED_CACHE_TTL_SECS`], or a track id, stream path or the
    /// internal server contains characters outside `[A-Za-z0-9._/:-]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.tracks.contains_key(&self.keynote_track) {
            return Err(ConfigError::invalid(
                "live.keynote_track",
                format!("track '{}' is not configured", self.keynote_track),
            ));
        }
        if self.embed_cache_ttl_secs == 0 || self.embed_cache_ttl_secs > MAX_EMBED_CACHE_TTL_SECS {
            return Err(ConfigError::invalid(
                "live.embed_cache_ttl_secs",
                format!("must be between 1 and {MAX_EMBED_CACHE_TTL_SECS}"),
            ));
        }
        if !is_markup_safe(&self.internal_server) {
            return Err(ConfigError::invalid(
                "live.internal_server",
                format!("'{}' contains unsupported characters", self.internal_server),
            ));
        }
        for (id, streams) in &self.tracks {
            if !is_markup_safe(id.as_str()) || !is_markup_safe(&streams.internal) {
                return Err(ConfigError::invalid(
                    "live.tracks",
                    format!("track '{id}' has an unsupported id or stream path"),
                ));
            }
        }
        Ok(())
    }
}
