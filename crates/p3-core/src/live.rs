//! Live-stream tracks, scheduled events, and request origins.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::CoreError;

/// Schedule track identifier (e.g. `track1`, `training2`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(String);

impl TrackId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TrackId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for TrackId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where a track's stream can be played.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackStreams {
    /// Public video-host id.
    pub external: String,
    /// Path on the on-site streaming server, e.g. `live/spaghetti`.
    pub internal: String,
}

impl TrackStreams {
    #[must_use]
    pub fn new(external: impl Into<String>, internal: impl Into<String>) -> Self {
        Self {
            external: external.into(),
            internal: internal.into(),
        }
    }
}

/// A scheduled event, as much of it as stream routing needs.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LiveEvent {
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub tracks: Vec<TrackId>,
}

impl LiveEvent {
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Network origin of a playback request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestOrigin {
    remote_addr: String,
    user_agent: String,
}

impl RequestOrigin {
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if `remote_addr` is blank.
    pub fn new(
        remote_addr: impl Into<String>,
        user_agent: impl Into<String>,
    ) -> Result<Self, CoreError> {
        let remote_addr = remote_addr.into().trim().to_string();
        if remote_addr.is_empty() {
            return Err(CoreError::Validation("request remote address is empty".into()));
        }
        Ok(Self {
            remote_addr,
            user_agent: user_agent.into(),
        })
    }

    #[must_use]
    pub fn remote_addr(&self) -> &str {
        &self.remote_addr
    }

    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}
