//! Conference editions, voting windows, and speaker assignments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Conference edition identifier (e.g. `ep2019`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConferenceId(String);

impl ConferenceId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ConferenceId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ConferenceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for ConferenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Half-open community voting period, `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VotingWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl VotingWindow {
    #[must_use]
    pub fn contains(&self, now: DateTime<Utc>) -> bool {
        self.start <= now && now < self.end
    }
}

/// A single edition of the conference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConferenceEdition {
    pub id: ConferenceId,
    pub name: String,
    /// `None` when the edition never ran community voting.
    #[serde(default)]
    pub voting: Option<VotingWindow>,
}

impl ConferenceEdition {
    #[must_use]
    pub fn new(id: impl Into<ConferenceId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            voting: None,
        }
    }

    #[must_use]
    pub fn with_voting(mut self, window: VotingWindow) -> Self {
        self.voting = Some(window);
        self
    }

    /// Whether community talk voting is running at `now`.
    #[must_use]
    pub fn voting_open(&self, now: DateTime<Utc>) -> bool {
        self.voting.is_some_and(|window| window.contains(now))
    }
}

/// Links a speaker to one of their talks in a conference edition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeakerAssignment {
    pub speaker_email: String,
    pub talk: String,
    pub conference: ConferenceId,
}
