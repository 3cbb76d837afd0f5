//! Read-only access to ticket and speaker records.
//!
//! The relational store that owns these records lives outside this crate.
//! [`InMemoryRecords`] backs the CLI and tests with a JSON snapshot.

use std::path::Path;

use p3_core::{ConferenceId, SpeakerAssignment, Ticket};
use serde::{Deserialize, Serialize};

use crate::error::RecordError;

/// Queries the eligibility rules need.
pub trait VotingRecords {
    /// Number of talks `email` speaks at in `conference`.
    ///
    /// Returns [`RecordError::NotFound`] when `email` has no speaker profile
    /// at all.
    fn speaker_talk_count(&self, email: &str, conference: &ConferenceId)
    -> Result<usize, RecordError>;

    /// Tickets in any of `conferences` whose assignment names `email`.
    fn assigned_tickets(
        &self,
        email: &str,
        conferences: &[ConferenceId],
    ) -> Result<Vec<Ticket>, RecordError>;

    /// Tickets in `conference` purchased by `email`.
    fn owned_tickets(&self, email: &str, conference: &ConferenceId)
    -> Result<Vec<Ticket>, RecordError>;
}

/// Snapshot of tickets and speaker assignments held in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InMemoryRecords {
    #[serde(default)]
    pub tickets: Vec<Ticket>,
    #[serde(default)]
    pub speakers: Vec<SpeakerAssignment>,
}

impl InMemoryRecords {
    #[must_use]
    pub fn new(tickets: Vec<Ticket>, speakers: Vec<SpeakerAssignment>) -> Self {
        Self { tickets, speakers }
    }

    /// Load a `{ "tickets": [...], "speakers": [...] }` snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Io`] or [`RecordError::Parse`].
    pub fn from_json_file(path: &Path) -> Result<Self, RecordError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

impl VotingRecords for InMemoryRecords {
    fn speaker_talk_count(
        &self,
        email: &str,
        conference: &ConferenceId,
    ) -> Result<usize, RecordError> {
        let mut talks = self
            .speakers
            .iter()
            .filter(|s| s.speaker_email == email)
            .peekable();
        if talks.peek().is_none() {
            return Err(RecordError::not_found("speaker", email));
        }
        Ok(talks.filter(|s| &s.conference == conference).count())
    }

    fn assigned_tickets(
        &self,
        email: &str,
        conferences: &[ConferenceId],
    ) -> Result<Vec<Ticket>, RecordError> {
        Ok(self
            .tickets
            .iter()
            .filter(|t| conferences.contains(&t.conference) && t.assigned_to() == Some(email))
            .cloned()
            .collect())
    }

    fn owned_tickets(
        &self,
        email: &str,
        conference: &ConferenceId,
    ) -> Result<Vec<Ticket>, RecordError> {
        Ok(self
            .tickets
            .iter()
            .filter(|t| &t.conference == conference && t.is_owned_by(email))
            .cloned()
            .collect())
    }
}
