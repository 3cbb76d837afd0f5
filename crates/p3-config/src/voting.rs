//! Talk voting configuration.

use p3_core::ConferenceId;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_current_conference() -> ConferenceId {
    ConferenceId::from("ep2019")
}

/// Editions whose ticket holders may vote. Buying a ticket for an earlier
/// edition also grants a vote.
fn default_eligible_conferences() -> Vec<ConferenceId> {
    ["ep2015", "ep2016", "ep2017", "ep2018", "ep2019"]
        .into_iter()
        .map(ConferenceId::from)
        .collect()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VotingConfig {
    /// Edition currently collecting talk votes. Its speakers may always vote.
    #[serde(default = "default_current_conference")]
    pub current_conference: ConferenceId,

    /// Editions whose tickets grant a vote.
    #[serde(default = "default_eligible_conferences")]
    pub eligible_conferences: Vec<ConferenceId>,

    /// Page shown to users who are not allowed to vote. Empty = none.
    #[serde(default)]
    pub disallowed_redirect: String,
}

impl Default for VotingConfig {
    fn default() -> Self {
        Self {
            current_conference: default_current_conference(),
            eligible_conferences: default_eligible_conferences(),
            disallowed_redirect: String::new(),
        }
    }
}

impl VotingConfig {
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for an empty current conference
    /// or an empty eligible set.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.current_conference.as_str().is_empty() {
            return Err(ConfigError::invalid(
                "voting.current_conference",
                "must not be empty",
            ));
        }
        if self.eligible_conferences.is_empty() {
            return Err(ConfigError::invalid(
                "voting.eligible_conferences",
                "at least one conference must be eligible",
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn has_disallowed_redirect(&self) -> bool {
        !self.disallowed_redirect.is_empty()
    }
}
