//! Talk voting eligibility rules.

use chrono::{DateTime, Utc};
use p3_config::VotingConfig;
use p3_core::{Attendee, ConferenceEdition, ConferenceId, Ticket};

use crate::error::RecordError;
use crate::records::VotingRecords;

/// Whether `user` may cast talk votes.
///
/// Rules are checked in order and the first match decides:
///
/// 1. anonymous users may not vote;
/// 2. superusers may;
/// 3. speakers of `current_conference` may;
/// 4. holders of a ticket assigned to their email, for any edition in
///    `eligible_conferences`, may;
/// 5. purchasers of a settled ticket in an eligible edition may, provided
///    the ticket is not assigned to someone else. Tickets sold before 2017
///    often lack a usable assignment, so this only runs after rule 4 fails;
/// 6. everyone else may not.
///
/// Record lookup failures never propagate: a missing speaker profile fails
/// rule 3, and backend errors are logged and fail the rule they occur in.
pub fn is_voting_allowed<R: VotingRecords + ?Sized>(
    records: &R,
    user: &Attendee,
    current_conference: &ConferenceId,
    eligible_conferences: &[ConferenceId],
) -> bool {
    let Some(email) = user.email() else {
        return false;
    };
    if user.is_superuser() {
        tracing::debug!(email, "voting allowed: superuser");
        return true;
    }

    if is_speaker(records, email, current_conference) {
        tracing::debug!(email, conference = %current_conference, "voting allowed: speaker");
        return true;
    }

    if has_assigned_ticket(records, email, eligible_conferences) {
        tracing::debug!(email, "voting allowed: assigned ticket");
        return true;
    }

    if let Some(conference) = eligible_conferences
        .iter()
        .find(|conference| has_legacy_ticket(records, email, conference))
    {
        tracing::debug!(email, conference = %conference, "voting allowed: legacy purchase");
        return true;
    }

    tracing::debug!(email, "voting not allowed");
    false
}

/// Whether `user` may open the voting page of `conference` at `now`:
/// superusers always, everyone else only while voting is running.
#[must_use]
pub fn is_voting_opened(user: &Attendee, conference: &ConferenceEdition, now: DateTime<Utc>) -> bool {
    user.is_superuser() || conference.voting_open(now)
}

fn is_speaker<R: VotingRecords + ?Sized>(
    records: &R,
    email: &str,
    conference: &ConferenceId,
) -> bool {
    match records.speaker_talk_count(email, conference) {
        Ok(count) => count > 0,
        Err(RecordError::NotFound { .. }) => false,
        Err(error) => {
            tracing::warn!(email, %error, "speaker lookup failed");
            false
        }
    }
}

fn has_assigned_ticket<R: VotingRecords + ?Sized>(
    records: &R,
    email: &str,
    conferences: &[ConferenceId],
) -> bool {
    records
        .assigned_tickets(email, conferences)
        .unwrap_or_else(|error| {
            tracing::warn!(email, %error, "assigned ticket lookup failed");
            Vec::new()
        })
        .iter()
        .any(|ticket| ticket.assigned_to() == Some(email))
}

fn has_legacy_ticket<R: VotingRecords + ?Sized>(
    records: &R,
    email: &str,
    conference: &ConferenceId,
) -> bool {
    records
        .owned_tickets(email, conference)
        .unwrap_or_else(|error| {
            tracing::warn!(email, conference = %conference, %error, "owned ticket lookup failed");
            Vec::new()
        })
        .iter()
        .any(|ticket| is_legacy_eligible(ticket, email))
}

/// Settled (paid or admin-issued) and not assigned to anybody else.
fn is_legacy_eligible(ticket: &Ticket, email: &str) -> bool {
    ticket.order.is_settled()
        && match ticket.assigned_to() {
            None | Some("") => true,
            Some(assignee) => assignee == email,
        }
}

/// Eligibility rules bound to the configured conference set.
#[derive(Debug, Clone)]
pub struct VotingPolicy {
    current_conference: ConferenceId,
    eligible_conferences: Vec<ConferenceId>,
}

impl VotingPolicy {
    #[must_use]
    pub const fn new(current_conference: ConferenceId, eligible_conferences: Vec<ConferenceId>) -> Self {
        Self {
            current_conference,
            eligible_conferences,
        }
    }

    #[must_use]
    pub fn from_config(config: &VotingConfig) -> Self {
        Self::new(
            config.current_conference.clone(),
            config.eligible_conferences.clone(),
        )
    }

    #[must_use]
    pub const fn current_conference(&self) -> &ConferenceId {
        &self.current_conference
    }

    #[must_use]
    pub fn eligible_conferences(&self) -> &[ConferenceId] {
        &self.eligible_conferences
    }

    /// See [`is_voting_allowed`].
    pub fn allows<R: VotingRecords + ?Sized>(&self, records: &R, user: &Attendee) -> bool {
        is_voting_allowed(
            records,
            user,
            &self.current_conference,
            &self.eligible_conferences,
        )
    }
}
