//! # p3-voting
//!
//! Decides who may take part in community talk voting.
//!
//! The rules read ticket and speaker data through the [`VotingRecords`]
//! trait and never write. Whether voting is currently running is decided
//! separately by [`is_voting_opened`].

mod eligibility;
mod error;
mod records;

pub use eligibility::{VotingPolicy, is_voting_allowed, is_voting_opened};
pub use error::RecordError;
pub use records::{InMemoryRecords, VotingRecords};
