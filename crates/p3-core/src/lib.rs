//! # p3-core
//!
//! Core conference types and error types for the p3 policy workspace.
//!
//! This crate provides the read-only views the policy crates decide over:
//! - Attendee identity and authentication state
//! - Conference editions and their voting windows
//! - Tickets, orders, fares, and the ticket filter used by admin tooling
//! - Speaker assignments
//! - Live-stream tracks, scheduled events, and request origins
//! - Cross-cutting error types

pub mod attendee;
pub mod conference;
pub mod errors;
pub mod live;
pub mod tickets;

pub use attendee::Attendee;
pub use conference::{ConferenceEdition, ConferenceId, SpeakerAssignment, VotingWindow};
pub use errors::CoreError;
pub use live::{LiveEvent, RequestOrigin, TrackId, TrackStreams};
pub use tickets::{Fare, Order, PaymentMethod, Ticket, TicketAssignment, TicketFilter};
