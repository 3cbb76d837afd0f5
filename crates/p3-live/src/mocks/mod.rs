//! Test doubles for the router's collaborators.

mod clock;

pub use clock::MockClock;
