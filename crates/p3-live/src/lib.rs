//! # p3-live
//!
//! Decides where a viewer's live stream comes from.
//!
//! - [`LiveRouter::redirect_url`] picks a playback URL for a track or event.
//! - [`LiveRouter::embed_markup`] returns embeddable player markup, fetched
//!   over oEmbed for public viewers and cached per track.
//!
//! Lookups are best-effort: unknown tracks and failed fetches yield no
//! result. Only a malformed call (both or neither of track and event)
//! returns an error.

mod cache;
mod clock;
mod error;
mod oembed;
mod router;

#[cfg(any(test, feature = "test-helpers"))]
pub mod mocks;

pub use cache::{EmbedCache, MemoryCache};
pub use clock::{Clock, SystemClock};
pub use error::{LiveError, OEmbedError};
pub use oembed::{OEmbed, OEmbedClient, OEmbedFetcher};
pub use router::{Embed, LiveRouter, Network, Playback, StreamTarget};
