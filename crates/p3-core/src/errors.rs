//! Cross-cutting error types for p3.
//!
//! Domain-specific errors (`ConfigError`, `RecordError`, `LiveError`) live in
//! their respective crates. The CLI converges everything on `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any p3 crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Input failed validation at construction time.
    #[error("Validation error: {0}")]
    Validation(String),
}
