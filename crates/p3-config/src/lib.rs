//! # p3-config
//!
//! Layered configuration loading for the p3 policy workspace using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`P3_*` prefix, `__` as separator)
//! 2. Project-level `.p3/config.toml`
//! 3. User-level `~/.config/p3/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `P3_LIVE__INTERNAL_SERVER` -> `live.internal_server`,
//! `P3_VOTING__CURRENT_CONFERENCE` -> `voting.current_conference`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use p3_config::P3Config;
//!
//! let config = P3Config::load_with_dotenv().expect("config");
//! println!("voting for {}", config.voting.current_conference);
//! ```

mod error;
mod general;
mod live;
mod voting;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use live::{LiveConfig, MAX_EMBED_CACHE_TTL_SECS};
pub use voting::VotingConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Immutable settings, built once at startup and passed by reference.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct P3Config {
    #[serde(default)]
    pub voting: VotingConfig,
    #[serde(default)]
    pub live: LiveConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl P3Config {
    /// Load and validate configuration from TOML files and environment
    /// variables.
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if extraction fails or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv();
        Self::load()
    }

    /// Extract and validate from an arbitrary provider chain.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if extraction fails or a value is invalid.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on
    /// top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".p3/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("P3_").split("__"))
    }

    /// # Errors
    ///
    /// Returns the first [`ConfigError::InvalidValue`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.voting.validate()?;
        self.live.validate()
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("p3").join("config.toml"))
    }

    /// Loads `.env` from the current directory or its nearest ancestor.
    /// A missing file is ignored.
    fn load_dotenv() {
        let _ = dotenvy::dotenv();
    }
}
