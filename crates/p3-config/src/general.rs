//! General site configuration.

use serde::{Deserialize, Serialize};

fn default_conference_name() -> String {
    "EuroPython 2019".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Human-readable name of the running edition.
    #[serde(default = "default_conference_name")]
    pub conference_name: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            conference_name: default_conference_name(),
        }
    }
}
