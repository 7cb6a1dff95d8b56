use serde::{Deserialize, Serialize};

use std::fmt;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    pub store: StoreConfig,
    pub clock: ClockConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Collection holding the published space documents.
    pub spaces_collection: String,
    /// Collection holding bookkeeping documents (clock-sync marker etc.).
    pub meta_collection: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClockConfig {
    /// Document id of the clock-sync marker inside the meta collection.
    pub sync_document: String,
    /// Upper bound on the write+read round trip before falling back to the
    /// local clock.
    pub sync_timeout_ms: u64,
}

impl Config {
    /// Load configuration from environment variables, with defaults.
    pub fn load() -> Result<Self, config::ConfigError> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::Config::try_from(&Self::default())?)
            // Override with environment variables using `DESKHIVE__` prefix and `__` separator
            // e.g., DESKHIVE__STORE__SPACES_COLLECTION="spaces_staging"
            .add_source(
                config::Environment::with_prefix("DESKHIVE")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            spaces_collection: "spaces".to_string(),
            meta_collection: "meta".to_string(),
        }
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            sync_document: "clock-sync".to_string(),
            sync_timeout_ms: 3000,
        }
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Use serde to serialize to pretty JSON
        match serde_json::to_string_pretty(&self) {
            Ok(json) => write!(f, "{}", json),
            Err(_) => write!(f, "Error serializing config"),
        }
    }
}
