pub mod config;
pub mod context;
pub mod error;
pub mod models;
pub mod queries;
pub mod services;
pub mod state;
pub mod store;
pub mod validation;

pub use config::Config;
pub use error::{Error, Result};

/// Load configuration from environment variables
pub fn load_config() -> Result<Config> {
    Ok(Config::load()?)
}
