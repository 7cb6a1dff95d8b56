use thiserror::Error;

/// The custom error type for the crate.
#[derive(Debug, Error)]
pub enum Error {
    /// A validation error (a record violates a model invariant).
    #[error("Validation error: {0}")]
    Validation(String),

    /// A not found error (document does not exist).
    #[error("Not found: {0}")]
    NotFound(String),

    /// An error reported by the remote document store.
    #[error("Store error: {0}")]
    Store(String),

    /// The remote clock round trip failed or produced an unusable value.
    ///
    /// This variant never escapes [`crate::services::clock::RemoteClock`];
    /// it exists so the fallback path has a concrete cause to log.
    #[error("Server clock unavailable: {0}")]
    ClockUnavailable(String),

    /// A document could not be decoded into (or encoded from) a model type.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// A configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// An internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A type alias for `Result<T, Error>` to simplify function signatures.
pub type Result<T> = std::result::Result<T, Error>;
