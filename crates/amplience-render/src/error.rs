//! Error types for amplience-render

/// Result type for amplience-render operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Resolution error from amplience-config
    #[error(transparent)]
    Config(#[from] amplience_config::Error),

    #[error("Invalid provider version '{version}': {reason}")]
    InvalidProviderVersion { version: String, reason: String },
}
