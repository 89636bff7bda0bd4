//! Error types for megu-core

use thiserror::Error;

/// Main error type for megu-core
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for megu-core
pub type Result<T> = std::result::Result<T, Error>;
