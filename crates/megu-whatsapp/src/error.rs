//! Error types for megu-whatsapp

use thiserror::Error;

/// megu-whatsapp error type
#[derive(Error, Debug)]
pub enum WhatsAppError {
    #[error("WhatsApp bridge API error: {0}")]
    Api(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("WhatsApp bridge not available")]
    NotAvailable,
}

/// Result type alias for megu-whatsapp
pub type Result<T> = std::result::Result<T, WhatsAppError>;

impl From<WhatsAppError> for megu_core::Error {
    fn from(err: WhatsAppError) -> Self {
        megu_core::Error::Transport(err.to_string())
    }
}
