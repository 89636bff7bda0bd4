//! megu-whatsapp: WhatsApp integration for the megu bot
//!
//! Talks to a WhatsApp REST bridge over HTTP. The bridge owns the wire
//! protocol, QR login and session persistence; this crate is only the
//! polling loop plus a thin client implementing the core's
//! `ChatTransport` trait.

pub mod api;
pub mod bot;
pub mod error;
pub mod types;

pub use api::WhatsAppApiClient;
pub use bot::WhatsAppBot;
pub use error::{Result, WhatsAppError};
