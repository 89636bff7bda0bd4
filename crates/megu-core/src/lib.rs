//! megu-core: platform-independent core of the megu group bot
//!
//! Owns the guessing-game session state machine and the command
//! dispatcher. Everything platform-specific (actually delivering and
//! receiving WhatsApp messages) lives behind the [`ChatTransport`]
//! trait, implemented by megu-whatsapp.

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod game;
pub mod transport;
pub mod types;

pub use config::Config;
pub use dispatcher::Dispatcher;
pub use error::{Error, Result};
pub use game::{GameRound, GameService, GAME_DURATION_SECS};
pub use transport::ChatTransport;
pub use types::{InboundMessage, OutboundMessage, Quote};
