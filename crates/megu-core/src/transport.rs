//! Transport seam between the core and a messaging platform

use async_trait::async_trait;

use crate::error::Result;
use crate::types::OutboundMessage;

/// Outbound capabilities the dispatcher needs from a messaging platform.
///
/// Implementations must be cheap to share behind an `Arc` and safe to
/// call from concurrently running dispatch tasks. The core never retries
/// a failed call; callers log the error and move on.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Send a text message, with optional mentions and quote
    async fn send(&self, message: &OutboundMessage) -> Result<()>;

    /// Mark a message as read. Best-effort.
    async fn mark_read(&self, conversation_id: &str, message_id: &str) -> Result<()>;

    /// Fetch the current member list of a group
    async fn group_members(&self, group_id: &str) -> Result<Vec<String>>;
}
