//! WhatsApp bot polling loop
//!
//! Pulls pending messages from the bridge on an interval and hands each
//! one to its own dispatch task, so a slow command (roster fetch, game
//! timer) never blocks the rest of the queue.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::interval;
use tracing::{debug, error, info};

use megu_core::{Config, Dispatcher, GameService, InboundMessage};

use crate::api::WhatsAppApiClient;
use crate::error::{Result, WhatsAppError};

/// WhatsApp bot: bridge client + dispatcher wiring
pub struct WhatsAppBot {
    api_client: Arc<WhatsAppApiClient>,
    dispatcher: Arc<Dispatcher<WhatsAppApiClient>>,
    phone_number: String,
    poll_interval_secs: u64,
}

impl WhatsAppBot {
    /// Create a new bot from configuration
    pub fn new(config: &Config) -> Result<Self> {
        let api_client = Arc::new(WhatsAppApiClient::new(&config.api_url, &config.phone_number)?);
        let game = Arc::new(GameService::new());
        let started_at = chrono::Utc::now().timestamp() as u64;
        let dispatcher = Arc::new(Dispatcher::new(Arc::clone(&api_client), game, started_at));

        Ok(Self {
            api_client,
            dispatcher,
            phone_number: config.phone_number.clone(),
            poll_interval_secs: config.poll_interval_secs,
        })
    }

    /// Check if the bot can reach the bridge
    pub async fn health_check(&self) -> Result<bool> {
        self.api_client.health_check().await
    }

    /// Run the bot until the shutdown signal fires
    pub async fn run(&self, mut shutdown: tokio::sync::broadcast::Receiver<()>) -> Result<()> {
        if !self.health_check().await? {
            return Err(WhatsAppError::NotAvailable);
        }

        info!(
            "WhatsApp bot running for {} (poll interval: {}s)",
            self.phone_number, self.poll_interval_secs
        );

        let mut poll = interval(Duration::from_secs(self.poll_interval_secs));

        loop {
            tokio::select! {
                _ = shutdown.recv() => {
                    info!("Received shutdown signal");
                    break;
                }
                _ = poll.tick() => {
                    if let Err(e) = self.poll_once().await {
                        error!("Error polling messages: {:?}", e);
                    }
                }
            }
        }

        info!("WhatsApp bot stopped");
        Ok(())
    }

    /// Fetch pending messages and spawn a dispatch task per message
    async fn poll_once(&self) -> Result<usize> {
        let messages = self.api_client.receive_messages().await?;

        let mut dispatched = 0;
        for wire in messages {
            // Never react to our own outbound traffic.
            if wire.from_me {
                debug!("Skipping self-originated message {}", wire.id);
                continue;
            }

            let dispatcher = Arc::clone(&self.dispatcher);
            let msg = InboundMessage::from(wire);
            tokio::spawn(async move {
                dispatcher.dispatch(msg).await;
            });
            dispatched += 1;
        }

        if dispatched > 0 {
            debug!("Dispatched {} messages", dispatched);
        }
        Ok(dispatched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bot_construction() {
        let config = Config {
            api_url: "http://localhost:3000".to_string(),
            phone_number: "+628123456789".to_string(),
            poll_interval_secs: 2,
        };
        let bot = WhatsAppBot::new(&config).unwrap();
        assert_eq!(bot.phone_number, "+628123456789");
        assert_eq!(bot.poll_interval_secs, 2);
    }
}
