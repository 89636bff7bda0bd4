//! Command dispatcher
//!
//! Classifies inbound text messages against the bot's command grammar
//! and drives the [`GameService`] and the outbound transport.
//! [`dispatch`](Dispatcher::dispatch) may run from any number of
//! concurrent tasks; the only shared state is the game session, which
//! does its own locking.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use regex::Regex;
use tracing::{debug, error, info, warn};

use crate::game::{GameService, GAME_DURATION_SECS};
use crate::transport::ChatTransport;
use crate::types::{InboundMessage, OutboundMessage};

/// Grace period on top of the round duration before the bot claims
/// victory. Not cancelled by a correct guess; the check re-reads the
/// session state and stays quiet if the round is already gone.
const DEFAULT_WIN_DELAY_SECS: u64 = GAME_DURATION_SECS + 1;

const INTRO_TEXT: &str = "Hi, I'm Megu!\n\nNice to meet you 😊";
const ATTENDANCE_TEXT: &str =
    "*[📅 ATTENDANCE]*\n\nDon't forget to check in today!\n\n^Megu~";
const EVERYONE_TEXT: &str = "*Please read this!*";
const PLAY_TEXT: &str = "*[🎮 GUESSING GAME]*\n\nGuess a number from 1 to 10.\nYou have 20 seconds, starting now!\n\n*Game on*";
const DEFAULT_WIN_TEXT: &str = "Nobody got it, the bot wins this one 😎\n\n*Game over*";

/// Dispatches inbound messages to command handlers
pub struct Dispatcher<T> {
    transport: Arc<T>,
    game: Arc<GameService>,
    /// Unix timestamp of process start; older events are replays
    started_at: u64,
    numeric: Regex,
}

impl<T: ChatTransport + 'static> Dispatcher<T> {
    /// Create a new dispatcher. `started_at` is the process-start unix
    /// timestamp used to reject replayed messages.
    pub fn new(transport: Arc<T>, game: Arc<GameService>, started_at: u64) -> Self {
        Self {
            transport,
            game,
            started_at,
            numeric: Regex::new(r"^[0-9]+$").unwrap(),
        }
    }

    /// Process one inbound message. Failures inside a branch are logged
    /// and swallowed; a bad event never takes the bot down.
    pub async fn dispatch(&self, msg: InboundMessage) {
        if msg.timestamp < self.started_at {
            debug!("Dropping stale message {} from before startup", msg.id);
            return;
        }

        // `!intro`/`!absen` are exact matches, `!everyone`/`!play` fire on
        // containment. Kept asymmetric for compatibility with the grammar
        // users already know.
        if msg.text == "!intro" {
            self.mark_read(&msg).await;
            self.send(OutboundMessage::text(msg.conversation_id(), INTRO_TEXT))
                .await;
        } else if msg.text == "!absen" && msg.is_group() {
            self.mark_read(&msg).await;
            let mentions = self.roster(msg.conversation_id()).await;
            self.send(
                OutboundMessage::text(msg.conversation_id(), ATTENDANCE_TEXT)
                    .with_mentions(mentions),
            )
            .await;
        } else if msg.text.contains("!everyone") && msg.is_group() {
            self.mark_read(&msg).await;
            let mentions = self.roster(msg.conversation_id()).await;
            self.send(
                OutboundMessage::text(msg.conversation_id(), EVERYONE_TEXT)
                    .with_mentions(mentions)
                    .quoting(&msg),
            )
            .await;
        } else if msg.text.contains("!play")
            && msg.is_group()
            && !self.game.validate(msg.timestamp).await
        {
            self.handle_play(&msg).await;
        } else if self.numeric.is_match(&msg.text)
            && msg.is_group()
            && self.game.validate(msg.timestamp).await
        {
            self.handle_guess(&msg).await;
        }
    }

    /// Start a round, announce it, and schedule the win-by-default check
    async fn handle_play(&self, msg: &InboundMessage) {
        self.mark_read(msg).await;

        let round = self.game.start(Utc::now().timestamp() as u64).await;
        info!(
            "Round started in {} (expires at {})",
            msg.conversation_id(),
            round.expires_at
        );

        // Runs whether or not the announcement below goes out.
        let game = Arc::clone(&self.game);
        let transport = Arc::clone(&self.transport);
        let conversation = msg.conversation_id().to_string();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(DEFAULT_WIN_DELAY_SECS)).await;
            if game.number().await.is_some() {
                info!("Nobody guessed the number, claiming victory in {}", conversation);
                let taunt = OutboundMessage::text(&conversation, DEFAULT_WIN_TEXT);
                if let Err(e) = transport.send(&taunt).await {
                    error!("Failed to send game-over message: {:?}", e);
                }
            }
            // Idempotent; harmless when a correct guess already ended it.
            game.end().await;
        });

        let mentions = self.roster(msg.conversation_id()).await;
        self.send(
            OutboundMessage::text(msg.conversation_id(), PLAY_TEXT).with_mentions(mentions),
        )
        .await;
    }

    /// Compare a numeric guess against the active round
    async fn handle_guess(&self, msg: &InboundMessage) {
        self.mark_read(msg).await;

        let guess: u32 = match msg.text.parse() {
            Ok(number) => number,
            Err(e) => {
                // Gated on a digits-only pattern, so this only fires on
                // absurdly long input overflowing u32.
                debug!("Ignoring unparseable guess {:?}: {}", msg.text, e);
                return;
            }
        };

        if self.game.number().await == Some(guess) {
            self.game.end().await;
            info!("{} guessed the number in {}", msg.sender, msg.conversation_id());

            let text = format!(
                "Congratulations @{}, you got it! 🎉\n\n*Game over*",
                display_handle(&msg.sender)
            );
            self.send(
                OutboundMessage::text(msg.conversation_id(), text)
                    .with_mentions(vec![msg.sender.clone()])
                    .quoting(msg),
            )
            .await;
        }
    }

    /// Group roster, empty on failure
    async fn roster(&self, group_id: &str) -> Vec<String> {
        match self.transport.group_members(group_id).await {
            Ok(members) => members,
            Err(e) => {
                error!("Failed to fetch roster for {}: {:?}", group_id, e);
                Vec::new()
            }
        }
    }

    /// Best-effort read receipt for the triggering message
    async fn mark_read(&self, msg: &InboundMessage) {
        if let Err(e) = self.transport.mark_read(msg.conversation_id(), &msg.id).await {
            warn!("Failed to mark message {} read: {:?}", msg.id, e);
        }
    }

    /// Send, logging instead of propagating failures
    async fn send(&self, message: OutboundMessage) {
        if let Err(e) = self.transport.send(&message).await {
            error!(
                "Failed to send message to {}: {:?}",
                message.conversation_id, e
            );
        }
    }
}

/// User-visible part of a participant id, e.g. "628111" from
/// "628111@c.us"
fn display_handle(id: &str) -> &str {
    id.split('@').next().unwrap_or(id)
}
