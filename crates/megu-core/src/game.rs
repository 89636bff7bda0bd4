//! Guessing-game session state
//!
//! At most one round is active at a time, process-wide. The target
//! number and the expiry belong together, so they live in a single
//! `RwLock<Option<GameRound>>` and are always swapped as a whole:
//! concurrent readers can never observe a number from one round paired
//! with the expiry of another.

use rand::Rng;
use tokio::sync::RwLock;

/// Fixed round duration in seconds. Set once at start, never renewed.
pub const GAME_DURATION_SECS: u64 = 20;

/// Immutable snapshot of an active round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameRound {
    /// Target number, 1..=10
    pub number: u32,
    /// Unix timestamp after which guesses are rejected
    pub expires_at: u64,
}

/// Owns the single active round.
///
/// All operations take `&self` and are safe for concurrent invocation:
/// [`start`](Self::start) and [`end`](Self::end) are the only writers,
/// [`validate`](Self::validate), [`number`](Self::number) and
/// [`round`](Self::round) are concurrent readers.
#[derive(Debug, Default)]
pub struct GameService {
    round: RwLock<Option<GameRound>>,
}

impl GameService {
    /// Create a new service with no active round
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new round: pick a random target in 1..=10 and set the
    /// expiry to `now + GAME_DURATION_SECS`. Any previously active round
    /// is discarded. Returns the round that was created.
    pub async fn start(&self, now: u64) -> GameRound {
        let round = GameRound {
            number: rand::thread_rng().gen_range(1..=10),
            expires_at: now + GAME_DURATION_SECS,
        };
        *self.round.write().await = Some(round);
        round
    }

    /// Whether a round is active and still accepting guesses at
    /// `timestamp`. The deadline itself is inclusive.
    pub async fn validate(&self, timestamp: u64) -> bool {
        matches!(*self.round.read().await, Some(round) if timestamp <= round.expires_at)
    }

    /// Current target number, `None` when no round is active
    pub async fn number(&self) -> Option<u32> {
        (*self.round.read().await).map(|round| round.number)
    }

    /// Consistent snapshot of the active round
    pub async fn round(&self) -> Option<GameRound> {
        *self.round.read().await
    }

    /// End the active round, if any. Idempotent.
    pub async fn end(&self) {
        *self.round.write().await = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_start_sets_number_and_expiry() {
        let game = GameService::new();
        let round = game.start(1_000).await;
        assert!((1..=10).contains(&round.number));
        assert_eq!(round.expires_at, 1_000 + GAME_DURATION_SECS);
        assert_eq!(game.number().await, Some(round.number));
        assert_eq!(game.round().await, Some(round));
    }

    #[tokio::test]
    async fn test_validate_is_inclusive_of_the_deadline() {
        let game = GameService::new();
        let round = game.start(0).await;
        assert!(game.validate(0).await);
        assert!(game.validate(19).await);
        assert!(game.validate(round.expires_at).await);
        assert!(!game.validate(round.expires_at + 1).await);
    }

    #[tokio::test]
    async fn test_validate_is_false_without_a_round() {
        let game = GameService::new();
        assert!(!game.validate(0).await);
        assert_eq!(game.number().await, None);
        assert_eq!(game.round().await, None);
    }

    #[tokio::test]
    async fn test_number_stays_in_range() {
        let game = GameService::new();
        for _ in 0..100 {
            let round = game.start(0).await;
            assert!((1..=10).contains(&round.number));
        }
    }

    #[tokio::test]
    async fn test_end_is_idempotent() {
        let game = GameService::new();
        game.start(50).await;
        game.end().await;
        let after_once = game.round().await;
        game.end().await;
        assert_eq!(game.round().await, after_once);
        assert_eq!(game.round().await, None);
        assert!(!game.validate(0).await);
    }

    #[tokio::test]
    async fn test_restart_overwrites_the_active_round() {
        let game = GameService::new();
        game.start(100).await;
        let second = game.start(500).await;
        assert_eq!(game.round().await, Some(second));
        assert_eq!(second.expires_at, 500 + GAME_DURATION_SECS);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_readers_never_see_a_torn_round() {
        let game = Arc::new(GameService::new());
        let mut handles = Vec::new();

        // Two writers start rounds from disjoint timestamp ranges, one of
        // them also ends rounds. Every expiry a reader observes must map
        // back to a timestamp some writer actually used.
        for base in [1_000u64, 2_000] {
            let game = Arc::clone(&game);
            handles.push(tokio::spawn(async move {
                for i in 0..200 {
                    game.start(base + i).await;
                    if base == 1_000 && i % 3 == 0 {
                        game.end().await;
                    }
                }
            }));
        }

        for _ in 0..4 {
            let game = Arc::clone(&game);
            handles.push(tokio::spawn(async move {
                for _ in 0..400 {
                    if let Some(round) = game.round().await {
                        assert!((1..=10).contains(&round.number));
                        let started = round.expires_at - GAME_DURATION_SECS;
                        assert!(
                            (1_000..1_200).contains(&started)
                                || (2_000..2_200).contains(&started),
                            "expiry {} does not belong to any start call",
                            round.expires_at
                        );
                    }
                }
            }));
        }

        for handle in handles {
            handle.await.unwrap();
        }

        // Final state is exactly one consistent pair, or no round at all.
        if let Some(round) = game.round().await {
            let started = round.expires_at - GAME_DURATION_SECS;
            assert!((1_000..1_200).contains(&started) || (2_000..2_200).contains(&started));
        }
    }
}
