//! Pacing policy for the review loop.
//!
//! The loop stays under the completion API's rate limits with a fixed delay
//! between consecutive calls, and backs off longer once the API actually
//! signals a rate limit. Both delays sit behind the `Pacer` trait so loop
//! tests run without wall-clock waits.

use std::time::Duration;

use async_trait::async_trait;

/// Static gap between consecutive completion calls.
pub const PACE_BETWEEN_CALLS_MS: u64 = 1200;
/// Pause taken after a 429 before moving on to the next prompt.
pub const RATE_LIMIT_COOLDOWN_MS: u64 = 5000;

/// Carried in `AppState` as `Arc<dyn Pacer>`.
#[async_trait]
pub trait Pacer: Send + Sync {
    /// Waits the fixed interval between two completion calls.
    async fn pace(&self);
    /// Waits the longer interval after the API reports a rate limit.
    async fn cooldown(&self);
}

/// Production pacer backed by `tokio::time::sleep`. Respects paused time in
/// tests built with tokio's `test-util`.
pub struct TokioPacer {
    pace: Duration,
    cooldown: Duration,
}

impl TokioPacer {
    pub fn new(pace_ms: u64, cooldown_ms: u64) -> Self {
        Self {
            pace: Duration::from_millis(pace_ms),
            cooldown: Duration::from_millis(cooldown_ms),
        }
    }
}

impl Default for TokioPacer {
    fn default() -> Self {
        Self::new(PACE_BETWEEN_CALLS_MS, RATE_LIMIT_COOLDOWN_MS)
    }
}

#[async_trait]
impl Pacer for TokioPacer {
    async fn pace(&self) {
        tokio::time::sleep(self.pace).await;
    }

    async fn cooldown(&self) {
        tokio::time::sleep(self.cooldown).await;
    }
}
