//! Self-imposed rate limiting.
//!
//! Every provider call waits a jittered delay first, and the batch
//! coordinator waits between chunks. Cache hits never wait.

use std::time::Duration;

use locus_core::AppConfig;
use rand::Rng;

pub const DEFAULT_CALL_DELAY_MIN: Duration = Duration::from_millis(1_000);
pub const DEFAULT_CALL_DELAY_MAX: Duration = Duration::from_millis(1_500);
pub const DEFAULT_CHUNK_DELAY: Duration = Duration::from_millis(2_000);

/// Delays applied around provider traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    pub call_delay_min: Duration,
    pub call_delay_max: Duration,
    pub chunk_delay: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            call_delay_min: DEFAULT_CALL_DELAY_MIN,
            call_delay_max: DEFAULT_CALL_DELAY_MAX,
            chunk_delay: DEFAULT_CHUNK_DELAY,
        }
    }
}

impl From<&AppConfig> for Pacing {
    fn from(config: &AppConfig) -> Self {
        let (call_delay_min, call_delay_max) = config.call_delay();
        Self { call_delay_min, call_delay_max, chunk_delay: config.chunk_delay() }
    }
}

impl Pacing {
    /// No delays at all.
    pub fn none() -> Self {
        Self { call_delay_min: Duration::ZERO, call_delay_max: Duration::ZERO, chunk_delay: Duration::ZERO }
    }

    /// Pick the pause for the next provider call, uniformly in `[min, max]`.
    pub fn next_call_delay(&self) -> Duration {
        let min = self.call_delay_min.as_millis() as u64;
        let max = self.call_delay_max.as_millis() as u64;
        if max <= min {
            return self.call_delay_min;
        }
        Duration::from_millis(rand::thread_rng().gen_range(min..=max))
    }

    pub async fn before_call(&self) {
        sleep_unless_zero(self.next_call_delay()).await;
    }

    pub async fn between_chunks(&self) {
        sleep_unless_zero(self.chunk_delay).await;
    }
}

async fn sleep_unless_zero(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
