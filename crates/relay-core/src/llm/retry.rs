//! Retry policy for transient upstream failures

use rand::Rng;
use std::sync::Arc;
use std::time::Duration;

/// Exponential backoff with uniform jitter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,

    /// Delay before the second attempt, doubled for each following one
    pub backoff_base: Duration,

    /// Upper bound (exclusive) of the random jitter added to each delay
    pub max_jitter: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_base: Duration::from_secs(1),
            max_jitter: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    /// Delay without jitter after the given (1-based) failed attempt
    pub fn base_delay(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        self.backoff_base * 2u32.pow(exponent)
    }

    /// Delay after the given failed attempt, with fresh jitter
    pub fn delay(&self, attempt: u32) -> Duration {
        let jitter = if self.max_jitter.is_zero() {
            Duration::ZERO
        } else {
            rand::thread_rng().gen_range(Duration::ZERO..self.max_jitter)
        };
        self.base_delay(attempt) + jitter
    }

    /// Whether another attempt is allowed after `attempt`
    pub fn has_remaining(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }
}

/// Suspends the current call between attempts
pub trait Sleeper: Send + Sync {
    fn sleep(&self, duration: Duration);
}

/// Thread-safe shared sleeper
pub type SharedSleeper = Arc<dyn Sleeper>;

/// Blocks the current thread
///
/// Callers on an async runtime run the client on a blocking-pool thread, so
/// only the request that is backing off waits.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
