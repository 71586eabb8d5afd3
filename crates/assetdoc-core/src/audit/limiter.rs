//! Minimum-interval gate shared by audit workers.
//!
//! Every request start goes through [`IntervalLimiter::acquire`]; consecutive grants
//! are at least `interval` apart no matter how many workers are waiting.

use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

#[derive(Debug)]
pub struct IntervalLimiter {
    interval: Duration,
    next: Mutex<Option<Instant>>,
}

impl IntervalLimiter {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next: Mutex::new(None),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Wait until the next start slot. The lock is held while sleeping so waiters are
    /// granted one at a time, in arrival order.
    pub async fn acquire(&self) {
        let mut next = self.next.lock().await;
        if let Some(at) = *next {
            if at > Instant::now() {
                tokio::time::sleep_until(at).await;
            }
        }
        *next = Some(Instant::now() + self.interval);
    }
}
