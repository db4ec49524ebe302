//! Per-provider cooldown clock.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use mercato_types::ConnectorKey;
use tokio::time::Instant;

/// Tracks the last attempt per provider family and enforces a minimum gap
/// between attempts.
///
/// One limiter is shared by every symbol routed to a family, so two requests
/// for different symbols still count against the same clock.
#[derive(Default)]
pub struct CooldownLimiter {
    last_attempt: Mutex<HashMap<ConnectorKey, Instant>>,
}

impl CooldownLimiter {
    /// Limiter with no recorded attempts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an attempt against `key` is permitted now. Pure check.
    ///
    /// True when no attempt was recorded or the last one is at least
    /// `cooldown` old.
    pub fn allow(&self, key: ConnectorKey, cooldown: Duration) -> bool {
        self.remaining(key, cooldown).is_zero()
    }

    /// Stamp the clock for `key`.
    pub fn record(&self, key: ConnectorKey) {
        let mut map = self.last_attempt.lock().unwrap_or_else(PoisonError::into_inner);
        map.insert(key, Instant::now());
    }

    /// Time left until `key` may be attempted again; zero when allowed.
    pub fn remaining(&self, key: ConnectorKey, cooldown: Duration) -> Duration {
        let map = self.last_attempt.lock().unwrap_or_else(PoisonError::into_inner);
        map.get(&key).map_or(Duration::ZERO, |last| {
            cooldown.saturating_sub(last.elapsed())
        })
    }

    /// Check and stamp under one lock.
    ///
    /// # Errors
    /// Returns the remaining cooldown when the attempt is not permitted; the
    /// clock is left untouched in that case.
    pub fn try_acquire(&self, key: ConnectorKey, cooldown: Duration) -> Result<(), Duration> {
        let mut map = self.last_attempt.lock().unwrap_or_else(PoisonError::into_inner);
        let now = Instant::now();
        if let Some(last) = map.get(&key) {
            let left = cooldown.saturating_sub(now.duration_since(*last));
            if !left.is_zero() {
                return Err(left);
            }
        }
        map.insert(key, now);
        Ok(())
    }
}
