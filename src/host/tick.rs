use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Interactive redraw period.
pub const INTERACTIVE_UPDATE_RATE: Duration = Duration::from_millis(1000);

/// Redraw cadence while the face is interactive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickPolicy {
    pub rate: Duration,
}

impl Default for TickPolicy {
    fn default() -> Self {
        Self {
            rate: INTERACTIVE_UPDATE_RATE,
        }
    }
}

impl TickPolicy {
    /// Time until the next tick boundary, given time since the Unix epoch.
    ///
    /// Ticks land on whole multiples of `rate`; exactly on a boundary the wait is a
    /// full period.
    pub fn delay_until_next_tick(&self, since_epoch: Duration) -> Duration {
        let rate_ms = self.rate.as_millis().max(1);
        let now_ms = since_epoch.as_millis();
        let delay_ms = rate_ms - (now_ms % rate_ms);
        Duration::from_millis(u64::try_from(delay_ms).unwrap_or(u64::MAX))
    }

    pub fn delay_from_now(&self) -> Duration {
        let since_epoch = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO);
        self.delay_until_next_tick(since_epoch)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/tick.rs"]
mod tests;
