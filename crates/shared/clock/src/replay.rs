use chrono::{Duration, Utc};
use levelgate_core::Timestamp;
use levelgate_ports::Clock;
use std::sync::{Arc, RwLock};

/// Manually driven clock
///
/// Time is fixed until [`advance`](ReplayClock::advance) or
/// [`set_time`](ReplayClock::set_time) moves it.
pub struct ReplayClock {
    current_time: RwLock<Timestamp>,
}

impl ReplayClock {
    /// Create a replay clock frozen at the current wall time
    pub fn new() -> Arc<Self> {
        Self::starting_at(Utc::now())
    }

    /// Create a replay clock frozen at `start`
    pub fn starting_at(start: Timestamp) -> Arc<Self> {
        Arc::new(Self {
            current_time: RwLock::new(start),
        })
    }

    /// Move time forward by `duration`
    pub fn advance(&self, duration: Duration) {
        let mut current = self
            .current_time
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *current += duration;
    }

    /// Explicitly set the time
    ///
    /// Warning: moving backwards breaks staleness arithmetic downstream.
    pub fn set_time(&self, time: Timestamp) {
        let mut current = self
            .current_time
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *current = time;
    }
}

impl Clock for ReplayClock {
    fn now(&self) -> Timestamp {
        *self
            .current_time
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn name(&self) -> &str {
        "ReplayClock"
    }
}
