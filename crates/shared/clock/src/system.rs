//! Wall-clock time for live evaluation.

use chrono::Utc;
use levelgate_core::Timestamp;
use levelgate_ports::Clock;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    /// Handle for components that hold an `Arc<dyn Clock>`
    pub fn shared() -> Arc<dyn Clock> {
        Arc::new(SystemClock)
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now()
    }

    fn name(&self) -> &str {
        "SystemClock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracks_wall_time() {
        let clock = SystemClock::shared();
        let before = Utc::now();
        let now = clock.now();

        assert!(now >= before);
        assert!(now <= Utc::now());
        assert_eq!(clock.name(), "SystemClock");
    }
}
