use chrono::Duration;
use levelgate_core::Timestamp;

/// Source of "now" for the engine
///
/// Feeds stamp snapshots from it and the risk governor dates trade results
/// with it. Live sessions read wall time; replays drive a clock that only
/// moves when told to.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;

    /// Time elapsed since `earlier`, zero if `earlier` is ahead of this clock
    fn since(&self, earlier: Timestamp) -> Duration {
        (self.now() - earlier).max(Duration::zero())
    }

    /// Identifier for logs
    fn name(&self) -> &str {
        "Clock"
    }
}
