//! Levelgate Clock Infrastructure
//!
//! Time sources behind the [`Clock`] port:
//!
//! - [`SystemClock`]: wall-clock time for live evaluation
//! - [`ReplayClock`]: frozen time that only moves when told to, for replays
//!   and deterministic day-boundary tests
//!
//! ## Usage
//!
//! ```ignore
//! use levelgate_clock::{Clock, ReplayClock};
//! use chrono::Duration;
//!
//! let clock = ReplayClock::starting_at(session_open);
//! clock.advance(Duration::seconds(1));  // next tick
//! clock.advance(Duration::days(1));     // roll the trading day
//! ```

mod replay;
mod system;

pub use replay::ReplayClock;
pub use system::SystemClock;

// Re-export the Clock trait for convenience
pub use levelgate_ports::Clock;
