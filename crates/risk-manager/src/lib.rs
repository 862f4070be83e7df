//! Levelgate Risk Governor
//!
//! Capital protection for the decision engine. The governor is consulted as
//! the last step of every evaluation and is the single point of truth for
//! whether a decision may leave the engine as actionable.
//!
//! ## State machine
//!
//! ```text
//!             loss > limit | trades > limit | emergency stop
//!   ┌───────┐ ─────────────────────────────────────────────► ┌─────────┐
//!   │ Armed │                                                │ Tripped │
//!   └───────┘ ◄───────────────────────────────────────────── └─────────┘
//!               reset at a day boundary (explicit or timed)
//! ```
//!
//! While tripped every decision is forced Neutral with a zero multiplier.
//! Counters only grow during a trading day and reset exactly once per
//! day boundary. An emergency stop is only cleared by an explicit reset.
//!
//! ## Concurrency
//!
//! All state lives in one [`RiskState`] behind a mutex owned by
//! [`RiskGovernor`]; there is no other shared mutable state in the engine.

pub mod governor;
pub mod parameters;
pub mod state;

// Re-export main types
pub use governor::RiskGovernor;
pub use parameters::RiskLimits;
pub use state::{GovernorState, RiskState, TripEvent, TripReason};
