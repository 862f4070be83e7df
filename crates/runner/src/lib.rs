//! Levelgate Runner - Replay Harness
//!
//! Drives the decision pipeline end to end without live feeds:
//!
//! - **Feed**: seeded synthetic snapshots around a fixed level map
//! - **Session**: async loop evaluating each snapshot through one pipeline
//! - **Sink**: in-memory execution boundary that only accepts actionable
//!   decisions
//!
//! ## Architecture
//!
//! ```text
//!   ┌───────────────────────┐   mpsc   ┌───────────────────────┐
//!   │ SnapshotFeedSimulator │ ───────► │   EvaluationSession   │
//!   │     (ReplayClock)     │          │   DecisionPipeline    │
//!   └───────────────────────┘          │   └─► RiskGovernor    │
//!                                      └───────────┬───────────┘
//!                                                  │ actionable only
//!                                                  ▼
//!                                      ┌───────────────────────┐
//!                                      │     RecordingSink     │
//!                                      └───────────────────────┘
//! ```

pub mod feed;
pub mod session;
pub mod sink;

// Re-export main types
pub use feed::{SnapshotFeedConfig, SnapshotFeedSimulator};
pub use session::{EvaluationSession, SessionResults};
pub use sink::RecordingSink;
