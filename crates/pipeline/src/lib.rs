//! Levelgate Decision Pipeline
//!
//! Turns one [`MarketSnapshot`] into one risk-gated `TradingDecision`.
//!
//! - **Snapshot**: price, levels, bias, order flow and VIX captured at one
//!   instant and validated before any stage runs
//! - **Config**: every scoring table plus risk limits and feed staleness,
//!   resolved once into an [`EngineConfig`]
//! - **Stats**: lock-free counters per pipeline
//!
//! A failed evaluation means "no decision this cycle" and is reported as a
//! typed `EngineError`, never as a default Neutral.

pub mod config;
pub mod pipeline;
pub mod snapshot;
pub mod stats;

// Re-export main types
pub use config::{EngineConfig, StalenessConfig};
pub use pipeline::DecisionPipeline;
pub use snapshot::{MarketSnapshot, MarketSnapshotBuilder};
pub use stats::{PipelineStats, StatsSnapshot};
