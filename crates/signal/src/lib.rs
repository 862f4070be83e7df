//! Levelgate Signal Stages
//!
//! The pure half of the decision engine. Every stage is a function of an
//! immutable input snapshot and its configuration table; nothing here blocks,
//! allocates shared state, or talks to the outside world.
//!
//! ## Architecture
//!
//! ```text
//!  LevelSet + PriceSnapshot
//!            │
//!            ▼
//!   ┌──────────────────┐        ┌──────────────────────┐
//!   │ ProximityScorer  │──────► │ ConfluenceAggregator │
//!   └────────┬─────────┘        └──────────┬───────────┘
//!            │ proximity                    │ confluence
//!            ▼                              ▼
//!   ┌──────────────────────────────────────────────┐
//!   │ CompositeScorer  (+ BiasSignal)              │ ──► ScoredDecision
//!   └──────────────────────┬───────────────────────┘
//!                          ▼
//!   ┌──────────────────────────────────────────────┐
//!   │ OrderFlowValidator (+ OrderFlowSnapshot)     │ ──► ValidatedDecision
//!   └──────────────────────┬───────────────────────┘
//!                          ▼
//!   ┌──────────────────────────────────────────────┐
//!   │ PositionSizer (+ VixRegime)                  │ ──► SizedDecision
//!   └──────────────────────────────────────────────┘
//! ```
//!
//! The risk governor (separate crate) turns a `SizedDecision` into the
//! final `TradingDecision`.

pub mod composite;
pub mod config;
pub mod confluence;
pub mod order_flow;
pub mod proximity;
pub mod sizing;

// Re-export main types
pub use composite::CompositeScorer;
pub use config::{
    BucketWeights, CategoryMultipliers, CompositeConfig, ConfluenceConfig, CriticalBonus, OrderFlowConfig,
    ProximityConfig, SizingConfig, WITHIN_3_TICKS, WITHIN_5_TICKS, WITHIN_10_TICKS,
};
pub use confluence::ConfluenceAggregator;
pub use order_flow::OrderFlowValidator;
pub use proximity::ProximityScorer;
pub use sizing::PositionSizer;
