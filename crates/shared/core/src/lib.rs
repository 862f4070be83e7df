//! Levelgate Core Domain
//!
//! Pure domain types for the levelgate trade-decision engine.
//! This crate contains no async, no I/O, and is 100% unit testable.
//!
//! A decision moves through explicit stages before it can leave the engine:
//!
//! ```text
//! Scored ──► Validated ──► Sized ──► Governed ──► Final (TradingDecision)
//! ```
//!
//! Each stage type can only be built from the previous one, so a
//! `TradingDecision` always carries the verdict of the risk governor.

pub mod entities;
pub mod error;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{
    // Decision lifecycle
    DecisionDraft,
    DecisionStage,
    Direction,
    GovernedDecision,
    GovernorVerdict,
    // Market structure
    LevelCategory,
    LevelSet,
    MarketLevel,
    NearestLevel,
    OrderFlowOutcome,
    ProximityResult,
    ScoredDecision,
    SizedDecision,
    Strength,
    TradingDecision,
    ValidatedDecision,
    // Market inputs
    BiasSignal,
    OrderFlowSnapshot,
    Pressure,
    PriceSnapshot,
    VixLevel,
    VixRegime,
};
pub use error::{DomainError, DomainResult};
pub use values::{Price, TickDistance, Timestamp};
