mod decision;
mod level;
mod level_set;
mod market;
mod proximity;
mod stage;

pub use decision::{Direction, Strength, TradingDecision};
pub use level::{LevelCategory, MarketLevel};
pub use level_set::LevelSet;
pub use market::{BiasSignal, OrderFlowSnapshot, Pressure, PriceSnapshot, VixLevel, VixRegime};
pub use proximity::{NearestLevel, ProximityResult};
pub use stage::{
    DecisionDraft, DecisionStage, GovernedDecision, GovernorVerdict, OrderFlowOutcome,
    ScoredDecision, SizedDecision, ValidatedDecision,
};
