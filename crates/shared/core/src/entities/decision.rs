use crate::entities::market::VixRegime;
use crate::entities::stage::{GovernorVerdict, OrderFlowOutcome};
use crate::values::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Directional call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    Long,
    Short,
    #[default]
    Neutral,
}

impl Direction {
    pub fn is_directional(&self) -> bool {
        !matches!(self, Direction::Neutral)
    }
}

/// Strength tier derived from the composite score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Strength {
    Extreme,
    Strong,
    Moderate,
    Weak,
    #[default]
    NoSignal,
}

/// Final output of one evaluation
///
/// Only produced by [`GovernedDecision::finalize`](crate::GovernedDecision::finalize),
/// so every instance has passed the risk governor. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradingDecision {
    pub(crate) evaluation_id: Uuid,
    pub(crate) evaluated_at: Timestamp,
    pub(crate) direction: Direction,
    pub(crate) strength: Strength,
    pub(crate) confidence: f64,
    pub(crate) proximity_score: f64,
    pub(crate) bias_score: f64,
    pub(crate) confluence_score: f64,
    pub(crate) position_multiplier: f64,
    pub(crate) vix_regime: VixRegime,
    pub(crate) order_flow: OrderFlowOutcome,
    pub(crate) verdict: GovernorVerdict,
    pub(crate) rationale: Vec<String>,
}

impl TradingDecision {
    pub fn evaluation_id(&self) -> Uuid {
        self.evaluation_id
    }

    /// Logical instant of the snapshot this decision was computed from
    pub fn evaluated_at(&self) -> Timestamp {
        self.evaluated_at
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn strength(&self) -> Strength {
        self.strength
    }

    /// Composite score in [0, 1]
    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn proximity_score(&self) -> f64 {
        self.proximity_score
    }

    pub fn bias_score(&self) -> f64 {
        self.bias_score
    }

    pub fn confluence_score(&self) -> f64 {
        self.confluence_score
    }

    /// Advisory size scaling; the execution boundary applies the base size
    pub fn position_multiplier(&self) -> f64 {
        self.position_multiplier
    }

    pub fn vix_regime(&self) -> VixRegime {
        self.vix_regime
    }

    pub fn order_flow(&self) -> &OrderFlowOutcome {
        &self.order_flow
    }

    pub fn verdict(&self) -> &GovernorVerdict {
        &self.verdict
    }

    /// Ordered explanation of how the decision was reached
    pub fn rationale(&self) -> &[String] {
        &self.rationale
    }

    /// May the execution boundary act on this decision?
    pub fn is_actionable(&self) -> bool {
        self.direction.is_directional() && self.position_multiplier > 0.0
    }
}
