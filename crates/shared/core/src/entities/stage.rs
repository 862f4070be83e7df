//! Decision lifecycle
//!
//! `Scored → Validated → Sized → Governed → Final`. Each stage is built from
//! the previous one and applies its own demotion rule, so the rules can be
//! tested one stage at a time.

use crate::entities::decision::{Direction, Strength, TradingDecision};
use crate::entities::market::VixRegime;
use crate::entities::proximity::ProximityResult;
use crate::values::Timestamp;
use serde::Serialize;
use uuid::Uuid;

/// Where a decision currently sits in the lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DecisionStage {
    Scored,
    Validated,
    Sized,
    Governed,
    Final,
}

/// Fields shared by every stage
#[derive(Debug, Clone, Serialize)]
pub struct DecisionDraft {
    pub evaluation_id: Uuid,
    pub evaluated_at: Timestamp,
    pub direction: Direction,
    pub strength: Strength,
    /// Composite score
    pub confidence: f64,
    pub proximity: ProximityResult,
    pub bias_score: f64,
    pub confluence_score: f64,
    pub rationale: Vec<String>,
}

impl DecisionDraft {
    fn note(&mut self, line: impl Into<String>) {
        self.rationale.push(line.into());
    }
}

/// Result of the order-flow check
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum OrderFlowOutcome {
    /// Neutral decisions pass through unchecked
    NotRequired,
    Confirmed,
    /// Direction was demoted; holds the failed checks
    Rejected(Vec<String>),
}

/// Risk governor verdict
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GovernorVerdict {
    Allowed,
    Vetoed { reason: String },
}

impl GovernorVerdict {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GovernorVerdict::Allowed)
    }
}

/// Output of composite scoring
#[derive(Debug, Clone)]
pub struct ScoredDecision {
    draft: DecisionDraft,
}

impl ScoredDecision {
    pub fn new(draft: DecisionDraft) -> Self {
        Self { draft }
    }

    pub fn draft(&self) -> &DecisionDraft {
        &self.draft
    }

    pub fn direction(&self) -> Direction {
        self.draft.direction
    }

    pub fn stage(&self) -> DecisionStage {
        DecisionStage::Scored
    }
}

/// Decision after the order-flow check
#[derive(Debug, Clone)]
pub struct ValidatedDecision {
    draft: DecisionDraft,
    order_flow: OrderFlowOutcome,
}

impl ValidatedDecision {
    /// Neutral decisions are trivially valid
    pub fn pass_through(scored: ScoredDecision) -> Self {
        Self {
            draft: scored.draft,
            order_flow: OrderFlowOutcome::NotRequired,
        }
    }

    pub fn confirmed(scored: ScoredDecision) -> Self {
        let mut draft = scored.draft;
        draft.note(format!("Order flow confirms {:?}", draft.direction));
        Self {
            draft,
            order_flow: OrderFlowOutcome::Confirmed,
        }
    }

    /// Demote to Neutral, recording every failed check
    pub fn demoted(scored: ScoredDecision, failed_checks: Vec<String>) -> Self {
        let mut draft = scored.draft;
        draft.note(format!(
            "Order flow rejects {:?}: {} -> demoted to Neutral",
            draft.direction,
            failed_checks.join(", ")
        ));
        draft.direction = Direction::Neutral;
        Self {
            draft,
            order_flow: OrderFlowOutcome::Rejected(failed_checks),
        }
    }

    pub fn draft(&self) -> &DecisionDraft {
        &self.draft
    }

    pub fn direction(&self) -> Direction {
        self.draft.direction
    }

    pub fn order_flow(&self) -> &OrderFlowOutcome {
        &self.order_flow
    }

    pub fn stage(&self) -> DecisionStage {
        DecisionStage::Validated
    }
}

/// Decision with an advisory position multiplier attached
#[derive(Debug, Clone)]
pub struct SizedDecision {
    draft: DecisionDraft,
    order_flow: OrderFlowOutcome,
    position_multiplier: f64,
    vix_regime: VixRegime,
}

impl SizedDecision {
    /// Neutral decisions and non-positive multipliers always size to zero
    pub fn new(validated: ValidatedDecision, position_multiplier: f64, vix_regime: VixRegime) -> Self {
        let ValidatedDecision { mut draft, order_flow } = validated;
        let position_multiplier =
            if draft.direction.is_directional() && position_multiplier.is_finite() {
                position_multiplier.max(0.0)
            } else {
                0.0
            };
        draft.note(format!(
            "Position multiplier {:.2} ({:?} VIX)",
            position_multiplier, vix_regime
        ));
        Self {
            draft,
            order_flow,
            position_multiplier,
            vix_regime,
        }
    }

    /// Attach an extra rationale line
    pub fn with_note(mut self, line: impl Into<String>) -> Self {
        self.draft.note(line);
        self
    }

    pub fn draft(&self) -> &DecisionDraft {
        &self.draft
    }

    pub fn direction(&self) -> Direction {
        self.draft.direction
    }

    pub fn position_multiplier(&self) -> f64 {
        self.position_multiplier
    }

    pub fn vix_regime(&self) -> VixRegime {
        self.vix_regime
    }

    /// Would this decision trade if allowed?
    pub fn is_actionable(&self) -> bool {
        self.draft.direction.is_directional() && self.position_multiplier > 0.0
    }

    pub fn stage(&self) -> DecisionStage {
        DecisionStage::Sized
    }
}

/// Decision after the risk governor has ruled
#[derive(Debug, Clone)]
pub struct GovernedDecision {
    draft: DecisionDraft,
    order_flow: OrderFlowOutcome,
    position_multiplier: f64,
    vix_regime: VixRegime,
    verdict: GovernorVerdict,
}

impl GovernedDecision {
    pub fn allow(sized: SizedDecision) -> Self {
        let SizedDecision {
            mut draft,
            order_flow,
            position_multiplier,
            vix_regime,
        } = sized;
        draft.note("Risk governor: allowed");
        Self {
            draft,
            order_flow,
            position_multiplier,
            vix_regime,
            verdict: GovernorVerdict::Allowed,
        }
    }

    /// Force Neutral with a zero multiplier
    pub fn veto(sized: SizedDecision, reason: impl Into<String>) -> Self {
        let SizedDecision {
            mut draft,
            order_flow,
            vix_regime,
            ..
        } = sized;
        let reason = reason.into();
        draft.note(format!("Risk governor veto: {reason}"));
        draft.direction = Direction::Neutral;
        Self {
            draft,
            order_flow,
            position_multiplier: 0.0,
            vix_regime,
            verdict: GovernorVerdict::Vetoed { reason },
        }
    }

    pub fn draft(&self) -> &DecisionDraft {
        &self.draft
    }

    pub fn verdict(&self) -> &GovernorVerdict {
        &self.verdict
    }

    pub fn stage(&self) -> DecisionStage {
        DecisionStage::Governed
    }

    /// Freeze into the decision handed to the execution boundary
    pub fn finalize(self) -> TradingDecision {
        let GovernedDecision {
            draft,
            order_flow,
            position_multiplier,
            vix_regime,
            verdict,
        } = self;
        TradingDecision {
            evaluation_id: draft.evaluation_id,
            evaluated_at: draft.evaluated_at,
            direction: draft.direction,
            strength: draft.strength,
            confidence: draft.confidence,
            proximity_score: draft.proximity.score,
            bias_score: draft.bias_score,
            confluence_score: draft.confluence_score,
            position_multiplier,
            vix_regime,
            order_flow,
            verdict,
            rationale: draft.rationale,
        }
    }
}
