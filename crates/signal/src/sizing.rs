//! Position sizing from strength tier and volatility regime.
//!
//! The multiplier is advisory; the execution boundary applies the account's
//! base size.

use crate::config::SizingConfig;
use levelgate_core::{SizedDecision, Strength, ValidatedDecision, VixRegime};
use log::debug;

#[derive(Debug, Clone, Default)]
pub struct PositionSizer {
    config: SizingConfig,
}

impl PositionSizer {
    pub fn new(config: SizingConfig) -> Self {
        Self { config }
    }

    /// High above the upper threshold, Low below the lower one
    pub fn regime_for(&self, vix: f64) -> VixRegime {
        if vix > self.config.high_vix_threshold {
            VixRegime::High
        } else if vix < self.config.low_vix_threshold {
            VixRegime::Low
        } else {
            VixRegime::Standard
        }
    }

    pub fn base_multiplier(&self, strength: Strength) -> f64 {
        match strength {
            Strength::Extreme => self.config.extreme_multiplier,
            Strength::Strong => self.config.strong_multiplier,
            Strength::Moderate => self.config.moderate_multiplier,
            Strength::Weak => self.config.weak_multiplier,
            Strength::NoSignal => 0.0,
        }
    }

    pub fn regime_factor(&self, regime: VixRegime) -> f64 {
        match regime {
            VixRegime::High => self.config.high_vix_factor,
            VixRegime::Low => self.config.low_vix_factor,
            VixRegime::Standard => 1.0,
        }
    }

    pub fn multiplier(&self, strength: Strength, regime: VixRegime) -> f64 {
        self.base_multiplier(strength) * self.regime_factor(regime)
    }

    /// Neutral decisions always size to zero
    pub fn size(&self, validated: ValidatedDecision, regime: VixRegime) -> SizedDecision {
        let multiplier = if validated.direction().is_directional() {
            self.multiplier(validated.draft().strength, regime)
        } else {
            0.0
        };

        debug!(
            "[SIZING] {} {:?} {:?} in {:?} VIX -> {:.2}",
            validated.draft().evaluation_id,
            validated.direction(),
            validated.draft().strength,
            regime,
            multiplier
        );

        SizedDecision::new(validated, multiplier, regime)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use levelgate_core::{DecisionDraft, Direction, ProximityResult, ScoredDecision};
    use uuid::Uuid;

    fn validated(direction: Direction, strength: Strength) -> ValidatedDecision {
        let scored = ScoredDecision::new(DecisionDraft {
            evaluation_id: Uuid::new_v4(),
            evaluated_at: Utc::now(),
            direction,
            strength,
            confidence: 0.9,
            proximity: ProximityResult::default(),
            bias_score: 0.6,
            confluence_score: 0.5,
            rationale: Vec::new(),
        });
        if direction.is_directional() {
            ValidatedDecision::confirmed(scored)
        } else {
            ValidatedDecision::pass_through(scored)
        }
    }

    #[test]
    fn test_regime_brackets() {
        let sizer = PositionSizer::default();
        assert_eq!(sizer.regime_for(10.0), VixRegime::Low);
        assert_eq!(sizer.regime_for(15.0), VixRegime::Standard);
        assert_eq!(sizer.regime_for(30.0), VixRegime::Standard);
        assert_eq!(sizer.regime_for(30.5), VixRegime::High);
    }

    #[test]
    fn test_base_multipliers() {
        let sizer = PositionSizer::default();
        assert_eq!(sizer.base_multiplier(Strength::Extreme), 2.0);
        assert_eq!(sizer.base_multiplier(Strength::Strong), 1.5);
        assert_eq!(sizer.base_multiplier(Strength::Moderate), 1.0);
        assert_eq!(sizer.base_multiplier(Strength::Weak), 0.5);
        assert_eq!(sizer.base_multiplier(Strength::NoSignal), 0.0);
    }

    #[test]
    fn test_extreme_low_vix() {
        let sizer = PositionSizer::default();
        let sized = sizer.size(validated(Direction::Long, Strength::Extreme), sizer.regime_for(10.0));

        assert!((sized.position_multiplier() - 2.4).abs() < 1e-9);
        assert_eq!(sized.vix_regime(), VixRegime::Low);
        assert!(sized.is_actionable());
    }

    #[test]
    fn test_weak_high_vix() {
        let sizer = PositionSizer::default();
        let sized = sizer.size(validated(Direction::Short, Strength::Weak), sizer.regime_for(35.0));

        assert!((sized.position_multiplier() - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_demoted_decision_sizes_to_zero() {
        let sizer = PositionSizer::default();
        let sized = sizer.size(validated(Direction::Neutral, Strength::Extreme), VixRegime::Low);

        assert_eq!(sized.position_multiplier(), 0.0);
        assert!(!sized.is_actionable());
    }
}
