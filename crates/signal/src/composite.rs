//! Composite Scoring
//!
//! Blends proximity, bias magnitude and confluence into one score, derives
//! the strength tier from it and resolves direction from the bias sign.
//! Composite strength alone never implies a direction.

use crate::config::CompositeConfig;
use levelgate_core::{
    DecisionDraft, Direction, ProximityResult, ScoredDecision, Strength, Timestamp,
};
use log::debug;
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
pub struct CompositeScorer {
    config: CompositeConfig,
}

impl CompositeScorer {
    pub fn new(config: CompositeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompositeConfig {
        &self.config
    }

    /// `w_p·proximity + w_b·|bias| + w_c·confluence`, clamped to [0, 1]
    pub fn composite(&self, proximity: f64, bias: f64, confluence: f64) -> f64 {
        let raw = self.config.proximity_weight * proximity
            + self.config.bias_weight * bias.abs()
            + self.config.confluence_weight * confluence;
        raw.clamp(0.0, 1.0)
    }

    pub fn strength(&self, composite: f64) -> Strength {
        let c = &self.config;
        if composite >= c.extreme_threshold {
            Strength::Extreme
        } else if composite >= c.strong_threshold {
            Strength::Strong
        } else if composite >= c.moderate_threshold {
            Strength::Moderate
        } else if composite >= c.weak_threshold {
            Strength::Weak
        } else {
            Strength::NoSignal
        }
    }

    /// Neutral below the no-signal threshold or inside the bias dead band
    pub fn direction(&self, composite: f64, bias: f64) -> Direction {
        if composite < self.config.no_signal_threshold {
            Direction::Neutral
        } else if bias > self.config.bias_threshold {
            Direction::Long
        } else if bias < -self.config.bias_threshold {
            Direction::Short
        } else {
            Direction::Neutral
        }
    }

    /// Build the scored decision and its opening rationale lines
    pub fn score(
        &self,
        proximity: ProximityResult,
        bias: f64,
        confluence: f64,
        evaluation_id: Uuid,
        evaluated_at: Timestamp,
    ) -> ScoredDecision {
        let composite = self.composite(proximity.score, bias, confluence);
        let strength = self.strength(composite);
        let direction = self.direction(composite, bias);

        let mut rationale = vec![
            format!(
                "Signal {:?} {:?} (confidence {:.3})",
                direction, strength, composite
            ),
            format!(
                "Composite {:.3} = {:.2}*proximity {:.3} + {:.2}*|bias| {:.3} + {:.2}*confluence {:.3}",
                composite,
                self.config.proximity_weight,
                proximity.score,
                self.config.bias_weight,
                bias.abs(),
                self.config.confluence_weight,
                confluence
            ),
        ];

        match &proximity.nearest {
            Some(nearest) => rationale.push(format!(
                "Nearest level {} at {} ({} ticks)",
                nearest.level.category, nearest.level.price, nearest.ticks
            )),
            None => rationale.push("No levels published".to_string()),
        }

        if !proximity.critical_levels_nearby.is_empty() {
            let labels: Vec<String> = proximity
                .critical_levels_nearby
                .iter()
                .map(|level| format!("{}@{}", level.category, level.price))
                .collect();
            rationale.push(format!(
                "{} critical level(s) within 5 ticks: {}",
                labels.len(),
                labels.join(", ")
            ));
        }

        if let Some(ticks) = proximity.gamma_wall_ticks {
            rationale.push(format!("Gamma wall {ticks} ticks away"));
        }

        if composite < self.config.no_signal_threshold {
            rationale.push(format!(
                "Composite below no-signal threshold {:.2}",
                self.config.no_signal_threshold
            ));
        } else if direction == Direction::Neutral {
            rationale.push(format!(
                "Bias {:+.2} inside +/-{:.2} band, no directional call",
                bias, self.config.bias_threshold
            ));
        }

        debug!(
            "[COMPOSITE] {} composite={:.3} bias={:+.2} -> {:?} {:?}",
            evaluation_id, composite, bias, direction, strength
        );

        ScoredDecision::new(DecisionDraft {
            evaluation_id,
            evaluated_at,
            direction,
            strength,
            confidence: composite,
            proximity,
            bias_score: bias,
            confluence_score: confluence,
            rationale,
        })
    }
}
