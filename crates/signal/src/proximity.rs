//! Level Proximity Scoring
//!
//! Measures how close price sits to the published structure. Every level
//! inside 10 ticks contributes `bucket_weight × category_multiplier` for each
//! (cumulative) bucket it falls in; a gamma wall nearby adds a one-off bonus.
//! Contributions are summed and the total is clamped once to [0, 1].

use crate::config::{ProximityConfig, WITHIN_3_TICKS, WITHIN_5_TICKS, WITHIN_10_TICKS};
use levelgate_core::{
    DomainError, DomainResult, LevelSet, NearestLevel, PriceSnapshot, ProximityResult,
};
use log::debug;

/// Pure proximity scorer
#[derive(Debug, Clone, Default)]
pub struct ProximityScorer {
    config: ProximityConfig,
}

impl ProximityScorer {
    pub fn new(config: ProximityConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProximityConfig {
        &self.config
    }

    /// Score `price` against every level in `levels`
    ///
    /// Levels at equal distance are all counted; contributions are additive so
    /// no tie-break is needed. The nearest level reported on a tie is the
    /// first in (price, category) order.
    pub fn score(&self, price: &PriceSnapshot, levels: &LevelSet) -> DomainResult<ProximityResult> {
        price.validate()?;

        let weights = &self.config.bucket_weights;
        let multipliers = &self.config.category_multipliers;

        let mut result = ProximityResult::default();
        let mut raw = 0.0;

        for level in levels.iter() {
            let ticks = price
                .tick_distance(level.price)
                .ok_or(DomainError::NonPositiveTickSize(price.tick_size))?;

            if result.nearest.is_none_or(|nearest| ticks < nearest.ticks) {
                result.nearest = Some(NearestLevel {
                    level: *level,
                    ticks,
                });
            }

            if level.category.is_gamma_wall() {
                result.gamma_wall_ticks = Some(
                    result
                        .gamma_wall_ticks
                        .map_or(ticks, |closest| closest.min(ticks)),
                );
            }

            if ticks > WITHIN_10_TICKS {
                continue;
            }

            let multiplier = multipliers.multiplier(level.category);

            if ticks <= WITHIN_3_TICKS {
                raw += weights.within_3 * multiplier;
                result.levels_within_3_ticks.push(*level);
            }
            if ticks <= WITHIN_5_TICKS {
                raw += weights.within_5 * multiplier;
                result.levels_within_5_ticks.push(*level);
                if level.is_critical() {
                    result.critical_levels_nearby.push(*level);
                }
            }
            raw += weights.within_10 * multiplier;
            result.levels_within_10_ticks.push(*level);
        }

        let bonus = match result.gamma_wall_ticks {
            Some(ticks) if ticks <= WITHIN_3_TICKS => self.config.critical_bonus.inner,
            Some(ticks) if ticks <= WITHIN_5_TICKS => self.config.critical_bonus.outer,
            _ => 0.0,
        };
        raw += bonus;

        result.score = raw.clamp(0.0, 1.0);

        debug!(
            "[PROXIMITY] price={} raw={:.3} bonus={:.2} score={:.3} buckets={}/{}/{} critical={}",
            price.price,
            raw,
            bonus,
            result.score,
            result.levels_within_3_ticks.len(),
            result.levels_within_5_ticks.len(),
            result.levels_within_10_ticks.len(),
            result.critical_levels_nearby.len()
        );

        Ok(result)
    }
}
