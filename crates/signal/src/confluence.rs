//! Level confluence: how many distinct levels cluster around price.

use crate::config::ConfluenceConfig;
use levelgate_core::ProximityResult;
use log::debug;

#[derive(Debug, Clone, Default)]
pub struct ConfluenceAggregator {
    config: ConfluenceConfig,
}

impl ConfluenceAggregator {
    pub fn new(config: ConfluenceConfig) -> Self {
        Self { config }
    }

    /// Weighted count of distinct levels over the saturation point, capped at 1.0
    ///
    /// Each level is counted once, in the innermost bucket it reaches.
    pub fn aggregate(&self, proximity: &ProximityResult) -> f64 {
        let inner = proximity.levels_within_3_ticks.len();
        let middle = proximity
            .levels_within_5_ticks
            .len()
            .saturating_sub(inner);
        let outer = proximity
            .levels_within_10_ticks
            .len()
            .saturating_sub(proximity.levels_within_5_ticks.len());

        let weighted = inner as f64 * self.config.inner_weight
            + middle as f64 * self.config.middle_weight
            + outer as f64 * self.config.outer_weight;

        let score = (weighted / self.config.saturation).clamp(0.0, 1.0);

        debug!(
            "[CONFLUENCE] levels {}/{}/{} weighted={:.2} score={:.3}",
            inner, middle, outer, weighted, score
        );

        score
    }
}
