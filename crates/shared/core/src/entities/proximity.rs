use crate::entities::level::MarketLevel;
use crate::values::TickDistance;
use serde::Serialize;

/// Closest level to the current price
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NearestLevel {
    pub level: MarketLevel,
    pub ticks: TickDistance,
}

/// Output of the proximity scorer
///
/// Buckets are cumulative: a level 2 ticks away appears in all three.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProximityResult {
    /// Weighted closeness, always within [0, 1]
    pub score: f64,
    pub levels_within_3_ticks: Vec<MarketLevel>,
    pub levels_within_5_ticks: Vec<MarketLevel>,
    pub levels_within_10_ticks: Vec<MarketLevel>,
    /// Gamma walls or same-day levels within 5 ticks
    pub critical_levels_nearby: Vec<MarketLevel>,
    pub nearest: Option<NearestLevel>,
    /// Tick distance to the closest gamma wall of either expiry
    pub gamma_wall_ticks: Option<TickDistance>,
}

impl ProximityResult {
    /// No level within reach
    pub fn is_empty(&self) -> bool {
        self.levels_within_10_ticks.is_empty()
    }
}
