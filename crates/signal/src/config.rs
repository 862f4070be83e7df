//! Scoring Tables
//!
//! Immutable weights and thresholds for every scoring stage. Resolved once
//! at startup and shared read-only; each table validates itself.

use levelgate_core::{LevelCategory, TickDistance};
use serde::{Deserialize, Serialize};

/// Innermost proximity bucket
pub const WITHIN_3_TICKS: TickDistance = 3;
/// Middle proximity bucket
pub const WITHIN_5_TICKS: TickDistance = 5;
/// Outer proximity bucket
pub const WITHIN_10_TICKS: TickDistance = 10;

fn check_non_negative(name: &str, value: f64) -> Result<(), String> {
    if !value.is_finite() || value < 0.0 {
        return Err(format!("{name} must be a non-negative number, got {value}"));
    }
    Ok(())
}

fn check_unit(name: &str, value: f64) -> Result<(), String> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(format!("{name} must be within [0, 1], got {value}"));
    }
    Ok(())
}

/// Per-category weight applied to every bucket contribution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryMultipliers {
    pub gamma_wall_0dte: f64,
    pub call_resistance_0dte: f64,
    pub put_support_0dte: f64,
    pub hvl_0dte: f64,
    pub gamma_wall: f64,
    pub call_resistance: f64,
    pub put_support: f64,
    pub hvl: f64,
    /// Shared by blind spots 1..=10
    pub blind_spot: f64,
    /// Shared by GEX levels 1..=10
    pub gex: f64,
}

impl Default for CategoryMultipliers {
    fn default() -> Self {
        Self {
            gamma_wall_0dte: 2.0,
            call_resistance_0dte: 1.8,
            put_support_0dte: 1.8,
            hvl_0dte: 1.5,
            gamma_wall: 1.5,
            call_resistance: 1.2,
            put_support: 1.2,
            hvl: 1.0,
            blind_spot: 1.3,
            gex: 0.8,
        }
    }
}

impl CategoryMultipliers {
    pub fn multiplier(&self, category: LevelCategory) -> f64 {
        match category {
            LevelCategory::GammaWall0Dte => self.gamma_wall_0dte,
            LevelCategory::CallResistance => self.call_resistance_0dte,
            LevelCategory::PutSupport => self.put_support_0dte,
            LevelCategory::Hvl => self.hvl_0dte,
            LevelCategory::GammaWallStd => self.gamma_wall,
            LevelCategory::CallResistanceStd => self.call_resistance,
            LevelCategory::PutSupportStd => self.put_support,
            LevelCategory::HvlStd => self.hvl,
            LevelCategory::BlindSpot(_) => self.blind_spot,
            LevelCategory::GexLevel(_) => self.gex,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        check_non_negative("gamma_wall_0dte multiplier", self.gamma_wall_0dte)?;
        check_non_negative("call_resistance_0dte multiplier", self.call_resistance_0dte)?;
        check_non_negative("put_support_0dte multiplier", self.put_support_0dte)?;
        check_non_negative("hvl_0dte multiplier", self.hvl_0dte)?;
        check_non_negative("gamma_wall multiplier", self.gamma_wall)?;
        check_non_negative("call_resistance multiplier", self.call_resistance)?;
        check_non_negative("put_support multiplier", self.put_support)?;
        check_non_negative("hvl multiplier", self.hvl)?;
        check_non_negative("blind_spot multiplier", self.blind_spot)?;
        check_non_negative("gex multiplier", self.gex)
    }
}

/// Contribution of one level per bucket it falls in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BucketWeights {
    pub within_3: f64,
    pub within_5: f64,
    pub within_10: f64,
}

impl Default for BucketWeights {
    fn default() -> Self {
        Self {
            within_3: 0.40,
            within_5: 0.30,
            within_10: 0.20,
        }
    }
}

/// Proximity scorer configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProximityConfig {
    pub bucket_weights: BucketWeights,
    pub category_multipliers: CategoryMultipliers,
    pub critical_bonus: CriticalBonus,
}

/// One-off bonus for a gamma wall close to price
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CriticalBonus {
    /// Gamma wall within 3 ticks
    pub inner: f64,
    /// Gamma wall within 5 ticks
    pub outer: f64,
}

impl Default for CriticalBonus {
    fn default() -> Self {
        Self {
            inner: 0.60,
            outer: 0.30,
        }
    }
}

impl ProximityConfig {
    pub fn validate(&self) -> Result<(), String> {
        let w = &self.bucket_weights;
        check_non_negative("within_3 weight", w.within_3)?;
        check_non_negative("within_5 weight", w.within_5)?;
        check_non_negative("within_10 weight", w.within_10)?;
        if w.within_3 < w.within_5 || w.within_5 < w.within_10 {
            return Err("bucket weights must not increase with distance".to_string());
        }
        check_non_negative("inner critical bonus", self.critical_bonus.inner)?;
        check_non_negative("outer critical bonus", self.critical_bonus.outer)?;
        if self.critical_bonus.inner < self.critical_bonus.outer {
            return Err("inner critical bonus must be at least the outer bonus".to_string());
        }
        self.category_multipliers.validate()
    }
}

/// Confluence aggregator configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfluenceConfig {
    /// Weight of a level whose innermost bucket is <= 3 ticks
    pub inner_weight: f64,
    /// Weight of a level whose innermost bucket is <= 5 ticks
    pub middle_weight: f64,
    /// Weight of a level whose innermost bucket is <= 10 ticks
    pub outer_weight: f64,
    /// Weighted count that maps to a full score
    pub saturation: f64,
}

impl Default for ConfluenceConfig {
    fn default() -> Self {
        Self {
            inner_weight: 1.0,
            middle_weight: 0.75,
            outer_weight: 0.5,
            saturation: 2.0,
        }
    }
}

impl ConfluenceConfig {
    pub fn validate(&self) -> Result<(), String> {
        check_non_negative("inner confluence weight", self.inner_weight)?;
        check_non_negative("middle confluence weight", self.middle_weight)?;
        check_non_negative("outer confluence weight", self.outer_weight)?;
        if self.inner_weight < self.middle_weight || self.middle_weight < self.outer_weight {
            return Err("confluence weights must favour the innermost bucket".to_string());
        }
        if !self.saturation.is_finite() || self.saturation <= 0.0 {
            return Err(format!(
                "confluence saturation must be positive, got {}",
                self.saturation
            ));
        }
        Ok(())
    }
}

/// Composite scorer configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositeConfig {
    pub proximity_weight: f64,
    pub bias_weight: f64,
    pub confluence_weight: f64,
    /// Below this composite the direction is always Neutral
    pub no_signal_threshold: f64,
    /// |bias| must exceed this for a directional call
    pub bias_threshold: f64,
    pub extreme_threshold: f64,
    pub strong_threshold: f64,
    pub moderate_threshold: f64,
    pub weak_threshold: f64,
}

impl Default for CompositeConfig {
    fn default() -> Self {
        Self {
            proximity_weight: 0.40,
            bias_weight: 0.35,
            confluence_weight: 0.25,
            no_signal_threshold: 0.45,
            bias_threshold: 0.2,
            extreme_threshold: 0.90,
            strong_threshold: 0.75,
            moderate_threshold: 0.60,
            weak_threshold: 0.45,
        }
    }
}

impl CompositeConfig {
    pub fn validate(&self) -> Result<(), String> {
        check_non_negative("proximity weight", self.proximity_weight)?;
        check_non_negative("bias weight", self.bias_weight)?;
        check_non_negative("confluence weight", self.confluence_weight)?;
        check_unit("no-signal threshold", self.no_signal_threshold)?;
        check_unit("bias threshold", self.bias_threshold)?;
        check_unit("extreme threshold", self.extreme_threshold)?;
        check_unit("strong threshold", self.strong_threshold)?;
        check_unit("moderate threshold", self.moderate_threshold)?;
        check_unit("weak threshold", self.weak_threshold)?;
        if !(self.extreme_threshold >= self.strong_threshold
            && self.strong_threshold >= self.moderate_threshold
            && self.moderate_threshold >= self.weak_threshold)
        {
            return Err("strength thresholds must be descending".to_string());
        }
        // Anything directional must at least rate Weak
        if self.no_signal_threshold < self.weak_threshold {
            return Err(format!(
                "no-signal threshold {} below weak threshold {}",
                self.no_signal_threshold, self.weak_threshold
            ));
        }
        Ok(())
    }
}

/// Order-flow validator configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderFlowConfig {
    /// Long needs delta_ratio above +threshold, Short below -threshold
    pub delta_ratio_threshold: f64,
}

impl Default for OrderFlowConfig {
    fn default() -> Self {
        Self {
            delta_ratio_threshold: 0.1,
        }
    }
}

impl OrderFlowConfig {
    pub fn validate(&self) -> Result<(), String> {
        check_unit("delta ratio threshold", self.delta_ratio_threshold)
    }
}

/// Position sizer configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizingConfig {
    pub extreme_multiplier: f64,
    pub strong_multiplier: f64,
    pub moderate_multiplier: f64,
    pub weak_multiplier: f64,
    /// VIX strictly above this is the high bracket
    pub high_vix_threshold: f64,
    /// VIX strictly below this is the low bracket
    pub low_vix_threshold: f64,
    pub high_vix_factor: f64,
    pub low_vix_factor: f64,
}

impl Default for SizingConfig {
    fn default() -> Self {
        Self {
            extreme_multiplier: 2.0,
            strong_multiplier: 1.5,
            moderate_multiplier: 1.0,
            weak_multiplier: 0.5,
            high_vix_threshold: 30.0,
            low_vix_threshold: 15.0,
            high_vix_factor: 0.5,
            low_vix_factor: 1.2,
        }
    }
}

impl SizingConfig {
    pub fn validate(&self) -> Result<(), String> {
        check_non_negative("extreme multiplier", self.extreme_multiplier)?;
        check_non_negative("strong multiplier", self.strong_multiplier)?;
        check_non_negative("moderate multiplier", self.moderate_multiplier)?;
        check_non_negative("weak multiplier", self.weak_multiplier)?;
        check_non_negative("high vix factor", self.high_vix_factor)?;
        check_non_negative("low vix factor", self.low_vix_factor)?;
        check_non_negative("high vix threshold", self.high_vix_threshold)?;
        check_non_negative("low vix threshold", self.low_vix_threshold)?;
        if self.low_vix_threshold > self.high_vix_threshold {
            return Err(format!(
                "low vix threshold {} above high vix threshold {}",
                self.low_vix_threshold, self.high_vix_threshold
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(ProximityConfig::default().validate().is_ok());
        assert!(ConfluenceConfig::default().validate().is_ok());
        assert!(CompositeConfig::default().validate().is_ok());
        assert!(OrderFlowConfig::default().validate().is_ok());
        assert!(SizingConfig::default().validate().is_ok());
    }

    #[test]
    fn test_category_lookup() {
        let table = CategoryMultipliers::default();
        assert_eq!(table.multiplier(LevelCategory::GammaWall0Dte), 2.0);
        assert_eq!(table.multiplier(LevelCategory::BlindSpot(4)), 1.3);
        assert_eq!(table.multiplier(LevelCategory::GexLevel(9)), 0.8);
        assert_eq!(table.multiplier(LevelCategory::HvlStd), 1.0);
    }

    #[test]
    fn test_bucket_weights_must_favour_inner() {
        let config = ProximityConfig {
            bucket_weights: BucketWeights {
                within_3: 0.1,
                within_5: 0.3,
                within_10: 0.2,
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_strength_thresholds_descending() {
        let config = CompositeConfig {
            strong_threshold: 0.95,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_no_signal_threshold_not_below_weak() {
        let config = CompositeConfig {
            no_signal_threshold: 0.30,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let stricter = CompositeConfig {
            no_signal_threshold: 0.50,
            ..Default::default()
        };
        assert!(stricter.validate().is_ok());
    }

    #[test]
    fn test_vix_thresholds_ordered() {
        let config = SizingConfig {
            low_vix_threshold: 40.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
