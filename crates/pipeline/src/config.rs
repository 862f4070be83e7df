//! Engine Configuration
//!
//! Every table the engine reads, resolved once at startup and shared
//! immutably behind an `Arc`. Any field left out of an override document
//! keeps its default.

use chrono::Duration;
use levelgate_ports::{EngineError, EngineResult};
use levelgate_risk_manager::RiskLimits;
use levelgate_signal::{
    CompositeConfig, ConfluenceConfig, OrderFlowConfig, ProximityConfig, SizingConfig,
};
use serde::{Deserialize, Serialize};

/// Maximum age of each feed, measured against the snapshot instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StalenessConfig {
    pub max_order_flow_age_ms: i64,
    pub max_bias_age_ms: i64,
    pub max_level_age_ms: i64,
    /// Older VIX readings fall back to the standard regime
    pub max_vix_age_ms: i64,
}

impl Default for StalenessConfig {
    fn default() -> Self {
        Self {
            max_order_flow_age_ms: 5_000,
            max_bias_age_ms: 60_000,
            max_level_age_ms: 30 * 60_000,
            max_vix_age_ms: 5 * 60_000,
        }
    }
}

impl StalenessConfig {
    pub fn max_order_flow_age(&self) -> Duration {
        Duration::milliseconds(self.max_order_flow_age_ms)
    }

    pub fn max_bias_age(&self) -> Duration {
        Duration::milliseconds(self.max_bias_age_ms)
    }

    pub fn max_level_age(&self) -> Duration {
        Duration::milliseconds(self.max_level_age_ms)
    }

    pub fn max_vix_age(&self) -> Duration {
        Duration::milliseconds(self.max_vix_age_ms)
    }

    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("max_order_flow_age_ms", self.max_order_flow_age_ms),
            ("max_bias_age_ms", self.max_bias_age_ms),
            ("max_level_age_ms", self.max_level_age_ms),
            ("max_vix_age_ms", self.max_vix_age_ms),
        ] {
            if value <= 0 {
                return Err(format!("{name} must be positive, got {value}"));
            }
        }
        Ok(())
    }
}

/// Full engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub proximity: ProximityConfig,
    pub confluence: ConfluenceConfig,
    pub composite: CompositeConfig,
    pub order_flow: OrderFlowConfig,
    pub sizing: SizingConfig,
    pub risk: RiskLimits,
    pub staleness: StalenessConfig,
    /// Per-evaluation latency budget; overruns are logged, never enforced
    pub latency_budget_us: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            proximity: ProximityConfig::default(),
            confluence: ConfluenceConfig::default(),
            composite: CompositeConfig::default(),
            order_flow: OrderFlowConfig::default(),
            sizing: SizingConfig::default(),
            risk: RiskLimits::default(),
            staleness: StalenessConfig::default(),
            latency_budget_us: 3_000,
        }
    }
}

impl EngineConfig {
    /// Parse a JSON override document and validate the result
    pub fn from_json_str(json: &str) -> EngineResult<Self> {
        let config: EngineConfig = serde_json::from_str(json)
            .map_err(|e| EngineError::InvalidConfig(format!("malformed config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn latency_budget(&self) -> std::time::Duration {
        std::time::Duration::from_micros(self.latency_budget_us)
    }

    pub fn validate(&self) -> EngineResult<()> {
        let sections = [
            ("proximity", self.proximity.validate()),
            ("confluence", self.confluence.validate()),
            ("composite", self.composite.validate()),
            ("order_flow", self.order_flow.validate()),
            ("sizing", self.sizing.validate()),
            ("risk", self.risk.validate()),
            ("staleness", self.staleness.validate()),
        ];
        for (section, result) in sections {
            result.map_err(|reason| EngineError::InvalidConfig(format!("{section}: {reason}")))?;
        }
        if self.latency_budget_us == 0 {
            return Err(EngineError::InvalidConfig(
                "latency_budget_us must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
