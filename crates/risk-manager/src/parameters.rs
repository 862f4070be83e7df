//! Risk Limits
//!
//! Hard capital-protection limits enforced by the risk governor.

use chrono::{Duration, NaiveDate};
use levelgate_core::Timestamp;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Limits the governor trips on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskLimits {
    /// Trip once the day's realized losses exceed this (positive amount)
    pub max_daily_loss: Decimal,
    /// Trip once more trades than this have closed today
    pub max_trades_per_day: u32,
    /// Minutes added to UTC before taking the calendar date of a trading day
    pub trading_day_offset_minutes: i32,
    /// Roll counters automatically when time reaches a later trading day
    pub auto_reset_on_new_day: bool,
}

impl Default for RiskLimits {
    fn default() -> Self {
        Self {
            max_daily_loss: dec!(1000),
            max_trades_per_day: 20,
            trading_day_offset_minutes: 0,
            auto_reset_on_new_day: true,
        }
    }
}

impl RiskLimits {
    /// Trading day a timestamp belongs to
    pub fn trading_day(&self, at: Timestamp) -> NaiveDate {
        (at + Duration::minutes(i64::from(self.trading_day_offset_minutes))).date_naive()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.max_daily_loss <= Decimal::ZERO {
            return Err(format!(
                "max_daily_loss must be positive, got {}",
                self.max_daily_loss
            ));
        }
        if self.max_trades_per_day == 0 {
            return Err("max_trades_per_day must be at least 1".to_string());
        }
        if self.trading_day_offset_minutes.abs() >= 24 * 60 {
            return Err(format!(
                "trading_day_offset_minutes must be within one day, got {}",
                self.trading_day_offset_minutes
            ));
        }
        Ok(())
    }
}
