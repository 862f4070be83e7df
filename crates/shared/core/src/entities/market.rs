//! Market inputs captured for one evaluation
//!
//! These come from external feeds; the engine only validates them.

use crate::error::{DomainError, DomainResult};
use crate::values::{Price, TickDistance, Timestamp};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Last traded price and the instrument's tick size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceSnapshot {
    pub price: Price,
    pub tick_size: Decimal,
    pub timestamp: Timestamp,
}

impl PriceSnapshot {
    pub fn new(price: Price, tick_size: Decimal, timestamp: Timestamp) -> Self {
        Self {
            price,
            tick_size,
            timestamp,
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.tick_size <= Decimal::ZERO {
            return Err(DomainError::NonPositiveTickSize(self.tick_size));
        }
        if self.price <= Decimal::ZERO {
            return Err(DomainError::NonPositivePrice(self.price));
        }
        Ok(())
    }

    /// `round(|price - other| / tick_size)`
    ///
    /// Returns `None` when the tick size is not positive.
    pub fn tick_distance(&self, other: Price) -> Option<TickDistance> {
        if self.tick_size <= Decimal::ZERO {
            return None;
        }
        let ticks = ((self.price - other).abs() / self.tick_size).round();
        Some(ticks.to_u32().unwrap_or(TickDistance::MAX))
    }
}

/// Aggressor pressure reported by the order-flow feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pressure {
    Up,
    Down,
    Neutral,
}

impl Pressure {
    /// +1 / -1 / 0
    pub fn value(&self) -> i8 {
        match self {
            Pressure::Up => 1,
            Pressure::Down => -1,
            Pressure::Neutral => 0,
        }
    }
}

/// Live order-flow statistics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderFlowSnapshot {
    pub pressure: Pressure,
    /// Net delta over traded volume for the current bar
    pub delta_ratio: f64,
    /// Session cumulative delta
    pub cumulative_delta: f64,
    pub timestamp: Timestamp,
}

impl OrderFlowSnapshot {
    pub fn new(
        pressure: Pressure,
        delta_ratio: f64,
        cumulative_delta: f64,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            pressure,
            delta_ratio,
            cumulative_delta,
            timestamp,
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        if !self.delta_ratio.is_finite() {
            return Err(DomainError::NotFinite {
                field: "delta_ratio",
            });
        }
        if !self.cumulative_delta.is_finite() {
            return Err(DomainError::NotFinite {
                field: "cumulative_delta",
            });
        }
        Ok(())
    }
}

/// Directional dealer bias (-1.0 bearish to 1.0 bullish)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BiasSignal {
    pub score: f64,
    pub timestamp: Timestamp,
}

impl BiasSignal {
    pub fn new(score: f64, timestamp: Timestamp) -> Self {
        Self { score, timestamp }
    }

    /// Out-of-range scores are a feed contract violation, never clamped
    pub fn validate(&self) -> DomainResult<()> {
        if !self.score.is_finite() {
            return Err(DomainError::NotFinite { field: "bias" });
        }
        if !(-1.0..=1.0).contains(&self.score) {
            return Err(DomainError::BiasOutOfRange(self.score));
        }
        Ok(())
    }
}

/// Latest VIX print
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VixLevel {
    pub value: f64,
    pub timestamp: Timestamp,
}

impl VixLevel {
    pub fn new(value: f64, timestamp: Timestamp) -> Self {
        Self { value, timestamp }
    }

    pub fn validate(&self) -> DomainResult<()> {
        if !self.value.is_finite() {
            return Err(DomainError::NotFinite { field: "vix" });
        }
        if self.value < 0.0 {
            return Err(DomainError::NegativeVix(self.value));
        }
        Ok(())
    }
}

/// Volatility bracket used for sizing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum VixRegime {
    Low,
    #[default]
    Standard,
    High,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    #[test]
    fn test_tick_distance() {
        let snap = PriceSnapshot::new(dec!(4500.00), dec!(0.25), Utc::now());

        assert_eq!(snap.tick_distance(dec!(4500.50)), Some(2));
        assert_eq!(snap.tick_distance(dec!(4499.00)), Some(4));
        assert_eq!(snap.tick_distance(dec!(4500.00)), Some(0));
    }

    #[test]
    fn test_tick_distance_rounds_off_grid_levels() {
        let snap = PriceSnapshot::new(dec!(4500.00), dec!(0.25), Utc::now());

        // 0.30 / 0.25 = 1.2 ticks
        assert_eq!(snap.tick_distance(dec!(4500.30)), Some(1));
        // 0.45 / 0.25 = 1.8 ticks
        assert_eq!(snap.tick_distance(dec!(4499.55)), Some(2));
    }

    #[test]
    fn test_zero_tick_size_rejected() {
        let snap = PriceSnapshot::new(dec!(4500), dec!(0), Utc::now());
        assert!(snap.validate().is_err());
        assert_eq!(snap.tick_distance(dec!(4501)), None);
    }

    #[test]
    fn test_bias_range() {
        let now = Utc::now();
        assert!(BiasSignal::new(1.0, now).validate().is_ok());
        assert!(BiasSignal::new(-1.0, now).validate().is_ok());
        assert_eq!(
            BiasSignal::new(1.2, now).validate(),
            Err(DomainError::BiasOutOfRange(1.2))
        );
        assert!(BiasSignal::new(f64::NAN, now).validate().is_err());
    }

    #[test]
    fn test_pressure_values() {
        assert_eq!(Pressure::Up.value(), 1);
        assert_eq!(Pressure::Down.value(), -1);
        assert_eq!(Pressure::Neutral.value(), 0);
    }

    #[test]
    fn test_order_flow_rejects_nan() {
        let flow = OrderFlowSnapshot::new(Pressure::Up, f64::NAN, 10.0, Utc::now());
        assert!(flow.validate().is_err());
    }
}
