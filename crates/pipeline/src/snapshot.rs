//! Market Snapshot
//!
//! Every input for one evaluation, captured at a single logical instant
//! before any stage runs. A snapshot missing any part cannot be built.

use crate::config::StalenessConfig;
use chrono::Duration;
use levelgate_core::{BiasSignal, LevelSet, OrderFlowSnapshot, PriceSnapshot, Timestamp, VixLevel};
use levelgate_ports::{EngineError, EngineResult, InputSource};

/// Consistent set of inputs for one evaluation
#[derive(Debug, Clone)]
pub struct MarketSnapshot {
    as_of: Timestamp,
    price: PriceSnapshot,
    levels: LevelSet,
    bias: BiasSignal,
    order_flow: OrderFlowSnapshot,
    vix: VixLevel,
}

impl MarketSnapshot {
    pub fn builder(as_of: Timestamp) -> MarketSnapshotBuilder {
        MarketSnapshotBuilder {
            as_of,
            price: None,
            levels: None,
            bias: None,
            order_flow: None,
            vix: None,
        }
    }

    /// Logical instant the snapshot was captured at
    pub fn as_of(&self) -> Timestamp {
        self.as_of
    }

    pub fn price(&self) -> &PriceSnapshot {
        &self.price
    }

    pub fn levels(&self) -> &LevelSet {
        &self.levels
    }

    pub fn bias(&self) -> &BiasSignal {
        &self.bias
    }

    pub fn order_flow(&self) -> &OrderFlowSnapshot {
        &self.order_flow
    }

    pub fn vix(&self) -> &VixLevel {
        &self.vix
    }

    /// Range and finiteness checks on every reading
    pub fn validate(&self) -> EngineResult<()> {
        self.price.validate()?;
        self.bias.validate()?;
        self.order_flow.validate()?;
        self.vix.validate()?;
        Ok(())
    }

    /// Reject a snapshot whose inputs are too old as of `now`
    ///
    /// `now` is the engine clock, not `as_of`, so data replayed late is
    /// caught even when every part carries the same stamp. The capture
    /// instant itself must be within the order-flow limit.
    pub fn check_freshness(&self, staleness: &StalenessConfig, now: Timestamp) -> EngineResult<()> {
        check_age(
            InputSource::Snapshot,
            age_at(now, self.as_of),
            staleness.max_order_flow_age(),
        )?;
        check_age(
            InputSource::OrderFlow,
            age_at(now, self.order_flow.timestamp),
            staleness.max_order_flow_age(),
        )?;
        check_age(
            InputSource::Bias,
            age_at(now, self.bias.timestamp),
            staleness.max_bias_age(),
        )?;
        check_age(
            InputSource::Levels,
            age_at(now, self.levels.published_at()),
            staleness.max_level_age(),
        )
    }

    /// Age of the VIX reading as of `now` if it is past `max_age`
    pub fn stale_vix_age(&self, max_age: Duration, now: Timestamp) -> Option<Duration> {
        let age = age_at(now, self.vix.timestamp);
        (age > max_age).then_some(age)
    }
}

/// Readings stamped ahead of `now` count as age zero
fn age_at(now: Timestamp, stamped: Timestamp) -> Duration {
    (now - stamped).max(Duration::zero())
}

fn check_age(feed: InputSource, age: Duration, max_age: Duration) -> EngineResult<()> {
    if age > max_age {
        return Err(EngineError::StaleData {
            feed,
            age_ms: age.num_milliseconds(),
            max_age_ms: max_age.num_milliseconds(),
        });
    }
    Ok(())
}

/// Collects snapshot parts; `build` fails on any missing one
#[derive(Debug, Clone)]
pub struct MarketSnapshotBuilder {
    as_of: Timestamp,
    price: Option<PriceSnapshot>,
    levels: Option<LevelSet>,
    bias: Option<BiasSignal>,
    order_flow: Option<OrderFlowSnapshot>,
    vix: Option<VixLevel>,
}

impl MarketSnapshotBuilder {
    pub fn price(mut self, price: PriceSnapshot) -> Self {
        self.price = Some(price);
        self
    }

    pub fn levels(mut self, levels: LevelSet) -> Self {
        self.levels = Some(levels);
        self
    }

    pub fn bias(mut self, bias: BiasSignal) -> Self {
        self.bias = Some(bias);
        self
    }

    pub fn order_flow(mut self, order_flow: OrderFlowSnapshot) -> Self {
        self.order_flow = Some(order_flow);
        self
    }

    pub fn vix(mut self, vix: VixLevel) -> Self {
        self.vix = Some(vix);
        self
    }

    pub fn build(self) -> EngineResult<MarketSnapshot> {
        let snapshot = MarketSnapshot {
            as_of: self.as_of,
            price: self
                .price
                .ok_or_else(|| EngineError::invalid_input("missing price snapshot"))?,
            levels: self
                .levels
                .ok_or_else(|| EngineError::invalid_input("missing level set"))?,
            bias: self
                .bias
                .ok_or_else(|| EngineError::invalid_input("missing bias signal"))?,
            order_flow: self
                .order_flow
                .ok_or_else(|| EngineError::invalid_input("missing order flow snapshot"))?,
            vix: self
                .vix
                .ok_or_else(|| EngineError::invalid_input("missing vix level"))?,
        };
        snapshot.validate()?;
        Ok(snapshot)
    }
}
