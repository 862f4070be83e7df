//! Snapshot Feed - synthetic market inputs for replays
//!
//! Generates complete [`MarketSnapshot`]s around a fixed level map:
//! - Price random walk in whole ticks
//! - Bias random walk within [-1, 1]
//! - Order flow that mostly follows the last price move
//! - VIX random walk within a configured band
//!
//! Seeded runs are reproducible tick for tick.

use chrono::Duration;
use levelgate_clock::ReplayClock;
use levelgate_core::{
    BiasSignal, LevelCategory, LevelSet, MarketLevel, OrderFlowSnapshot, Pressure, PriceSnapshot,
    Timestamp, VixLevel,
};
use levelgate_pipeline::MarketSnapshot;
use levelgate_ports::{Clock, EngineError, EngineResult};
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Configuration for snapshot generation
#[derive(Debug, Clone)]
pub struct SnapshotFeedConfig {
    pub initial_price: Decimal,
    pub tick_size: Decimal,
    /// Level map published to every snapshot
    pub levels: Vec<MarketLevel>,
    /// Largest price move per snapshot, in ticks
    pub max_step_ticks: i64,
    /// Largest bias move per snapshot
    pub bias_step: f64,
    pub initial_vix: f64,
    /// VIX stays inside this band
    pub vix_bounds: (f64, f64),
    /// Chance that order flow disagrees with the last price move
    pub flow_noise: f64,
    /// Level map is republished at this interval
    pub level_refresh: Duration,
}

impl Default for SnapshotFeedConfig {
    fn default() -> Self {
        Self {
            initial_price: dec!(4500.00),
            tick_size: dec!(0.25),
            levels: vec![
                MarketLevel::new(dec!(4500.50), LevelCategory::GammaWall0Dte),
                MarketLevel::new(dec!(4501.00), LevelCategory::CallResistance),
                MarketLevel::new(dec!(4497.50), LevelCategory::PutSupport),
                MarketLevel::new(dec!(4495.00), LevelCategory::Hvl),
                MarketLevel::new(dec!(4510.00), LevelCategory::GammaWallStd),
                MarketLevel::new(dec!(4515.00), LevelCategory::CallResistanceStd),
                MarketLevel::new(dec!(4485.00), LevelCategory::PutSupportStd),
                MarketLevel::new(dec!(4492.00), LevelCategory::HvlStd),
                MarketLevel::new(dec!(4503.00), LevelCategory::BlindSpot(1)),
                MarketLevel::new(dec!(4506.25), LevelCategory::GexLevel(1)),
                MarketLevel::new(dec!(4494.25), LevelCategory::GexLevel(2)),
            ],
            max_step_ticks: 4,
            bias_step: 0.15,
            initial_vix: 18.0,
            vix_bounds: (9.0, 60.0),
            flow_noise: 0.2,
            level_refresh: Duration::minutes(5),
        }
    }
}

impl SnapshotFeedConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.tick_size <= Decimal::ZERO {
            return Err(format!("tick size must be positive, got {}", self.tick_size));
        }
        if self.max_step_ticks < 0 {
            return Err(format!(
                "max step must not be negative, got {} ticks",
                self.max_step_ticks
            ));
        }
        if !self.bias_step.is_finite() || self.bias_step < 0.0 {
            return Err(format!("bias step must be non-negative, got {}", self.bias_step));
        }
        let (low, high) = self.vix_bounds;
        if !(low.is_finite() && high.is_finite() && low <= high) {
            return Err(format!("vix bounds ({low}, {high}) are not an ordered range"));
        }
        if self.level_refresh <= Duration::zero() {
            return Err("level refresh interval must be positive".to_string());
        }
        Ok(())
    }
}

/// Generates market snapshots
pub struct SnapshotFeedSimulator {
    config: SnapshotFeedConfig,
    clock: Arc<dyn Clock>,
    price: Decimal,
    bias: f64,
    vix: f64,
    cumulative_delta: f64,
    levels: LevelSet,
    rng: StdRng,
}

impl SnapshotFeedSimulator {
    /// Feed seeded from entropy
    pub fn new(config: SnapshotFeedConfig, clock: Arc<dyn Clock>) -> EngineResult<Self> {
        Self::build(config, clock, StdRng::from_entropy())
    }

    /// Feed with a specific seed for reproducible replays
    pub fn with_seed(
        config: SnapshotFeedConfig,
        clock: Arc<dyn Clock>,
        seed: u64,
    ) -> EngineResult<Self> {
        Self::build(config, clock, StdRng::seed_from_u64(seed))
    }

    fn build(config: SnapshotFeedConfig, clock: Arc<dyn Clock>, rng: StdRng) -> EngineResult<Self> {
        config.validate().map_err(EngineError::InvalidConfig)?;
        let levels = LevelSet::new(config.levels.clone(), clock.now())?;
        Ok(Self {
            price: config.initial_price,
            bias: 0.0,
            vix: config.initial_vix,
            cumulative_delta: 0.0,
            levels,
            config,
            clock,
            rng,
        })
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Advance every input one step and capture them at the clock's instant
    pub fn next_snapshot(&mut self) -> EngineResult<MarketSnapshot> {
        let now = self.clock.now();
        self.refresh_levels()?;

        let max_step = self.config.max_step_ticks;
        let step: i64 = self.rng.gen_range(-max_step..=max_step);
        self.price = (self.price + self.config.tick_size * Decimal::from(step))
            .max(self.config.tick_size);

        let bias_step = self.config.bias_step;
        self.bias = (self.bias + self.rng.gen_range(-bias_step..=bias_step)).clamp(-1.0, 1.0);

        let (low, high) = self.config.vix_bounds;
        self.vix = (self.vix + self.rng.gen_range(-1.0..=1.0)).clamp(low, high);

        let flow = self.next_flow(step, now);

        debug!(
            "[FEED] {} price={} bias={:+.2} vix={:.1} flow={:?}/{:.2}",
            now, self.price, self.bias, self.vix, flow.pressure, flow.delta_ratio
        );

        MarketSnapshot::builder(now)
            .price(PriceSnapshot::new(self.price, self.config.tick_size, now))
            .levels(self.levels.clone())
            .bias(BiasSignal::new(self.bias, now))
            .order_flow(flow)
            .vix(VixLevel::new(self.vix, now))
            .build()
    }

    fn refresh_levels(&mut self) -> EngineResult<()> {
        if self.clock.since(self.levels.published_at()) >= self.config.level_refresh {
            self.levels = LevelSet::new(self.config.levels.clone(), self.clock.now())?;
        }
        Ok(())
    }

    /// Order flow follows the price move unless noise flips it
    fn next_flow(&mut self, step: i64, now: Timestamp) -> OrderFlowSnapshot {
        let mut direction = step.signum() as f64;
        if self.rng.gen_bool(self.config.flow_noise.clamp(0.0, 1.0)) {
            direction = -direction;
        }

        let pressure = match direction {
            d if d > 0.0 => Pressure::Up,
            d if d < 0.0 => Pressure::Down,
            _ => Pressure::Neutral,
        };
        let magnitude: f64 = self.rng.gen_range(0.0..0.6);
        let delta_ratio = if direction == 0.0 {
            self.rng.gen_range(-0.1..=0.1)
        } else {
            direction * magnitude
        };
        let volume: f64 = self.rng.gen_range(100.0..1_000.0);
        self.cumulative_delta += delta_ratio * volume;

        OrderFlowSnapshot::new(pressure, delta_ratio, self.cumulative_delta, now)
    }

    /// Send `num_ticks` snapshots, advancing the replay clock by `step` after each
    ///
    /// The clock moves only once a send is accepted, so over a channel of
    /// capacity `n` the consumer sees snapshots at most `(n + 1) * step` old.
    /// Keep that under the order-flow age limit. Stops early if the receiver
    /// is dropped. Returns the number sent.
    pub async fn replay_ticks(
        &mut self,
        clock: &ReplayClock,
        tx: &mpsc::Sender<MarketSnapshot>,
        num_ticks: usize,
        step: Duration,
    ) -> EngineResult<usize> {
        let mut sent = 0;
        for _ in 0..num_ticks {
            let snapshot = self.next_snapshot()?;
            if tx.send(snapshot).await.is_err() {
                break;
            }
            sent += 1;
            clock.advance(step);
        }
        Ok(sent)
    }

    /// Send `num_ticks` snapshots in real time, `interval` apart
    pub async fn run_ticks(
        &mut self,
        tx: &mpsc::Sender<MarketSnapshot>,
        num_ticks: usize,
        interval: std::time::Duration,
    ) -> EngineResult<usize> {
        let mut sent = 0;
        for _ in 0..num_ticks {
            let snapshot = self.next_snapshot()?;
            if tx.send(snapshot).await.is_err() {
                break;
            }
            sent += 1;
            tokio::time::sleep(interval).await;
        }
        Ok(sent)
    }
}
