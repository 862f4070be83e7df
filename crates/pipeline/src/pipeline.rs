//! Decision Pipeline
//!
//! One evaluation per call, from one validated snapshot:
//!
//! ```text
//! snapshot ─► validate + freshness ─► proximity ─► confluence ─► composite
//!          ─► order flow ─► sizing ─► risk governor ─► TradingDecision
//! ```
//!
//! Any failure aborts the whole evaluation; nothing partial is returned.
//! Input ages are measured against the governor's clock.
//! Scoring stages share no state, so one pipeline can serve concurrent
//! callers; the governor serializes its own state.

use crate::config::EngineConfig;
use crate::snapshot::MarketSnapshot;
use crate::stats::PipelineStats;
use levelgate_core::{TradingDecision, VixRegime};
use levelgate_ports::{Clock, EngineError, EngineResult};
use levelgate_risk_manager::RiskGovernor;
use levelgate_signal::{
    CompositeScorer, ConfluenceAggregator, OrderFlowValidator, PositionSizer, ProximityScorer,
};
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

pub struct DecisionPipeline {
    config: Arc<EngineConfig>,
    proximity: ProximityScorer,
    confluence: ConfluenceAggregator,
    composite: CompositeScorer,
    order_flow: OrderFlowValidator,
    sizer: PositionSizer,
    governor: Arc<RiskGovernor>,
    stats: PipelineStats,
}

impl DecisionPipeline {
    /// Build the stages from a validated configuration
    pub fn new(config: Arc<EngineConfig>, governor: Arc<RiskGovernor>) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self {
            proximity: ProximityScorer::new(config.proximity),
            confluence: ConfluenceAggregator::new(config.confluence),
            composite: CompositeScorer::new(config.composite),
            order_flow: OrderFlowValidator::new(config.order_flow),
            sizer: PositionSizer::new(config.sizing),
            config,
            governor,
            stats: PipelineStats::new(),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn governor(&self) -> &Arc<RiskGovernor> {
        &self.governor
    }

    pub fn stats(&self) -> &PipelineStats {
        &self.stats
    }

    /// Evaluate one snapshot into a governed decision
    pub fn evaluate(&self, snapshot: &MarketSnapshot) -> EngineResult<TradingDecision> {
        let started = Instant::now();
        let result = self.run(snapshot);
        let elapsed = started.elapsed();

        match &result {
            Ok(decision) => {
                self.stats.record_decision(decision);
                info!(
                    "[PIPELINE] {} {:?} {:?} confidence={:.3} multiplier={:.2} ({}us)",
                    decision.evaluation_id(),
                    decision.direction(),
                    decision.strength(),
                    decision.confidence(),
                    decision.position_multiplier(),
                    elapsed.as_micros()
                );
            }
            Err(e) => {
                self.stats.record_failure();
                warn!("[PIPELINE] Evaluation at {} failed: {}", snapshot.as_of(), e);
            }
        }

        if elapsed > self.config.latency_budget() {
            self.stats.record_budget_overrun();
            warn!(
                "[PIPELINE] Latency budget exceeded: {}us > {}us",
                elapsed.as_micros(),
                self.config.latency_budget_us
            );
        }

        result
    }

    fn run(&self, snapshot: &MarketSnapshot) -> EngineResult<TradingDecision> {
        let now = self.governor.clock().now();
        snapshot.validate()?;
        snapshot.check_freshness(&self.config.staleness, now)?;

        let evaluation_id = Uuid::new_v4();
        let as_of = snapshot.as_of();
        debug!("[PIPELINE] {} evaluating snapshot at {}", evaluation_id, as_of);

        let proximity = self
            .proximity
            .score(snapshot.price(), snapshot.levels())
            .map_err(EngineError::from)?;
        let confluence = self.confluence.aggregate(&proximity);

        let scored = self.composite.score(
            proximity,
            snapshot.bias().score,
            confluence,
            evaluation_id,
            as_of,
        );
        let validated = self.order_flow.validate(scored, snapshot.order_flow());

        let stale_vix = snapshot.stale_vix_age(self.config.staleness.max_vix_age(), now);
        let regime = match stale_vix {
            Some(_) => VixRegime::Standard,
            None => self.sizer.regime_for(snapshot.vix().value),
        };
        let mut sized = self.sizer.size(validated, regime);
        if let Some(age) = stale_vix {
            warn!(
                "[PIPELINE] {} VIX reading {}s old, sizing with standard regime",
                evaluation_id,
                age.num_seconds()
            );
            sized = sized.with_note(format!(
                "VIX reading stale ({}s old), standard regime used",
                age.num_seconds()
            ));
        }

        let governed = self.governor.evaluate(sized)?;
        Ok(governed.finalize())
    }
}
