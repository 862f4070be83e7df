//! Evaluation Session
//!
//! Drains snapshots from a channel through one shared pipeline. Failed
//! evaluations are counted and skipped; actionable decisions are handed to
//! the execution sink.

use levelgate_core::{Direction, GovernorVerdict, OrderFlowOutcome, TradingDecision};
use levelgate_pipeline::{DecisionPipeline, MarketSnapshot, StatsSnapshot};
use levelgate_ports::{DecisionSink, EngineError};
use log::{info, warn};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Session results
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionResults {
    /// Snapshots received
    pub snapshots: u64,
    /// Decisions produced
    pub decisions: u64,
    pub longs: u64,
    pub shorts: u64,
    pub neutrals: u64,
    pub demotions: u64,
    pub vetoes: u64,
    /// Decisions accepted by the sink
    pub submitted: u64,
    pub sink_errors: u64,
    pub invalid_input_failures: u64,
    pub stale_data_failures: u64,
    pub governor_failures: u64,
    /// Pipeline counters at the end of the session
    pub pipeline: StatsSnapshot,
}

impl SessionResults {
    pub fn failures(&self) -> u64 {
        self.invalid_input_failures + self.stale_data_failures + self.governor_failures
    }

    fn record_decision(&mut self, decision: &TradingDecision) {
        self.decisions += 1;
        match decision.direction() {
            Direction::Long => self.longs += 1,
            Direction::Short => self.shorts += 1,
            Direction::Neutral => self.neutrals += 1,
        }
        if matches!(decision.order_flow(), OrderFlowOutcome::Rejected(_)) {
            self.demotions += 1;
        }
        if matches!(decision.verdict(), GovernorVerdict::Vetoed { .. }) {
            self.vetoes += 1;
        }
    }

    fn record_failure(&mut self, error: &EngineError) {
        match error {
            EngineError::StaleData { .. } => self.stale_data_failures += 1,
            EngineError::RiskGovernorUnavailable(_) => self.governor_failures += 1,
            EngineError::InvalidInput { .. } | EngineError::InvalidConfig(_) => {
                self.invalid_input_failures += 1
            }
        }
    }

    /// Pretty JSON summary
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

pub struct EvaluationSession {
    pipeline: Arc<DecisionPipeline>,
    sink: Arc<dyn DecisionSink>,
}

impl EvaluationSession {
    pub fn new(pipeline: Arc<DecisionPipeline>, sink: Arc<dyn DecisionSink>) -> Self {
        Self { pipeline, sink }
    }

    pub fn pipeline(&self) -> &Arc<DecisionPipeline> {
        &self.pipeline
    }

    /// Evaluate until the sender side closes
    pub async fn run(&self, mut snapshots: mpsc::Receiver<MarketSnapshot>) -> SessionResults {
        info!("[SESSION] Started with sink {}", self.sink.name());
        let mut results = SessionResults::default();

        while let Some(snapshot) = snapshots.recv().await {
            results.snapshots += 1;

            let decision = match self.pipeline.evaluate(&snapshot) {
                Ok(decision) => decision,
                Err(e) => {
                    results.record_failure(&e);
                    continue;
                }
            };

            results.record_decision(&decision);
            if !decision.is_actionable() {
                continue;
            }

            match self.sink.submit(decision).await {
                Ok(()) => results.submitted += 1,
                Err(e) => {
                    warn!("[SESSION] Sink {} rejected decision: {}", self.sink.name(), e);
                    results.sink_errors += 1;
                }
            }
        }

        results.pipeline = self.pipeline.stats().snapshot();
        info!(
            "[SESSION] Finished: {} snapshots, {} decisions, {} submitted, {} failed",
            results.snapshots,
            results.decisions,
            results.submitted,
            results.failures()
        );
        results
    }
}
