//! Per-pipeline counters, safe to bump from concurrent evaluations.

use levelgate_core::{GovernorVerdict, OrderFlowOutcome, TradingDecision};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct PipelineStats {
    evaluations: AtomicU64,
    failures: AtomicU64,
    actionable: AtomicU64,
    demotions: AtomicU64,
    vetoes: AtomicU64,
    budget_overruns: AtomicU64,
}

/// Point-in-time copy of [`PipelineStats`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub evaluations: u64,
    pub failures: u64,
    pub actionable: u64,
    pub demotions: u64,
    pub vetoes: u64,
    pub budget_overruns: u64,
}

impl PipelineStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_decision(&self, decision: &TradingDecision) {
        self.evaluations.fetch_add(1, Ordering::Relaxed);
        if decision.is_actionable() {
            self.actionable.fetch_add(1, Ordering::Relaxed);
        }
        if matches!(decision.order_flow(), OrderFlowOutcome::Rejected(_)) {
            self.demotions.fetch_add(1, Ordering::Relaxed);
        }
        if matches!(decision.verdict(), GovernorVerdict::Vetoed { .. }) {
            self.vetoes.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub(crate) fn record_failure(&self) {
        self.evaluations.fetch_add(1, Ordering::Relaxed);
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_budget_overrun(&self) {
        self.budget_overruns.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            evaluations: self.evaluations.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
            actionable: self.actionable.load(Ordering::Relaxed),
            demotions: self.demotions.load(Ordering::Relaxed),
            vetoes: self.vetoes.load(Ordering::Relaxed),
            budget_overruns: self.budget_overruns.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failures_count_as_evaluations() {
        let stats = PipelineStats::new();
        stats.record_failure();
        stats.record_failure();
        stats.record_budget_overrun();

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.evaluations, 2);
        assert_eq!(snapshot.failures, 2);
        assert_eq!(snapshot.actionable, 0);
        assert_eq!(snapshot.budget_overruns, 1);
    }
}
