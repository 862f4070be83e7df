//! In-memory execution boundary for replays.

use async_trait::async_trait;
use levelgate_core::TradingDecision;
use levelgate_ports::{DecisionSink, SinkError};
use log::{info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

/// Records every decision it accepts
///
/// Refuses Neutral or zero-multiplier decisions, like a real execution
/// boundary must.
#[derive(Debug, Default)]
pub struct RecordingSink {
    accepted: RwLock<Vec<TradingDecision>>,
    closed: AtomicBool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse everything from now on
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    pub async fn accepted(&self) -> Vec<TradingDecision> {
        self.accepted.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.accepted.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.accepted.read().await.is_empty()
    }
}

#[async_trait]
impl DecisionSink for RecordingSink {
    async fn submit(&self, decision: TradingDecision) -> Result<(), SinkError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(SinkError::Closed);
        }
        if !decision.is_actionable() {
            warn!(
                "[SINK] Refused {} ({:?}, multiplier {:.2})",
                decision.evaluation_id(),
                decision.direction(),
                decision.position_multiplier()
            );
            return Err(SinkError::NotActionable(decision.evaluation_id().to_string()));
        }

        info!(
            "[SINK] Accepted {} {:?} {:?} x{:.2}",
            decision.evaluation_id(),
            decision.direction(),
            decision.strength(),
            decision.position_multiplier()
        );
        self.accepted.write().await.push(decision);
        Ok(())
    }

    fn name(&self) -> &str {
        "RecordingSink"
    }
}
