use async_trait::async_trait;
use levelgate_core::TradingDecision;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SinkError {
    #[error("decision {0} is not actionable")]
    NotActionable(String),

    #[error("execution boundary closed")]
    Closed,
}

/// Port for the execution boundary
///
/// Implementations translate decisions into broker orders and must refuse
/// anything that is Neutral or carries a zero multiplier.
#[async_trait]
pub trait DecisionSink: Send + Sync {
    async fn submit(&self, decision: TradingDecision) -> Result<(), SinkError>;

    fn name(&self) -> &str {
        "DecisionSink"
    }
}
