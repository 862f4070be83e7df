use levelgate_core::DomainError;
use std::fmt;
use thiserror::Error;

/// Input whose reading was too old to score against
///
/// VIX has no entry: a stale VIX falls back to the standard sizing bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    /// The snapshot as a whole, by its capture instant
    Snapshot,
    OrderFlow,
    Bias,
    Levels,
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::Snapshot => write!(f, "snapshot"),
            InputSource::OrderFlow => write!(f, "order flow"),
            InputSource::Bias => write!(f, "bias"),
            InputSource::Levels => write!(f, "level set"),
        }
    }
}

/// Typed failure of one evaluation
///
/// Every variant means "no decision this cycle". None of them ever
/// defaults to a directional call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("Stale {feed} data: {age_ms}ms old (max {max_age_ms}ms)")]
    StaleData {
        feed: InputSource,
        age_ms: i64,
        max_age_ms: i64,
    },

    #[error("Risk governor unavailable: {0}")]
    RiskGovernorUnavailable(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl EngineError {
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            reason: reason.into(),
        }
    }
}

impl From<DomainError> for EngineError {
    fn from(err: DomainError) -> Self {
        EngineError::InvalidInput {
            reason: err.to_string(),
        }
    }
}

pub type EngineResult<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_domain_error_maps_to_invalid_input() {
        let err: EngineError = DomainError::NonPositiveTickSize(Decimal::ZERO).into();
        assert!(matches!(err, EngineError::InvalidInput { .. }));
        assert!(err.to_string().contains("tick size"));
    }

    #[test]
    fn test_stale_message() {
        let err = EngineError::StaleData {
            feed: InputSource::OrderFlow,
            age_ms: 7000,
            max_age_ms: 5000,
        };
        assert_eq!(
            err.to_string(),
            "Stale order flow data: 7000ms old (max 5000ms)"
        );
    }

    #[test]
    fn test_late_snapshot_message() {
        let err = EngineError::StaleData {
            feed: InputSource::Snapshot,
            age_ms: 10_800_000,
            max_age_ms: 5000,
        };
        assert_eq!(
            err.to_string(),
            "Stale snapshot data: 10800000ms old (max 5000ms)"
        );
    }
}
