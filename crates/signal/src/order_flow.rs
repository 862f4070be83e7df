//! Order-Flow Confirmation
//!
//! A directional call only survives if live order flow agrees with it:
//!
//! - Long: pressure Up, delta ratio above +threshold, cumulative delta positive
//! - Short: pressure Down, delta ratio below -threshold, cumulative delta negative
//!
//! A failed call is demoted to Neutral, never dropped.

use crate::config::OrderFlowConfig;
use levelgate_core::{Direction, OrderFlowSnapshot, Pressure, ScoredDecision, ValidatedDecision};
use log::{debug, warn};

#[derive(Debug, Clone, Default)]
pub struct OrderFlowValidator {
    config: OrderFlowConfig,
}

impl OrderFlowValidator {
    pub fn new(config: OrderFlowConfig) -> Self {
        Self { config }
    }

    /// Every check `flow` fails for `direction`; empty means confirmed
    pub fn failed_checks(&self, direction: Direction, flow: &OrderFlowSnapshot) -> Vec<String> {
        let threshold = self.config.delta_ratio_threshold;
        let mut failed = Vec::new();

        match direction {
            Direction::Long => {
                if flow.pressure != Pressure::Up {
                    failed.push(format!("pressure {:?} is not Up", flow.pressure));
                }
                if flow.delta_ratio <= threshold {
                    failed.push(format!(
                        "delta ratio {:.3} not above +{:.2}",
                        flow.delta_ratio, threshold
                    ));
                }
                if flow.cumulative_delta <= 0.0 {
                    failed.push(format!(
                        "cumulative delta {:.1} not positive",
                        flow.cumulative_delta
                    ));
                }
            }
            Direction::Short => {
                if flow.pressure != Pressure::Down {
                    failed.push(format!("pressure {:?} is not Down", flow.pressure));
                }
                if flow.delta_ratio >= -threshold {
                    failed.push(format!(
                        "delta ratio {:.3} not below -{:.2}",
                        flow.delta_ratio, threshold
                    ));
                }
                if flow.cumulative_delta >= 0.0 {
                    failed.push(format!(
                        "cumulative delta {:.1} not negative",
                        flow.cumulative_delta
                    ));
                }
            }
            Direction::Neutral => {}
        }

        failed
    }

    pub fn validate(&self, scored: ScoredDecision, flow: &OrderFlowSnapshot) -> ValidatedDecision {
        let direction = scored.direction();
        if !direction.is_directional() {
            return ValidatedDecision::pass_through(scored);
        }

        let failed = self.failed_checks(direction, flow);
        if failed.is_empty() {
            debug!(
                "[ORDER_FLOW] {} {:?} confirmed (pressure {:?}, ratio {:.3}, cum {:.1})",
                scored.draft().evaluation_id,
                direction,
                flow.pressure,
                flow.delta_ratio,
                flow.cumulative_delta
            );
            ValidatedDecision::confirmed(scored)
        } else {
            warn!(
                "[ORDER_FLOW] {} {:?} demoted: {}",
                scored.draft().evaluation_id,
                direction,
                failed.join(", ")
            );
            ValidatedDecision::demoted(scored, failed)
        }
    }
}
