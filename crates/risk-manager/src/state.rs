//! Risk State
//!
//! The single mutable record behind the governor. Every method here assumes
//! the caller holds the governor's lock; nothing in this module synchronizes.

use chrono::NaiveDate;
use levelgate_core::Timestamp;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// Kill-switch state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GovernorState {
    /// Trading permitted
    Armed,
    /// Kill switch engaged; every decision is forced Neutral
    Tripped,
}

/// Why the kill switch was engaged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TripReason {
    DailyLossLimit,
    TradeCountLimit,
    EmergencyStop,
}

impl fmt::Display for TripReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TripReason::DailyLossLimit => write!(f, "daily loss limit"),
            TripReason::TradeCountLimit => write!(f, "trade count limit"),
            TripReason::EmergencyStop => write!(f, "emergency stop"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripEvent {
    pub reason: TripReason,
    pub at: Timestamp,
    pub detail: String,
}

/// Daily risk counters and kill-switch state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskState {
    state: GovernorState,
    /// Sum of losing trades' magnitudes; wins never reduce it
    daily_realized_loss: Decimal,
    /// Net realized P&L, reporting only
    daily_net_pnl: Decimal,
    trade_count_today: u32,
    day_start: NaiveDate,
    trips: Vec<TripEvent>,
}

impl RiskState {
    pub fn new(day_start: NaiveDate) -> Self {
        Self {
            state: GovernorState::Armed,
            daily_realized_loss: Decimal::ZERO,
            daily_net_pnl: Decimal::ZERO,
            trade_count_today: 0,
            day_start,
            trips: Vec::new(),
        }
    }

    pub fn state(&self) -> GovernorState {
        self.state
    }

    pub fn is_tripped(&self) -> bool {
        self.state == GovernorState::Tripped
    }

    pub fn kill_switch_engaged(&self) -> bool {
        self.is_tripped()
    }

    pub fn daily_realized_loss(&self) -> Decimal {
        self.daily_realized_loss
    }

    pub fn daily_net_pnl(&self) -> Decimal {
        self.daily_net_pnl
    }

    pub fn trade_count_today(&self) -> u32 {
        self.trade_count_today
    }

    pub fn day_start(&self) -> NaiveDate {
        self.day_start
    }

    /// Trips recorded since the last daily reset
    pub fn trips(&self) -> &[TripEvent] {
        &self.trips
    }

    pub fn last_trip(&self) -> Option<&TripEvent> {
        self.trips.last()
    }

    /// Tripped by an emergency stop, which only an explicit reset clears
    pub fn emergency_stopped(&self) -> bool {
        self.is_tripped()
            && self
                .trips
                .iter()
                .any(|trip| trip.reason == TripReason::EmergencyStop)
    }

    /// Count a closed trade and accumulate its loss
    pub(crate) fn record_trade(&mut self, pnl: Decimal) {
        self.trade_count_today = self.trade_count_today.saturating_add(1);
        self.daily_net_pnl += pnl;
        if pnl < Decimal::ZERO {
            self.daily_realized_loss += pnl.abs();
        }
    }

    /// Engage the kill switch; returns true on the Armed → Tripped transition
    ///
    /// Every call is kept in the trip history, even when already tripped.
    pub(crate) fn trip(&mut self, reason: TripReason, at: Timestamp, detail: String) -> bool {
        self.trips.push(TripEvent { reason, at, detail });
        let transitioned = self.state == GovernorState::Armed;
        self.state = GovernorState::Tripped;
        transitioned
    }

    /// Zero the counters and re-arm for `day`
    ///
    /// No-op unless `day` is after the current day.
    pub(crate) fn reset_for_day(&mut self, day: NaiveDate) -> bool {
        if day <= self.day_start {
            return false;
        }
        *self = RiskState::new(day);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    #[test]
    fn test_wins_do_not_reduce_loss() {
        let mut state = RiskState::new(day(3));
        state.record_trade(dec!(-300));
        state.record_trade(dec!(500));
        state.record_trade(dec!(-200));

        assert_eq!(state.daily_realized_loss(), dec!(500));
        assert_eq!(state.daily_net_pnl(), dec!(0));
        assert_eq!(state.trade_count_today(), 3);
    }

    #[test]
    fn test_trip_history_kept() {
        let mut state = RiskState::new(day(3));
        assert!(state.trip(TripReason::DailyLossLimit, Utc::now(), "loss".into()));
        assert!(!state.trip(TripReason::EmergencyStop, Utc::now(), "operator".into()));

        assert!(state.is_tripped());
        assert_eq!(state.trips().len(), 2);
        assert!(state.emergency_stopped());
    }

    #[test]
    fn test_reset_only_on_later_day() {
        let mut state = RiskState::new(day(3));
        state.record_trade(dec!(-100));
        state.trip(TripReason::EmergencyStop, Utc::now(), "test".into());

        assert!(!state.reset_for_day(day(3)));
        assert!(!state.reset_for_day(day(2)));
        assert!(state.is_tripped());

        assert!(state.reset_for_day(day(4)));
        assert_eq!(state, RiskState::new(day(4)));
    }
}
