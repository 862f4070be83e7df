//! Risk Governor
//!
//! Last stage of every evaluation and the only owner of [`RiskState`]. Every
//! read-modify-write happens under one mutex so concurrent pipelines cannot
//! lose loss or trade-count updates. A poisoned lock fails closed with
//! [`EngineError::RiskGovernorUnavailable`].
//!
//! The trading day always comes from the governor's own clock, never from
//! caller-supplied timestamps.

use crate::parameters::RiskLimits;
use crate::state::{RiskState, TripReason};
use chrono::NaiveDate;
use levelgate_core::{GovernedDecision, SizedDecision, Timestamp};
use levelgate_ports::{Clock, EngineError, EngineResult, RiskControl};
use log::{debug, error, info, warn};
use rust_decimal::Decimal;
use std::sync::{Arc, Mutex, MutexGuard};

pub struct RiskGovernor {
    limits: RiskLimits,
    state: Mutex<RiskState>,
    clock: Arc<dyn Clock>,
}

impl RiskGovernor {
    /// Armed governor whose first trading day is the clock's current day
    pub fn new(limits: RiskLimits, clock: Arc<dyn Clock>) -> Self {
        let day_start = limits.trading_day(clock.now());
        info!(
            "[GOVERNOR] Armed for {} (max loss {}, max trades {}, clock {})",
            day_start,
            limits.max_daily_loss,
            limits.max_trades_per_day,
            clock.name()
        );
        Self {
            limits,
            state: Mutex::new(RiskState::new(day_start)),
            clock,
        }
    }

    pub fn limits(&self) -> &RiskLimits {
        &self.limits
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    fn lock(&self) -> EngineResult<MutexGuard<'_, RiskState>> {
        self.state.lock().map_err(|_| {
            error!("[GOVERNOR] Risk state lock poisoned - failing closed");
            EngineError::RiskGovernorUnavailable("risk state lock poisoned".to_string())
        })
    }

    /// Time-based daily roll
    ///
    /// An emergency stop holds the old day open so only an explicit reset
    /// can re-arm it.
    fn roll_if_new_day(&self, state: &mut RiskState, at: Timestamp) {
        if !self.limits.auto_reset_on_new_day {
            return;
        }
        let day = self.limits.trading_day(at);
        if day <= state.day_start() {
            return;
        }
        if state.emergency_stopped() {
            debug!(
                "[GOVERNOR] Emergency stop from {} held across day boundary",
                state.day_start()
            );
            return;
        }
        let previous = state.day_start();
        let was_tripped = state.is_tripped();
        state.reset_for_day(day);
        info!(
            "[GOVERNOR] New trading day {} (from {}){}",
            day,
            previous,
            if was_tripped { ", kill switch re-armed" } else { "" }
        );
    }

    /// Rule on a sized decision at the clock's current instant
    pub fn evaluate(&self, sized: SizedDecision) -> EngineResult<GovernedDecision> {
        let at = self.clock.now();
        let mut state = self.lock()?;
        self.roll_if_new_day(&mut state, at);

        if state.is_tripped() {
            let reason = match state.last_trip() {
                Some(trip) => format!("kill switch engaged ({})", trip.reason),
                None => "kill switch engaged".to_string(),
            };
            if sized.is_actionable() {
                warn!(
                    "[GOVERNOR] Vetoed {:?} {}: {}",
                    sized.direction(),
                    sized.draft().evaluation_id,
                    reason
                );
            }
            return Ok(GovernedDecision::veto(sized, reason));
        }

        if sized.is_actionable() && state.trade_count_today() >= self.limits.max_trades_per_day {
            let reason = format!(
                "trade limit reached ({}/{})",
                state.trade_count_today(),
                self.limits.max_trades_per_day
            );
            warn!(
                "[GOVERNOR] Vetoed {:?} {}: {}",
                sized.direction(),
                sized.draft().evaluation_id,
                reason
            );
            return Ok(GovernedDecision::veto(sized, reason));
        }

        debug!(
            "[GOVERNOR] Allowed {:?} {} (loss {} / {}, trades {} / {})",
            sized.direction(),
            sized.draft().evaluation_id,
            state.daily_realized_loss(),
            self.limits.max_daily_loss,
            state.trade_count_today(),
            self.limits.max_trades_per_day
        );
        Ok(GovernedDecision::allow(sized))
    }

    /// Engage the kill switch as an emergency stop
    pub fn trip(&self, detail: &str) -> EngineResult<()> {
        let at = self.clock.now();
        let mut state = self.lock()?;
        if state.trip(TripReason::EmergencyStop, at, detail.to_string()) {
            error!("[GOVERNOR] Kill switch engaged: emergency stop ({detail})");
        } else {
            warn!("[GOVERNOR] Emergency stop while already tripped ({detail})");
        }
        Ok(())
    }

    /// Explicit reset; only takes effect on a later trading day
    pub fn reset_for_new_day(&self, trading_day: NaiveDate) -> EngineResult<bool> {
        let mut state = self.lock()?;
        let current = state.day_start();
        if !state.reset_for_day(trading_day) {
            warn!(
                "[GOVERNOR] Ignored reset for {} (current day {})",
                trading_day, current
            );
            return Ok(false);
        }
        info!("[GOVERNOR] Reset for {} - armed, counters zeroed", trading_day);
        Ok(true)
    }

    /// Feed a closed trade; trips when a limit is exceeded
    pub fn record_trade_result(&self, pnl: Decimal) -> EngineResult<()> {
        let at = self.clock.now();
        let mut state = self.lock()?;
        self.roll_if_new_day(&mut state, at);

        state.record_trade(pnl);
        debug!(
            "[GOVERNOR] Trade result {} (loss {}, trades {})",
            pnl,
            state.daily_realized_loss(),
            state.trade_count_today()
        );

        if state.daily_realized_loss() > self.limits.max_daily_loss {
            let detail = format!(
                "realized loss {} exceeds {}",
                state.daily_realized_loss(),
                self.limits.max_daily_loss
            );
            if state.trip(TripReason::DailyLossLimit, at, detail.clone()) {
                error!("[GOVERNOR] Kill switch engaged: {detail}");
            }
        }

        if state.trade_count_today() > self.limits.max_trades_per_day {
            let detail = format!(
                "{} trades exceeds {}",
                state.trade_count_today(),
                self.limits.max_trades_per_day
            );
            if state.trip(TripReason::TradeCountLimit, at, detail.clone()) {
                error!("[GOVERNOR] Kill switch engaged: {detail}");
            }
        }

        Ok(())
    }

    pub fn is_tripped(&self) -> EngineResult<bool> {
        Ok(self.lock()?.is_tripped())
    }

    /// Point-in-time copy of the risk state
    pub fn snapshot(&self) -> EngineResult<RiskState> {
        Ok(self.lock()?.clone())
    }
}

impl RiskControl for RiskGovernor {
    fn trip(&self, detail: &str) -> EngineResult<()> {
        RiskGovernor::trip(self, detail)
    }

    fn reset_for_new_day(&self, trading_day: NaiveDate) -> EngineResult<bool> {
        RiskGovernor::reset_for_new_day(self, trading_day)
    }

    fn record_trade_result(&self, pnl: Decimal) -> EngineResult<()> {
        RiskGovernor::record_trade_result(self, pnl)
    }

    fn is_tripped(&self) -> EngineResult<bool> {
        RiskGovernor::is_tripped(self)
    }
}
