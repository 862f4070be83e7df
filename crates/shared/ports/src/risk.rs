use crate::error::EngineResult;
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Risk control surface exposed to the execution boundary
///
/// Every call is applied atomically against the single owned risk state.
pub trait RiskControl: Send + Sync {
    /// Engage the kill switch (emergency stop)
    fn trip(&self, detail: &str) -> EngineResult<()>;

    /// Re-arm and zero the daily counters for `trading_day`
    ///
    /// Returns `false` when `trading_day` is not after the current day,
    /// in which case nothing changes.
    fn reset_for_new_day(&self, trading_day: NaiveDate) -> EngineResult<bool>;

    /// Feed a closed trade's P&L; counts the trade and accumulates losses
    fn record_trade_result(&self, pnl: Decimal) -> EngineResult<()>;

    /// Is the kill switch engaged?
    fn is_tripped(&self) -> EngineResult<bool>;
}
