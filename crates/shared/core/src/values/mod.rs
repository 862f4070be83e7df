use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Price value - uses Decimal for precision
pub type Price = Decimal;

/// Absolute distance between two prices expressed in whole ticks
pub type TickDistance = u32;

/// Timestamp in UTC
pub type Timestamp = DateTime<Utc>;
