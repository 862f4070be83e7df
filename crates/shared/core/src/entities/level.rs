use crate::error::{DomainError, DomainResult};
use crate::values::Price;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a published market-structure level
///
/// The first four variants are the same-day (0DTE) family, the `*Std`
/// variants come from the standard expiry chain. Blind spots and GEX levels
/// are numbered 1 through 10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LevelCategory {
    GammaWall0Dte,
    CallResistance,
    PutSupport,
    Hvl,
    GammaWallStd,
    CallResistanceStd,
    PutSupportStd,
    HvlStd,
    BlindSpot(u8),
    GexLevel(u8),
}

impl LevelCategory {
    /// Blind spot level `index` (1..=10)
    pub fn blind_spot(index: u8) -> DomainResult<Self> {
        let category = LevelCategory::BlindSpot(index);
        category.validate()?;
        Ok(category)
    }

    /// GEX level `index` (1..=10)
    pub fn gex(index: u8) -> DomainResult<Self> {
        let category = LevelCategory::GexLevel(index);
        category.validate()?;
        Ok(category)
    }

    /// Check numbered categories stay within 1..=10
    pub fn validate(&self) -> DomainResult<()> {
        match *self {
            LevelCategory::BlindSpot(index) if !(1..=10).contains(&index) => {
                Err(DomainError::LevelIndexOutOfRange {
                    kind: "blind spot",
                    index,
                })
            }
            LevelCategory::GexLevel(index) if !(1..=10).contains(&index) => {
                Err(DomainError::LevelIndexOutOfRange { kind: "gex", index })
            }
            _ => Ok(()),
        }
    }

    /// Gamma walls (either expiry) earn the critical-level bonus
    pub fn is_gamma_wall(&self) -> bool {
        matches!(
            self,
            LevelCategory::GammaWall0Dte | LevelCategory::GammaWallStd
        )
    }

    /// Same-day expiry family
    pub fn is_same_day(&self) -> bool {
        matches!(
            self,
            LevelCategory::GammaWall0Dte
                | LevelCategory::CallResistance
                | LevelCategory::PutSupport
                | LevelCategory::Hvl
        )
    }
}

impl fmt::Display for LevelCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelCategory::GammaWall0Dte => write!(f, "gamma_wall_0dte"),
            LevelCategory::CallResistance => write!(f, "call_resistance_0dte"),
            LevelCategory::PutSupport => write!(f, "put_support_0dte"),
            LevelCategory::Hvl => write!(f, "hvl_0dte"),
            LevelCategory::GammaWallStd => write!(f, "gamma_wall"),
            LevelCategory::CallResistanceStd => write!(f, "call_resistance"),
            LevelCategory::PutSupportStd => write!(f, "put_support"),
            LevelCategory::HvlStd => write!(f, "hvl"),
            LevelCategory::BlindSpot(index) => write!(f, "bl_{index}"),
            LevelCategory::GexLevel(index) => write!(f, "gex_{index}"),
        }
    }
}

/// A priced structural level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarketLevel {
    /// Level price
    pub price: Price,
    /// What kind of level this is
    pub category: LevelCategory,
    /// Tied to options expiring today
    pub is_0dte: bool,
}

impl MarketLevel {
    /// Create a level; the 0DTE flag follows the category family
    pub fn new(price: Price, category: LevelCategory) -> Self {
        Self {
            price,
            category,
            is_0dte: category.is_same_day(),
        }
    }

    /// Builder: override the 0DTE flag
    pub fn with_0dte(mut self, is_0dte: bool) -> Self {
        self.is_0dte = is_0dte;
        self
    }

    /// Gamma wall or same-day level
    pub fn is_critical(&self) -> bool {
        self.category.is_gamma_wall() || self.is_0dte
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.price <= Price::ZERO {
            return Err(DomainError::NonPositivePrice(self.price));
        }
        self.category.validate()
    }
}
