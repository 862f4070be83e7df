//! Domain validation errors

use crate::values::Price;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("tick size must be positive, got {0}")]
    NonPositiveTickSize(Price),

    #[error("price must be positive, got {0}")]
    NonPositivePrice(Price),

    #[error("duplicate level {category} at {price}")]
    DuplicateLevel { price: Price, category: String },

    #[error("{kind} index {index} outside 1..=10")]
    LevelIndexOutOfRange { kind: &'static str, index: u8 },

    #[error("bias score {0} outside [-1, 1]")]
    BiasOutOfRange(f64),

    #[error("{field} is not a finite number")]
    NotFinite { field: &'static str },

    #[error("vix value {0} is negative")]
    NegativeVix(f64),
}

pub type DomainResult<T> = std::result::Result<T, DomainError>;
