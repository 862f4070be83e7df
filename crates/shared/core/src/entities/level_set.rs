use crate::entities::level::MarketLevel;
use crate::error::{DomainError, DomainResult};
use crate::values::Timestamp;
use serde::Serialize;

/// Immutable snapshot of the levels published for one evaluation cycle
///
/// Levels are kept sorted by (price, category) and are unique on that key.
#[derive(Debug, Clone, Serialize)]
pub struct LevelSet {
    levels: Vec<MarketLevel>,
    published_at: Timestamp,
}

impl LevelSet {
    /// Validate and freeze a set of levels
    pub fn new(mut levels: Vec<MarketLevel>, published_at: Timestamp) -> DomainResult<Self> {
        for level in &levels {
            level.validate()?;
        }

        levels.sort_by(|a, b| (a.price, a.category).cmp(&(b.price, b.category)));

        if let Some(pair) = levels
            .windows(2)
            .find(|w| w[0].price == w[1].price && w[0].category == w[1].category)
        {
            return Err(DomainError::DuplicateLevel {
                price: pair[0].price,
                category: pair[0].category.to_string(),
            });
        }

        Ok(Self {
            levels,
            published_at,
        })
    }

    /// An empty set (no structure published)
    pub fn empty(published_at: Timestamp) -> Self {
        Self {
            levels: Vec::new(),
            published_at,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &MarketLevel> {
        self.levels.iter()
    }

    pub fn levels(&self) -> &[MarketLevel] {
        &self.levels
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// When the market-structure feed published this set
    pub fn published_at(&self) -> Timestamp {
        self.published_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::level::LevelCategory;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    #[test]
    fn test_levels_sorted_by_price() {
        let set = LevelSet::new(
            vec![
                MarketLevel::new(dec!(4510), LevelCategory::CallResistanceStd),
                MarketLevel::new(dec!(4490), LevelCategory::PutSupportStd),
                MarketLevel::new(dec!(4500), LevelCategory::HvlStd),
            ],
            Utc::now(),
        )
        .unwrap();

        let prices: Vec<_> = set.iter().map(|l| l.price).collect();
        assert_eq!(prices, vec![dec!(4490), dec!(4500), dec!(4510)]);
    }

    #[test]
    fn test_duplicate_price_and_category_rejected() {
        let result = LevelSet::new(
            vec![
                MarketLevel::new(dec!(4500), LevelCategory::GexLevel(1)),
                MarketLevel::new(dec!(4500), LevelCategory::GexLevel(1)),
            ],
            Utc::now(),
        );

        assert!(matches!(result, Err(DomainError::DuplicateLevel { .. })));
    }

    #[test]
    fn test_same_price_different_category_allowed() {
        let set = LevelSet::new(
            vec![
                MarketLevel::new(dec!(4500), LevelCategory::GammaWall0Dte),
                MarketLevel::new(dec!(4500), LevelCategory::GammaWallStd),
            ],
            Utc::now(),
        )
        .unwrap();

        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_invalid_index_rejected() {
        let result = LevelSet::new(
            vec![MarketLevel::new(dec!(4500), LevelCategory::BlindSpot(12))],
            Utc::now(),
        );
        assert!(result.is_err());
    }
}
