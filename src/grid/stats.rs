//! Ladder summary statistics.

use rust_decimal::Decimal;

use super::GridLevel;
use crate::Action;

/// Lowest and highest trigger price in a ladder.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PriceRange {
    pub min: Decimal,
    pub max: Decimal,
}

/// Fill state of a ladder.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridStatistics {
    pub total_levels: usize,
    pub filled_levels: usize,
    /// `filled_levels / total_levels`, zero for an empty ladder.
    pub utilization_rate: Decimal,
    pub buy_levels_filled: usize,
    pub sell_levels_filled: usize,
    /// `None` for an empty ladder.
    pub price_range: Option<PriceRange>,
}

impl GridStatistics {
    pub fn from_levels(levels: &[GridLevel]) -> Self {
        let total_levels = levels.len();
        let mut buy_levels_filled = 0;
        let mut sell_levels_filled = 0;
        for level in levels.iter().filter(|l| l.is_filled) {
            match level.action {
                Action::Buy => buy_levels_filled += 1,
                Action::Sell => sell_levels_filled += 1,
            }
        }
        let filled_levels = buy_levels_filled + sell_levels_filled;

        let utilization_rate = if total_levels > 0 {
            Decimal::from(filled_levels) / Decimal::from(total_levels)
        } else {
            Decimal::ZERO
        };

        let min = levels.iter().map(|l| l.trigger_price).min();
        let max = levels.iter().map(|l| l.trigger_price).max();
        let price_range = min.zip(max).map(|(min, max)| PriceRange { min, max });

        Self {
            total_levels,
            filled_levels,
            utilization_rate,
            buy_levels_filled,
            sell_levels_filled,
            price_range,
        }
    }
}

impl std::fmt::Display for GridStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Grid Statistics")?;
        writeln!(
            f,
            "  Levels filled:   {}/{} ({})",
            self.filled_levels,
            self.total_levels,
            crate::types::format_pct(self.utilization_rate)
        )?;
        writeln!(
            f,
            "  Buy/Sell filled: {}/{}",
            self.buy_levels_filled, self.sell_levels_filled
        )?;
        match self.price_range {
            Some(range) => writeln!(f, "  Price range:     {} .. {}", range.min, range.max),
            None => writeln!(f, "  Price range:     (empty ladder)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{GridConfig, GridEngine};
    use rust_decimal_macros::dec;

    #[test]
    fn fresh_ladder() {
        let e = GridEngine::new(GridConfig::new("SPY", dec!(100), dec!(5), 2, 2, dec!(1))).unwrap();
        let s = e.statistics();
        assert_eq!(s.total_levels, 4);
        assert_eq!(s.filled_levels, 0);
        assert_eq!(s.utilization_rate, Decimal::ZERO);
        assert_eq!(
            s.price_range,
            Some(PriceRange {
                min: dec!(90),
                max: dec!(110)
            })
        );
    }

    #[test]
    fn split_by_action() {
        let mut e =
            GridEngine::new(GridConfig::new("SPY", dec!(100), dec!(5), 2, 2, dec!(1))).unwrap();
        e.mark_filled(-1, dec!(95), dec!(1)).unwrap();
        e.mark_filled(-2, dec!(90), dec!(1)).unwrap();
        e.mark_filled(1, dec!(105), dec!(1)).unwrap();
        let s = e.statistics();
        assert_eq!(s.filled_levels, 3);
        assert_eq!(s.buy_levels_filled, 2);
        assert_eq!(s.sell_levels_filled, 1);
        assert_eq!(s.utilization_rate, dec!(0.75));
    }

    #[test]
    fn one_sided_ladder_range() {
        let e = GridEngine::new(GridConfig::new("SPY", dec!(100), dec!(10), 0, 3, dec!(1))).unwrap();
        let range = e.statistics().price_range.unwrap();
        assert_eq!(range.min, dec!(70));
        assert_eq!(range.max, dec!(90));
    }

    #[test]
    fn empty_ladder_is_neutral() {
        let s = GridStatistics::from_levels(&[]);
        assert_eq!(s.total_levels, 0);
        assert_eq!(s.utilization_rate, Decimal::ZERO);
        assert!(s.price_range.is_none());
    }

    #[test]
    fn display() {
        let e = GridEngine::new(GridConfig::new("SPY", dec!(100), dec!(5), 1, 1, dec!(1))).unwrap();
        let text = format!("{}", e.statistics());
        assert!(text.contains("0/2"));
        assert!(text.contains("95 .. 105"));
    }
}
