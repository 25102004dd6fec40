//! Band-breach detection: one raw trade per symbol outside its band.

use log::debug;
use rust_decimal::Decimal;

use super::Portfolio;
use super::portfolio::index;
use crate::types::{format_pct, pct_to_fraction, weight};
use crate::Action;

/// A single rebalance trade.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RebalanceAction {
    pub symbol: String,
    pub action: Action,
    /// Trade value, always positive.
    pub value: Decimal,
    pub reason: String,
}

impl std::fmt::Display for RebalanceAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} ({})",
            self.action, self.symbol, self.value, self.reason
        )
    }
}

/// Trades for every target symbol whose weight deviates from target by more
/// than its band, in `targets` order and before netting.
///
/// `default_band_pct` applies to symbols without an explicit band. When
/// `total_value <= 0`, or a position's weight does not fit in a `Decimal`,
/// that current weight is treated as zero. A symbol whose trade value does
/// not fit is skipped.
pub fn band_breaches(portfolio: &Portfolio, default_band_pct: Decimal) -> Vec<RebalanceAction> {
    let total_value = portfolio.total_value;
    let position_map = index(&portfolio.positions);
    let band_map = index(&portfolio.bands);

    let mut actions = Vec::new();

    for (symbol, target_pct) in &portfolio.targets {
        let current_value = position_map.get(symbol.as_str()).copied().unwrap_or(Decimal::ZERO);
        let current_weight = weight(current_value, total_value);

        let target_weight = pct_to_fraction(*target_pct);
        let band = pct_to_fraction(
            band_map
                .get(symbol.as_str())
                .copied()
                .unwrap_or(default_band_pct),
        );

        let Some(deviation) = current_weight.checked_sub(target_weight).map(|d| d.abs()) else {
            debug!("{symbol}: weight deviation out of range, skipped");
            continue;
        };
        if deviation <= band {
            continue;
        }

        let Some(trade_value) = total_value
            .checked_mul(target_weight)
            .and_then(|v| v.checked_sub(current_value))
        else {
            debug!("{symbol}: trade value out of range, skipped");
            continue;
        };
        let (action, value) = if trade_value > Decimal::ZERO {
            (Action::Buy, trade_value)
        } else {
            (Action::Sell, trade_value.abs())
        };

        actions.push(RebalanceAction {
            symbol: symbol.clone(),
            action,
            value,
            reason: format!("Outside rebalance band by {}", format_pct(deviation)),
        });
    }

    actions
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn five() -> Decimal {
        dec!(5)
    }

    #[test]
    fn overweight_and_underweight() {
        let p = Portfolio::new(dec!(1000))
            .with_position("A", dec!(600))
            .with_position("B", dec!(400))
            .with_target("A", dec!(50))
            .with_target("B", dec!(50));

        let actions = band_breaches(&p, five());
        assert_eq!(actions.len(), 2);
        assert_eq!(actions[0].symbol, "A");
        assert_eq!(actions[0].action, Action::Sell);
        assert_eq!(actions[0].value, dec!(100));
        assert_eq!(actions[0].reason, "Outside rebalance band by 10.00%");
        assert_eq!(actions[1].symbol, "B");
        assert_eq!(actions[1].action, Action::Buy);
        assert_eq!(actions[1].value, dec!(100));
    }

    #[test]
    fn deviation_equal_to_band_is_inside() {
        let p = Portfolio::new(dec!(1000))
            .with_position("A", dec!(550))
            .with_target("A", dec!(50));
        assert!(band_breaches(&p, five()).is_empty());
    }

    #[test]
    fn just_outside_band_triggers() {
        let p = Portfolio::new(dec!(1000))
            .with_position("A", dec!(550.01))
            .with_target("A", dec!(50));
        let actions = band_breaches(&p, five());
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].value, dec!(50.01));
        assert_eq!(actions[0].reason, "Outside rebalance band by 5.00%");
    }

    #[test]
    fn explicit_band_overrides_default() {
        let p = Portfolio::new(dec!(1000))
            .with_position("A", dec!(530))
            .with_target("A", dec!(50))
            .with_band("A", dec!(2));
        let actions = band_breaches(&p, five());
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].action, Action::Sell);
        assert_eq!(actions[0].value, dec!(30));
        assert_eq!(actions[0].reason, "Outside rebalance band by 3.00%");
    }

    #[test]
    fn missing_position_is_bought() {
        let p = Portfolio::new(dec!(1000)).with_target("NEW", dec!(20));
        let actions = band_breaches(&p, five());
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].action, Action::Buy);
        assert_eq!(actions[0].value, dec!(200));
    }

    #[test]
    fn zero_total_value_treats_weights_as_zero() {
        let p = Portfolio::new(Decimal::ZERO)
            .with_position("A", dec!(10))
            .with_target("A", dec!(50));
        // Deviation 50% > band, trade = 0 * 0.5 - 10 = -10
        let actions = band_breaches(&p, five());
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].action, Action::Sell);
        assert_eq!(actions[0].value, dec!(10));
    }

    #[test]
    fn repeated_position_uses_same_value_as_lookup() {
        let p = Portfolio::new(dec!(1000))
            .with_position("A", dec!(100))
            .with_position("A", dec!(900))
            .with_target("A", dec!(50));
        let actions = band_breaches(&p, five());
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].action, Action::Buy);
        assert_eq!(actions[0].value, dec!(500) - p.position_value("A"));
    }

    #[test]
    fn unrepresentable_weight_is_treated_as_zero() {
        let p = Portfolio::new(dec!(0.00000000000000000001))
            .with_position("A", dec!(1000000000))
            .with_target("A", dec!(50));
        // Weight 1e29 does not fit: current weight 0, deviation 50%
        let actions = band_breaches(&p, five());
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].action, Action::Sell);
        assert_eq!(actions[0].reason, "Outside rebalance band by 50.00%");
    }

    #[test]
    fn untargeted_positions_are_ignored() {
        let p = Portfolio::new(dec!(1000))
            .with_position("A", dec!(500))
            .with_position("OLD", dec!(500))
            .with_target("A", dec!(50));
        assert!(band_breaches(&p, five()).is_empty());
    }
}
