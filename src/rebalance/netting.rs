//! Greedy buy/sell netting.
//!
//! Buys and sells are each sorted by value, largest first. Every buy then
//! consumes sell value in that order until either side is exhausted. This is
//! opportunistic offsetting, not a minimum-trade-count assignment.

use log::debug;
use rust_decimal::Decimal;

use super::RebalanceAction;
use crate::Action;

/// Offset opposite-direction trades against each other.
///
/// Output: buys with remaining value (largest first), then sells with
/// remaining value (largest first). Symbol and reason of each surviving
/// trade are preserved. Ties in value keep their input order.
pub fn net_actions(actions: Vec<RebalanceAction>) -> Vec<RebalanceAction> {
    let (mut buys, mut sells): (Vec<_>, Vec<_>) =
        actions.into_iter().partition(|a| a.action == Action::Buy);

    buys.sort_by(|a, b| b.value.cmp(&a.value));
    sells.sort_by(|a, b| b.value.cmp(&a.value));

    let input_count = buys.len() + sells.len();
    let mut netted = Vec::with_capacity(input_count);

    for mut buy in buys {
        let mut remaining = buy.value;

        for sell in sells.iter_mut() {
            if remaining <= Decimal::ZERO {
                break;
            }
            if sell.value <= Decimal::ZERO {
                continue;
            }
            let offset = remaining.min(sell.value);
            sell.value -= offset;
            remaining -= offset;
        }

        if remaining > Decimal::ZERO {
            buy.value = remaining;
            netted.push(buy);
        }
    }

    netted.extend(sells.into_iter().filter(|s| s.value > Decimal::ZERO));

    debug!("netting: {} trades -> {}", input_count, netted.len());
    netted
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn trade(symbol: &str, action: Action, value: Decimal) -> RebalanceAction {
        RebalanceAction {
            symbol: symbol.into(),
            action,
            value,
            reason: format!("{symbol} reason"),
        }
    }

    #[test]
    fn equal_offsets_cancel_completely() {
        let out = net_actions(vec![
            trade("A", Action::Sell, dec!(100)),
            trade("B", Action::Buy, dec!(100)),
        ]);
        assert!(out.is_empty());
    }

    #[test]
    fn larger_buy_keeps_remainder() {
        let out = net_actions(vec![
            trade("A", Action::Sell, dec!(60)),
            trade("B", Action::Buy, dec!(100)),
        ]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].symbol, "B");
        assert_eq!(out[0].action, Action::Buy);
        assert_eq!(out[0].value, dec!(40));
        assert_eq!(out[0].reason, "B reason");
    }

    #[test]
    fn larger_sell_keeps_remainder() {
        let out = net_actions(vec![
            trade("A", Action::Sell, dec!(150)),
            trade("B", Action::Buy, dec!(100)),
        ]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].symbol, "A");
        assert_eq!(out[0].action, Action::Sell);
        assert_eq!(out[0].value, dec!(50));
    }

    #[test]
    fn largest_buy_consumes_largest_sell_first() {
        let out = net_actions(vec![
            trade("S1", Action::Sell, dec!(30)),
            trade("B1", Action::Buy, dec!(50)),
            trade("S2", Action::Sell, dec!(80)),
            trade("B2", Action::Buy, dec!(70)),
        ]);
        // B2(70) takes 70 of S2(80) -> S2 10
        // B1(50) takes 10 of S2, 30 of S1 -> B1 10
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].symbol, "B1");
        assert_eq!(out[0].value, dec!(10));
    }

    #[test]
    fn buys_then_sells_sorted_descending() {
        let out = net_actions(vec![
            trade("B1", Action::Buy, dec!(10)),
            trade("B2", Action::Buy, dec!(20)),
        ]);
        let symbols: Vec<&str> = out.iter().map(|a| a.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["B2", "B1"]);

        let out = net_actions(vec![
            trade("S1", Action::Sell, dec!(5)),
            trade("S2", Action::Sell, dec!(50)),
            trade("B", Action::Buy, dec!(1)),
        ]);
        let symbols: Vec<&str> = out.iter().map(|a| a.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["S2", "S1"]);
        assert_eq!(out[0].value, dec!(49));
    }

    #[test]
    fn ties_keep_input_order() {
        let out = net_actions(vec![
            trade("X", Action::Buy, dec!(10)),
            trade("Y", Action::Buy, dec!(10)),
        ]);
        assert_eq!(out[0].symbol, "X");
        assert_eq!(out[1].symbol, "Y");
    }

    #[test]
    fn empty_input() {
        assert!(net_actions(Vec::new()).is_empty());
    }
}
