//! Concentration and diversification metrics.

use log::debug;
use rust_decimal::Decimal;

use super::Portfolio;
use crate::types::checked_weight;

/// Concentration summary of a portfolio.
///
/// The default value is the neutral result returned for portfolios with
/// no value.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PortfolioMetrics {
    /// Positions with value > 0.
    pub num_positions: usize,
    /// Largest single weight (e.g. 0.6 = 60%).
    pub max_concentration: Decimal,
    /// Sum of squared weights.
    pub herfindahl_index: Decimal,
    /// `1 / herfindahl_index`, the effective number of positions.
    pub diversification_ratio: Decimal,
    /// Weight of every position, in position order.
    pub concentrations: Vec<(String, Decimal)>,
}

impl PortfolioMetrics {
    /// True for the neutral result of an empty or zero-valued portfolio.
    pub fn is_neutral(&self) -> bool {
        *self == Self::default()
    }
}

impl std::fmt::Display for PortfolioMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Portfolio Metrics")?;
        writeln!(f, "  Positions:        {:>8}", self.num_positions)?;
        writeln!(
            f,
            "  Max concentration:{:>8}",
            crate::types::format_pct(self.max_concentration)
        )?;
        writeln!(f, "  Herfindahl index: {:>8.4}", self.herfindahl_index)?;
        writeln!(f, "  Diversification:  {:>8.2}", self.diversification_ratio)
    }
}

/// Compute concentration metrics.
///
/// `total_value <= 0` yields the neutral result, as does a portfolio whose
/// weights or squared weights do not fit in a `Decimal`.
pub fn compute_metrics(portfolio: &Portfolio) -> PortfolioMetrics {
    let total_value = portfolio.total_value;
    if total_value <= Decimal::ZERO {
        return PortfolioMetrics::default();
    }

    let concentrations: Option<Vec<(String, Decimal)>> = portfolio
        .positions
        .iter()
        .map(|(symbol, value)| checked_weight(*value, total_value).map(|w| (symbol.clone(), w)))
        .collect();
    let Some(concentrations) = concentrations else {
        debug!("weights out of range for total value {total_value}, metrics neutral");
        return PortfolioMetrics::default();
    };

    let herfindahl_index = concentrations
        .iter()
        .try_fold(Decimal::ZERO, |acc, (_, c)| acc.checked_add(c.checked_mul(*c)?));
    let Some(herfindahl_index) = herfindahl_index else {
        debug!("Herfindahl index out of range, metrics neutral");
        return PortfolioMetrics::default();
    };

    let max_concentration = concentrations
        .iter()
        .map(|(_, c)| *c)
        .max()
        .unwrap_or(Decimal::ZERO);

    let num_positions = portfolio
        .positions
        .iter()
        .filter(|(_, v)| *v > Decimal::ZERO)
        .count();

    let diversification_ratio = if herfindahl_index > Decimal::ZERO {
        Decimal::ONE.checked_div(herfindahl_index).unwrap_or(Decimal::ZERO)
    } else {
        Decimal::ZERO
    };

    PortfolioMetrics {
        num_positions,
        max_concentration,
        herfindahl_index,
        diversification_ratio,
        concentrations,
    }
}
