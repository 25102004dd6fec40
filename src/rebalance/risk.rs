//! Concentration risk scoring.

use rust_decimal::Decimal;

use super::Portfolio;
use crate::types::checked_weight;

/// Thresholds for the risk score.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RiskConfig {
    /// Scores above this are `High`.
    pub high_threshold: Decimal,
    /// Scores above this (and not high) are `Medium`.
    pub medium_threshold: Decimal,
    /// Positions above this weight, in percent, count as significant.
    pub significant_pct: Decimal,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            high_threshold: Decimal::from(70),
            medium_threshold: Decimal::from(40),
            significant_pct: Decimal::ONE,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Medium => write!(f, "Medium"),
            RiskLevel::High => write!(f, "High"),
        }
    }
}

/// One position's share of the portfolio.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Concentration {
    pub symbol: String,
    /// Weight in percent (e.g. 25 = 25%).
    pub pct: Decimal,
    pub market_value: Decimal,
}

/// Risk score of a portfolio, 0-100, higher is riskier.
///
/// `score = min(100, max_concentration_pct + (10 - min(significant, 10)) * 2)`:
/// the largest weight plus a penalty of two points for each significant
/// position short of ten.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RiskAssessment {
    pub risk_score: Decimal,
    pub risk_level: RiskLevel,
    pub max_concentration_pct: Decimal,
    pub significant_positions: usize,
    /// Up to five largest positions, largest first.
    pub top_concentrations: Vec<Concentration>,
}

const TOP_N: usize = 5;
const DIVERSIFIED_COUNT: usize = 10;

pub fn assess_risk(portfolio: &Portfolio, config: &RiskConfig) -> RiskAssessment {
    let total_value = portfolio.total_value;

    let mut concentrations: Vec<Concentration> = portfolio
        .positions
        .iter()
        .map(|(symbol, value)| Concentration {
            symbol: symbol.clone(),
            pct: checked_weight(*value, total_value)
                .and_then(|w| w.checked_mul(Decimal::ONE_HUNDRED))
                .unwrap_or(Decimal::ZERO),
            market_value: *value,
        })
        .collect();

    // Largest first; symbol breaks ties for a stable report
    concentrations.sort_by(|a, b| b.pct.cmp(&a.pct).then_with(|| a.symbol.cmp(&b.symbol)));

    let max_concentration_pct = concentrations
        .first()
        .map(|c| c.pct)
        .unwrap_or(Decimal::ZERO);
    let significant_positions = concentrations
        .iter()
        .filter(|c| c.pct > config.significant_pct)
        .count();

    let missing = DIVERSIFIED_COUNT - significant_positions.min(DIVERSIFIED_COUNT);
    let penalty = Decimal::from(missing * 2);
    let risk_score = max_concentration_pct
        .checked_add(penalty)
        .map_or(Decimal::ONE_HUNDRED, |score| score.min(Decimal::ONE_HUNDRED))
        .round_dp(2);

    let risk_level = if risk_score > config.high_threshold {
        RiskLevel::High
    } else if risk_score > config.medium_threshold {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    };

    concentrations.truncate(TOP_N);

    RiskAssessment {
        risk_score,
        risk_level,
        max_concentration_pct: max_concentration_pct.round_dp(2),
        significant_positions,
        top_concentrations: concentrations,
    }
}
