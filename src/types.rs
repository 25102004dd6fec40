//! Core types: LevelId and the decimal helpers used for money and percentages.

use std::fmt;

use rust_decimal::Decimal;

/// Identifier of a grid level: its signed level number.
///
/// Negative ids sit below the base price (buy side), positive ids above it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelId(pub i32);

impl fmt::Display for LevelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 > 0 {
            write!(f, "L+{}", self.0)
        } else {
            write!(f, "L{}", self.0)
        }
    }
}

/// `pct / 100`, e.g. `5` → `0.05`.
#[inline]
pub(crate) fn pct_to_fraction(pct: Decimal) -> Decimal {
    pct / Decimal::ONE_HUNDRED
}

/// `value / total`, or `None` when `total <= 0` or the ratio does not fit.
#[inline]
pub(crate) fn checked_weight(value: Decimal, total: Decimal) -> Option<Decimal> {
    if total <= Decimal::ZERO {
        return None;
    }
    value.checked_div(total)
}

/// `value / total`, zero when [`checked_weight`] has no answer.
#[inline]
pub(crate) fn weight(value: Decimal, total: Decimal) -> Decimal {
    checked_weight(value, total).unwrap_or(Decimal::ZERO)
}

/// Formats a fraction as a percentage with two decimals, e.g. `0.0734` → `"7.34%"`.
///
/// Fractions too large to scale saturate at `Decimal::MAX`.
pub(crate) fn format_pct(fraction: Decimal) -> String {
    let pct = fraction
        .checked_mul(Decimal::ONE_HUNDRED)
        .unwrap_or(if fraction.is_sign_negative() { Decimal::MIN } else { Decimal::MAX })
        .round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero);
    format!("{pct:.2}%")
}
