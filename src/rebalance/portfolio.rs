//! Portfolio snapshot consumed by the rebalancer.

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;

/// A point-in-time view of a portfolio.
///
/// Positions, targets and bands are ordered `(symbol, value)` lists so the
/// caller controls iteration order: actions are computed in `targets`
/// order and concentrations are reported in `positions` order.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Portfolio {
    /// Total portfolio value, including cash.
    pub total_value: Decimal,
    /// Market value per symbol.
    #[cfg_attr(feature = "serde", serde(default))]
    pub positions: Vec<(String, Decimal)>,
    /// Target allocation per symbol, in percent (0-100).
    #[cfg_attr(feature = "serde", serde(default))]
    pub targets: Vec<(String, Decimal)>,
    /// Rebalance band per symbol, in percent. Missing symbols use the
    /// rebalancer's default band.
    #[cfg_attr(feature = "serde", serde(default))]
    pub bands: Vec<(String, Decimal)>,
}

impl Portfolio {
    pub fn new(total_value: Decimal) -> Self {
        Self {
            total_value,
            ..Self::default()
        }
    }

    pub fn with_position(mut self, symbol: &str, value: Decimal) -> Self {
        self.positions.push((symbol.to_string(), value));
        self
    }

    pub fn with_target(mut self, symbol: &str, pct: Decimal) -> Self {
        self.targets.push((symbol.to_string(), pct));
        self
    }

    pub fn with_band(mut self, symbol: &str, pct: Decimal) -> Self {
        self.bands.push((symbol.to_string(), pct));
        self
    }

    /// Market value of `symbol`, zero if not held.
    pub fn position_value(&self, symbol: &str) -> Decimal {
        lookup(&self.positions, symbol).unwrap_or(Decimal::ZERO)
    }

    /// Band for `symbol` in percent, if one was supplied.
    pub fn band_pct(&self, symbol: &str) -> Option<Decimal> {
        lookup(&self.bands, symbol)
    }

}

/// Symbol lookup over an ordered pair list. A repeated symbol resolves to
/// its first entry.
fn lookup(pairs: &[(String, Decimal)], symbol: &str) -> Option<Decimal> {
    pairs.iter().find(|(s, _)| s == symbol).map(|(_, v)| *v)
}

/// Hash index over an ordered pair list, resolving repeats like [`lookup`].
pub(crate) fn index(pairs: &[(String, Decimal)]) -> FxHashMap<&str, Decimal> {
    let mut map = FxHashMap::with_capacity_and_hasher(pairs.len(), Default::default());
    for (symbol, value) in pairs {
        map.entry(symbol.as_str()).or_insert(*value);
    }
    map
}
