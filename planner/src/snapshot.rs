//! Grid and portfolio snapshot (JSON) loading and validation.

use std::path::Path;

use chrono::{DateTime, Utc};
use gridfolio::{Decimal, Fill, GridConfig, GridEngine, Portfolio, VolatilityScaling};
use rustc_hash::FxHashSet;
use serde::Deserialize;

use crate::error::{Error, Result};

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| Error::SnapshotRead {
        path: path.to_path_buf(),
        source: e,
    })
}

/// A persisted grid: its config plus the fills recorded so far.
#[derive(Debug, Clone, Deserialize)]
pub struct GridSnapshot {
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    pub config: GridConfig,
    #[serde(default)]
    pub fills: Vec<FillRecord>,
}

/// One filled level.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct FillRecord {
    pub level_number: i32,
    pub price: Decimal,
    pub quantity: Decimal,
}

impl GridSnapshot {
    /// Load and validate a grid snapshot file.
    pub fn load(path: &Path) -> Result<Self> {
        Self::from_json(&read(path)?)
    }

    /// Parse from a JSON string (useful for testing).
    pub fn from_json(json: &str) -> Result<Self> {
        let mut snapshot: GridSnapshot = serde_json::from_str(json)?;
        snapshot.config.symbol = snapshot.config.symbol.trim().to_uppercase();
        snapshot.validate()?;
        Ok(snapshot)
    }

    fn validate(&self) -> Result<()> {
        if self.config.symbol.is_empty() {
            return Err(Error::Snapshot("grid symbol is empty".into()));
        }
        let mut seen = FxHashSet::default();
        for fill in &self.fills {
            if !seen.insert(fill.level_number) {
                return Err(Error::Snapshot(format!(
                    "level {} filled more than once",
                    fill.level_number
                )));
            }
            if fill.quantity <= Decimal::ZERO {
                return Err(Error::Snapshot(format!(
                    "fill quantity for level {} must be > 0",
                    fill.level_number
                )));
            }
        }
        Ok(())
    }

    /// Rebuild the engine and re-apply the recorded fills.
    pub fn build_engine(&self, scaling: VolatilityScaling) -> Result<GridEngine> {
        let fills: Vec<(i32, Fill)> = self
            .fills
            .iter()
            .map(|f| {
                (
                    f.level_number,
                    Fill {
                        price: f.price,
                        quantity: f.quantity,
                    },
                )
            })
            .collect();
        Ok(GridEngine::restore(self.config.clone(), scaling, &fills)?)
    }
}

/// A portfolio's holdings, target weights and per-symbol bands.
///
/// Lists keep file order; that order flows through to the action list.
#[derive(Debug, Clone, Deserialize)]
pub struct PortfolioSnapshot {
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    pub total_value: Decimal,
    #[serde(default)]
    pub positions: Vec<PositionEntry>,
    #[serde(default)]
    pub targets: Vec<WeightEntry>,
    #[serde(default)]
    pub bands: Vec<WeightEntry>,
}

/// Current market value of one holding.
#[derive(Debug, Clone, Deserialize)]
pub struct PositionEntry {
    pub symbol: String,
    pub value: Decimal,
}

/// A percentage keyed by symbol (target weight or band width).
#[derive(Debug, Clone, Deserialize)]
pub struct WeightEntry {
    pub symbol: String,
    pub pct: Decimal,
}

impl PortfolioSnapshot {
    /// Load and validate a portfolio snapshot file.
    pub fn load(path: &Path) -> Result<Self> {
        Self::from_json(&read(path)?)
    }

    /// Parse from a JSON string (useful for testing).
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: PortfolioSnapshot = serde_json::from_str(json)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    fn validate(&self) -> Result<()> {
        check_unique("positions", self.positions.iter().map(|p| p.symbol.as_str()))?;
        check_unique("targets", self.targets.iter().map(|t| t.symbol.as_str()))?;
        check_unique("bands", self.bands.iter().map(|b| b.symbol.as_str()))?;

        for t in &self.targets {
            if t.pct < Decimal::ZERO || t.pct > Decimal::ONE_HUNDRED {
                return Err(Error::Snapshot(format!(
                    "target for {} ({}) is outside 0-100",
                    t.symbol, t.pct
                )));
            }
        }
        for b in &self.bands {
            if b.pct < Decimal::ZERO {
                return Err(Error::Snapshot(format!(
                    "band for {} ({}) is negative",
                    b.symbol, b.pct
                )));
            }
        }
        Ok(())
    }

    /// Convert to the engine's portfolio type.
    pub fn to_portfolio(&self) -> Portfolio {
        let mut portfolio = Portfolio::new(self.total_value);
        for p in &self.positions {
            portfolio = portfolio.with_position(&p.symbol, p.value);
        }
        for t in &self.targets {
            portfolio = portfolio.with_target(&t.symbol, t.pct);
        }
        for b in &self.bands {
            portfolio = portfolio.with_band(&b.symbol, b.pct);
        }
        portfolio
    }
}

fn check_unique<'a>(list: &str, symbols: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = FxHashSet::default();
    for symbol in symbols {
        if symbol.trim().is_empty() {
            return Err(Error::Snapshot(format!("empty symbol in {list}")));
        }
        if !seen.insert(symbol) {
            return Err(Error::Snapshot(format!("duplicate symbol in {list}: {symbol}")));
        }
    }
    Ok(())
}
