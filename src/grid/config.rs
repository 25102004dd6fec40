//! Grid configuration and volatility scaling.

use rust_decimal::Decimal;

use crate::error::{Error, Result};

/// How trigger prices are spaced around the base price.
///
/// Only percentage spacing is defined. New spacing schemes are added as
/// variants and handled in [`GridConfig::trigger_price`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum GridType {
    /// `base * (1 ± spacing% * i)`.
    #[default]
    Percentage,
}

/// Parameters of one symbol's grid ladder.
///
/// Grid counts are signed so that a negative count coming from an
/// external caller is rejected rather than wrapped.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridConfig {
    pub symbol: String,
    /// Reference price the ladder is centered on.
    pub base_price: Decimal,
    /// Distance between adjacent levels, in percent of the base price.
    pub grid_spacing: Decimal,
    /// Sell levels above the base price.
    pub num_grids_up: i32,
    /// Buy levels below the base price.
    pub num_grids_down: i32,
    /// Capital allocated to each level.
    pub position_size: Decimal,
    #[cfg_attr(feature = "serde", serde(default))]
    pub grid_type: GridType,
}

impl GridConfig {
    /// Create a percentage-spaced grid config. The symbol is upper-cased.
    pub fn new(
        symbol: &str,
        base_price: Decimal,
        grid_spacing: Decimal,
        num_grids_up: i32,
        num_grids_down: i32,
        position_size: Decimal,
    ) -> Self {
        Self {
            symbol: symbol.to_uppercase(),
            base_price,
            grid_spacing,
            num_grids_up,
            num_grids_down,
            position_size,
            grid_type: GridType::Percentage,
        }
    }

    /// Check every parameter. Called before any ladder is built.
    pub fn validate(&self) -> Result<()> {
        if self.base_price <= Decimal::ZERO {
            return Err(Error::InvalidConfig(format!(
                "base_price must be > 0, got {}",
                self.base_price
            )));
        }
        if self.grid_spacing <= Decimal::ZERO {
            return Err(Error::InvalidConfig(format!(
                "grid_spacing must be > 0, got {}",
                self.grid_spacing
            )));
        }
        if self.num_grids_up < 0 || self.num_grids_down < 0 {
            return Err(Error::InvalidConfig(format!(
                "grid counts must be >= 0, got up={} down={}",
                self.num_grids_up, self.num_grids_down
            )));
        }
        if self.position_size <= Decimal::ZERO {
            return Err(Error::InvalidConfig(format!(
                "position_size must be > 0, got {}",
                self.position_size
            )));
        }
        // Outermost levels bound every other level's arithmetic
        if self.num_grids_up > 0 {
            self.trigger_price(self.num_grids_up)?;
        }
        // Lowest buy level must stay above zero
        if self.num_grids_down > 0 && self.trigger_price(-self.num_grids_down)? <= Decimal::ZERO {
            return Err(Error::InvalidConfig(format!(
                "grid_spacing {}% x {} buy levels reaches a non-positive price",
                self.grid_spacing, self.num_grids_down
            )));
        }
        Ok(())
    }

    /// Trigger price of the level with the given signed number.
    ///
    /// Fails with `InvalidConfig` when the price does not fit in a `Decimal`.
    pub fn trigger_price(&self, level_number: i32) -> Result<Decimal> {
        let price = match self.grid_type {
            GridType::Percentage => self
                .grid_spacing
                .checked_mul(Decimal::from(level_number))
                .and_then(|x| x.checked_div(Decimal::ONE_HUNDRED))
                .and_then(|offset| Decimal::ONE.checked_add(offset))
                .and_then(|factor| self.base_price.checked_mul(factor)),
        };
        price.map(|p| p.normalize()).ok_or_else(|| {
            Error::InvalidConfig(format!(
                "level {level_number} price overflows (base {}, spacing {}%)",
                self.base_price, self.grid_spacing
            ))
        })
    }
}

/// Maps observed volatility to a spacing multiplier.
///
/// `multiplier = clamp(volatility / reference_volatility, min_multiplier, max_multiplier)`.
/// With the defaults a volatility of 2% keeps spacing unchanged, 1% or less
/// halves it, and 4% or more doubles it.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VolatilityScaling {
    pub reference_volatility: Decimal,
    pub min_multiplier: Decimal,
    pub max_multiplier: Decimal,
}

impl Default for VolatilityScaling {
    fn default() -> Self {
        Self {
            reference_volatility: Decimal::new(2, 2),
            min_multiplier: Decimal::new(5, 1),
            max_multiplier: Decimal::TWO,
        }
    }
}

impl VolatilityScaling {
    pub fn validate(&self) -> Result<()> {
        if self.reference_volatility <= Decimal::ZERO {
            return Err(Error::InvalidConfig(
                "reference_volatility must be > 0".into(),
            ));
        }
        if self.min_multiplier <= Decimal::ZERO || self.min_multiplier > self.max_multiplier {
            return Err(Error::InvalidConfig(format!(
                "multiplier bounds must satisfy 0 < min <= max, got [{}, {}]",
                self.min_multiplier, self.max_multiplier
            )));
        }
        Ok(())
    }

    /// Spacing multiplier for the given volatility.
    ///
    /// A ratio too large to represent clamps to the bound on its side.
    pub fn multiplier(&self, volatility: Decimal) -> Decimal {
        match volatility.checked_div(self.reference_volatility) {
            Some(ratio) => ratio.clamp(self.min_multiplier, self.max_multiplier),
            None if volatility.is_sign_negative() => self.min_multiplier,
            None => self.max_multiplier,
        }
    }
}
