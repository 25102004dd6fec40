//! The grid engine: ladder ownership, trigger evaluation, re-gridding.

use log::debug;
use rust_decimal::Decimal;

use super::{Fill, GridAction, GridConfig, GridLevel, GridStatistics, VolatilityScaling};
use crate::error::{Error, Result};
use crate::Action;

/// Owns one symbol's grid ladder.
///
/// Levels are stored in generation order: buy levels `-1, -2, ..., -d`
/// followed by sell levels `+1, +2, ..., +u`. That order is the order in
/// which [`check_triggers`](Self::check_triggers) reports actions.
///
/// Evaluation takes `&self`; only [`adjust_spacing`](Self::adjust_spacing)
/// and [`mark_filled`](Self::mark_filled) mutate the ladder.
#[derive(Clone, Debug)]
pub struct GridEngine {
    config: GridConfig,
    scaling: VolatilityScaling,
    levels: Vec<GridLevel>,
}

impl GridEngine {
    /// Validate `config` and build its ladder with default volatility scaling.
    pub fn new(config: GridConfig) -> Result<Self> {
        Self::with_scaling(config, VolatilityScaling::default())
    }

    /// Validate `config` and `scaling`, then build the ladder.
    pub fn with_scaling(config: GridConfig, scaling: VolatilityScaling) -> Result<Self> {
        config.validate()?;
        scaling.validate()?;
        let levels = generate_levels(&config)?;
        Ok(Self {
            config,
            scaling,
            levels,
        })
    }

    /// Rebuild a ladder for a persisted config and re-apply persisted fills.
    ///
    /// `filled` holds `(level_number, fill)` pairs as stored by the caller.
    pub fn restore(
        config: GridConfig,
        scaling: VolatilityScaling,
        filled: &[(i32, Fill)],
    ) -> Result<Self> {
        let mut engine = Self::with_scaling(config, scaling)?;
        for &(level_number, fill) in filled {
            engine.mark_filled(level_number, fill.price, fill.quantity)?;
        }
        Ok(engine)
    }

    // === Queries ===

    #[inline]
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    #[inline]
    pub fn scaling(&self) -> &VolatilityScaling {
        &self.scaling
    }

    /// All levels in generation order.
    #[inline]
    pub fn levels(&self) -> &[GridLevel] {
        &self.levels
    }

    /// Look up a level by its signed number.
    pub fn level(&self, level_number: i32) -> Option<&GridLevel> {
        self.index_of(level_number).map(|i| &self.levels[i])
    }

    /// Actions for every unfilled level crossed by `current_price`.
    ///
    /// Each action carries `current_price` as its price. Fill state is not
    /// touched, so calling this again before levels are marked filled
    /// returns the same actions.
    pub fn check_triggers(&self, current_price: Decimal) -> Vec<GridAction> {
        self.levels
            .iter()
            .filter(|level| level.is_triggered_by(current_price))
            .map(|level| GridAction {
                level_id: level.id(),
                action: level.action,
                quantity: level.target_allocation,
                price: current_price,
            })
            .collect()
    }

    /// Summary of the ladder and its fill state.
    pub fn statistics(&self) -> GridStatistics {
        GridStatistics::from_levels(&self.levels)
    }

    // === Mutations ===

    /// Scale spacing by the volatility multiplier and rebuild the ladder.
    ///
    /// Fill history is discarded: every level of the new ladder is unfilled.
    /// Returns the new spacing. If the new spacing overflows or would push a
    /// buy level to or below zero, nothing changes and `InvalidConfig` is
    /// returned.
    pub fn adjust_spacing(&mut self, volatility: Decimal) -> Result<Decimal> {
        let multiplier = self.scaling.multiplier(volatility);
        let mut config = self.config.clone();
        config.grid_spacing = config.grid_spacing.checked_mul(multiplier).ok_or_else(|| {
            Error::InvalidConfig(format!(
                "grid_spacing {}% x {multiplier} overflows",
                config.grid_spacing
            ))
        })?;
        config.validate()?;

        debug!(
            "{}: spacing {}% -> {}% (volatility {}, multiplier {})",
            config.symbol, self.config.grid_spacing, config.grid_spacing, volatility, multiplier
        );

        self.levels = generate_levels(&config)?;
        self.config = config;
        Ok(self.config.grid_spacing)
    }

    /// Record that the execution collaborator filled a level.
    pub fn mark_filled(&mut self, level_number: i32, price: Decimal, quantity: Decimal) -> Result<()> {
        let idx = self
            .index_of(level_number)
            .ok_or(Error::UnknownLevel(level_number))?;
        let level = &mut self.levels[idx];
        if level.is_filled {
            return Err(Error::AlreadyFilled(level_number));
        }
        level.is_filled = true;
        level.fill = Some(Fill { price, quantity });
        Ok(())
    }

    /// Position of a level in `levels`, derived from generation order.
    fn index_of(&self, level_number: i32) -> Option<usize> {
        let down = self.config.num_grids_down;
        let up = self.config.num_grids_up;
        match level_number {
            n if n < 0 && n.unsigned_abs() <= down.unsigned_abs() => {
                Some(n.unsigned_abs() as usize - 1)
            }
            n if n > 0 && n <= up => Some(down as usize + n as usize - 1),
            _ => None,
        }
    }
}

/// Build a fresh ladder. `config` must already be validated.
fn generate_levels(config: &GridConfig) -> Result<Vec<GridLevel>> {
    let down = config.num_grids_down.max(0);
    let up = config.num_grids_up.max(0);
    let mut levels = Vec::with_capacity(down as usize + up as usize);

    let buys = (1..=down).map(|i| (-i, Action::Buy));
    let sells = (1..=up).map(|i| (i, Action::Sell));

    for (level_number, action) in buys.chain(sells) {
        levels.push(GridLevel {
            level_number,
            trigger_price: config.trigger_price(level_number)?,
            action,
            target_allocation: config.position_size,
            is_filled: false,
            fill: None,
        });
    }

    debug!(
        "{}: generated {} levels around {} at {}% spacing",
        config.symbol,
        levels.len(),
        config.base_price,
        config.grid_spacing
    );
    Ok(levels)
}
