//! Grid levels and the actions they emit.

use rust_decimal::Decimal;

use crate::{Action, LevelId};

/// Execution details recorded when a level is marked filled.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fill {
    pub price: Decimal,
    pub quantity: Decimal,
}

/// One rung of the ladder.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridLevel {
    /// Negative below the base price, positive above. Never zero.
    pub level_number: i32,
    pub trigger_price: Decimal,
    /// Buy for negative levels, Sell for positive levels.
    pub action: Action,
    /// Capital to deploy when the level triggers.
    pub target_allocation: Decimal,
    pub is_filled: bool,
    /// Set together with `is_filled` by [`GridEngine::mark_filled`](super::GridEngine::mark_filled).
    #[cfg_attr(feature = "serde", serde(default))]
    pub fill: Option<Fill>,
}

impl GridLevel {
    #[inline]
    pub fn id(&self) -> LevelId {
        LevelId(self.level_number)
    }

    /// Whether `current_price` has crossed this level in its trading direction.
    ///
    /// Filled levels never trigger.
    #[inline]
    pub fn is_triggered_by(&self, current_price: Decimal) -> bool {
        if self.is_filled {
            return false;
        }
        match self.action {
            Action::Buy => current_price <= self.trigger_price,
            Action::Sell => current_price >= self.trigger_price,
        }
    }
}

/// An advisory instruction emitted when a level triggers.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridAction {
    pub level_id: LevelId,
    pub action: Action,
    pub quantity: Decimal,
    /// Price observed at evaluation time, not the level's trigger price.
    pub price: Decimal,
}

impl std::fmt::Display for GridAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} @ {}",
            self.level_id, self.action, self.quantity, self.price
        )
    }
}
