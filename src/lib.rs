//! # gridfolio
//!
//! Deterministic calculation engines for a portfolio-management backend.
//!
//! ## Features
//!
//! - **Grid trading**: symmetric ladders of buy levels below a base price and
//!   sell levels above it, trigger evaluation, volatility-driven re-gridding
//! - **Rebalancing**: band-breach trades, greedy buy/sell netting,
//!   concentration metrics and a risk score
//! - **Decimal arithmetic**: every price, value and percentage is a
//!   [`Decimal`], so band comparisons are exact
//! - **No I/O**: callers pass plain values in and get plain values back
//!
//! ## Grid Trading
//!
//! ```
//! use gridfolio::grid::{GridConfig, GridEngine};
//! use gridfolio::{Action, Decimal, LevelId};
//!
//! // Base 100, 5% spacing, two levels each side
//! let config = GridConfig::new("spy", Decimal::from(100), Decimal::from(5), 2, 2, Decimal::from(500));
//! let engine = GridEngine::new(config).unwrap();
//!
//! let prices: Vec<String> = engine.levels().iter().map(|l| l.trigger_price.to_string()).collect();
//! assert_eq!(prices, ["95", "90", "105", "110"]);
//!
//! // 94 crosses level -1 (95) but not level -2 (90)
//! let actions = engine.check_triggers(Decimal::from(94));
//! assert_eq!(actions.len(), 1);
//! assert_eq!(actions[0].level_id, LevelId(-1));
//! assert_eq!(actions[0].action, Action::Buy);
//! assert_eq!(actions[0].price, Decimal::from(94));
//! ```
//!
//! ## Volatility Re-gridding
//!
//! Spacing is scaled by `clamp(volatility / 2%, 0.5, 2.0)` and the ladder is
//! rebuilt. Fill history does not survive a re-grid.
//!
//! ```
//! use gridfolio::grid::{GridConfig, GridEngine};
//! use gridfolio::Decimal;
//!
//! let config = GridConfig::new("SPY", Decimal::from(100), Decimal::from(5), 2, 2, Decimal::from(500));
//! let mut engine = GridEngine::new(config).unwrap();
//! engine.mark_filled(-1, Decimal::from(95), Decimal::from(5)).unwrap();
//!
//! let spacing = engine.adjust_spacing(Decimal::new(4, 2)).unwrap(); // 4% volatility
//! assert_eq!(spacing, Decimal::from(10));
//! assert_eq!(engine.statistics().filled_levels, 0);
//! ```
//!
//! ## Rebalancing
//!
//! ```
//! use gridfolio::rebalance::{Portfolio, Rebalancer};
//! use gridfolio::Decimal;
//!
//! let portfolio = Portfolio::new(Decimal::from(1000))
//!     .with_position("A", Decimal::from(500))
//!     .with_position("B", Decimal::from(500))
//!     .with_target("A", Decimal::from(50))
//!     .with_target("B", Decimal::from(50));
//!
//! let plan = Rebalancer::default().plan(&portfolio);
//! assert!(!plan.needs_rebalancing);
//! assert_eq!(plan.metrics.herfindahl_index, Decimal::new(5, 1));
//! assert_eq!(plan.metrics.diversification_ratio, Decimal::from(2));
//! ```

mod action;
mod error;
pub mod grid;
pub mod rebalance;
mod types;

// Re-export public API
pub use action::Action;
pub use error::{Error, Result};
pub use grid::{
    Fill, GridAction, GridConfig, GridEngine, GridLevel, GridStatistics, GridType, PriceRange,
    VolatilityScaling,
};
pub use rebalance::{
    Portfolio, PortfolioMetrics, RebalanceAction, RebalanceConfig, RebalancePlan, Rebalancer,
    RiskAssessment, RiskConfig, RiskLevel,
};
pub use rust_decimal::Decimal;
pub use types::LevelId;
