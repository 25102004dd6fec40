//! Grid trading: a ladder of buy levels below a base price and sell levels
//! above it, evaluated against the current price.
//!
//! # Example
//!
//! ```
//! use gridfolio::grid::{GridConfig, GridEngine};
//! use gridfolio::{Action, Decimal, LevelId};
//!
//! let config = GridConfig::new(
//!     "SPY",
//!     Decimal::from(100), // base price
//!     Decimal::from(5),   // 5% spacing
//!     2,                  // sell levels
//!     2,                  // buy levels
//!     Decimal::from(1000),
//! );
//! let mut engine = GridEngine::new(config).unwrap();
//!
//! let actions = engine.check_triggers(Decimal::from(94));
//! assert_eq!(actions.len(), 1);
//! assert_eq!(actions[0].level_id, LevelId(-1));
//! assert_eq!(actions[0].action, Action::Buy);
//!
//! // The execution side reports the fill back
//! engine.mark_filled(-1, Decimal::from(94), Decimal::from(10)).unwrap();
//! assert!(engine.check_triggers(Decimal::from(94)).is_empty());
//! ```

pub mod config;
pub mod engine;
pub mod level;
pub mod stats;

pub use config::{GridConfig, GridType, VolatilityScaling};
pub use engine::GridEngine;
pub use level::{Fill, GridAction, GridLevel};
pub use stats::{GridStatistics, PriceRange};
