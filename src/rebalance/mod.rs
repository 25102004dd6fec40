//! Portfolio rebalancing: band-breach trades, netting, and concentration metrics.
//!
//! # Example
//!
//! ```
//! use gridfolio::rebalance::{Portfolio, Rebalancer};
//! use gridfolio::{Action, Decimal};
//!
//! let portfolio = Portfolio::new(Decimal::from(1000))
//!     .with_position("A", Decimal::from(700))
//!     .with_position("B", Decimal::from(300))
//!     .with_target("A", Decimal::from(50))
//!     .with_target("B", Decimal::from(30));
//!
//! let actions = Rebalancer::default().compute_actions(&portfolio);
//!
//! // A is 20 points over target; B is on target
//! assert_eq!(actions.len(), 1);
//! assert_eq!(actions[0].action, Action::Sell);
//! assert_eq!(actions[0].value, Decimal::from(200));
//! ```

pub mod actions;
#[cfg(feature = "parallel")]
pub mod batch;
pub mod metrics;
pub mod netting;
pub mod portfolio;
pub mod risk;

pub use actions::{RebalanceAction, band_breaches};
#[cfg(feature = "parallel")]
pub use batch::plan_batch;
pub use metrics::{PortfolioMetrics, compute_metrics};
pub use netting::net_actions;
pub use portfolio::Portfolio;
pub use risk::{Concentration, RiskAssessment, RiskConfig, RiskLevel, assess_risk};

use rust_decimal::Decimal;

/// Rebalancer settings.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RebalanceConfig {
    /// Band, in percent, for symbols without an explicit band.
    pub default_band_pct: Decimal,
}

impl Default for RebalanceConfig {
    fn default() -> Self {
        Self {
            default_band_pct: Decimal::from(5),
        }
    }
}

/// Trades, metrics and a summary flag for one portfolio.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RebalancePlan {
    pub actions: Vec<RebalanceAction>,
    pub metrics: PortfolioMetrics,
    pub needs_rebalancing: bool,
}

/// Stateless rebalancing engine. Safe to share across threads.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rebalancer {
    config: RebalanceConfig,
    risk: RiskConfig,
}

impl Rebalancer {
    pub fn new(config: RebalanceConfig, risk: RiskConfig) -> Self {
        Self { config, risk }
    }

    #[inline]
    pub fn config(&self) -> &RebalanceConfig {
        &self.config
    }

    /// Netted trades that bring every out-of-band symbol back to target.
    pub fn compute_actions(&self, portfolio: &Portfolio) -> Vec<RebalanceAction> {
        net_actions(band_breaches(portfolio, self.config.default_band_pct))
    }

    pub fn metrics(&self, portfolio: &Portfolio) -> PortfolioMetrics {
        compute_metrics(portfolio)
    }

    pub fn assess_risk(&self, portfolio: &Portfolio) -> RiskAssessment {
        assess_risk(portfolio, &self.risk)
    }

    /// Actions and metrics together.
    pub fn plan(&self, portfolio: &Portfolio) -> RebalancePlan {
        let actions = self.compute_actions(portfolio);
        let needs_rebalancing = !actions.is_empty();
        RebalancePlan {
            actions,
            metrics: self.metrics(portfolio),
            needs_rebalancing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Action;
    use rust_decimal_macros::dec;

    #[test]
    fn symmetric_drift_nets_to_nothing() {
        let p = Portfolio::new(dec!(1000))
            .with_position("A", dec!(600))
            .with_position("B", dec!(400))
            .with_target("A", dec!(50))
            .with_target("B", dec!(50));
        assert!(Rebalancer::default().compute_actions(&p).is_empty());
    }

    #[test]
    fn cash_drag_produces_buy() {
        let p = Portfolio::new(dec!(1000))
            .with_position("A", dec!(300))
            .with_target("A", dec!(60));
        let actions = Rebalancer::default().compute_actions(&p);
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].action, Action::Buy);
        assert_eq!(actions[0].value, dec!(300));
        assert_eq!(actions[0].reason, "Outside rebalance band by 30.00%");
    }

    #[test]
    fn wider_default_band_suppresses_trades() {
        let p = Portfolio::new(dec!(1000))
            .with_position("A", dec!(580))
            .with_target("A", dec!(50));
        assert_eq!(Rebalancer::default().compute_actions(&p).len(), 1);

        let wide = Rebalancer::new(
            RebalanceConfig {
                default_band_pct: dec!(10),
            },
            RiskConfig::default(),
        );
        assert!(wide.compute_actions(&p).is_empty());
    }

    #[test]
    fn plan_flags_rebalancing() {
        let p = Portfolio::new(dec!(1000))
            .with_position("A", dec!(1000))
            .with_target("A", dec!(50));
        let plan = Rebalancer::default().plan(&p);
        assert!(plan.needs_rebalancing);
        assert_eq!(plan.actions.len(), 1);
        assert_eq!(plan.metrics.herfindahl_index, dec!(1));

        let balanced = Portfolio::new(dec!(1000))
            .with_position("A", dec!(500))
            .with_target("A", dec!(50));
        assert!(!Rebalancer::default().plan(&balanced).needs_rebalancing);
    }

    #[test]
    fn rebalancer_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Rebalancer>();
    }
}
