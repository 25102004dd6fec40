//! Planner workflows: load, evaluate, audit.

use log::{info, warn};

use gridfolio::{Decimal, GridAction, GridEngine, RebalancePlan, RiskAssessment, RiskLevel};

use crate::audit::{self, AuditLog};
use crate::config::Config;
use crate::error::Result;
use crate::snapshot::{GridSnapshot, PortfolioSnapshot};

/// Outcome of one grid evaluation.
pub struct GridRun {
    pub engine: GridEngine,
    pub actions: Vec<GridAction>,
    /// New spacing when a volatility reading re-gridded the ladder.
    pub new_spacing: Option<Decimal>,
}

/// Restore a grid, optionally re-grid to `volatility`, then evaluate at `price`.
///
/// Re-gridding discards recorded fills, so the evaluation runs against the
/// fresh ladder.
pub fn run_grid(
    config: &Config,
    snapshot: &GridSnapshot,
    price: Decimal,
    volatility: Option<Decimal>,
    audit: &mut AuditLog,
) -> Result<GridRun> {
    let mut engine = snapshot.build_engine(config.scaling())?;
    let symbol = engine.config().symbol.clone();
    info!(
        "Restored {symbol} grid: {} levels, {} filled",
        engine.levels().len(),
        snapshot.fills.len()
    );

    let new_spacing = match volatility {
        Some(vol) => {
            let old_spacing = engine.config().grid_spacing;
            let spacing = engine.adjust_spacing(vol)?;
            if !snapshot.fills.is_empty() {
                warn!(
                    "Re-grid of {symbol} discarded {} recorded fills",
                    snapshot.fills.len()
                );
            }
            info!("Spacing {old_spacing}% -> {spacing}% at volatility {vol}");
            audit::log_spacing_adjusted(audit, &symbol, vol, old_spacing, spacing)?;
            Some(spacing)
        }
        None => None,
    };

    let actions = engine.check_triggers(price);
    info!("{} levels triggered at {price}", actions.len());
    audit::log_grid_evaluated(audit, &symbol, price, &actions, &engine.statistics())?;

    Ok(GridRun {
        engine,
        actions,
        new_spacing,
    })
}

/// Compute a netted rebalance plan for a portfolio snapshot.
pub fn run_rebalance(
    config: &Config,
    snapshot: &PortfolioSnapshot,
    audit: &mut AuditLog,
) -> Result<RebalancePlan> {
    let portfolio = snapshot.to_portfolio();
    if portfolio.total_value <= Decimal::ZERO {
        warn!("Portfolio total value is {}; weights treated as zero", portfolio.total_value);
    }

    let plan = config.rebalancer().plan(&portfolio);
    if plan.needs_rebalancing {
        info!("{} rebalance actions after netting", plan.actions.len());
    } else {
        info!("All positions within band");
    }
    audit::log_rebalance_planned(audit, &plan)?;
    Ok(plan)
}

/// Score the concentration risk of a portfolio snapshot.
pub fn run_risk(
    config: &Config,
    snapshot: &PortfolioSnapshot,
    audit: &mut AuditLog,
) -> Result<RiskAssessment> {
    let risk = config.rebalancer().assess_risk(&snapshot.to_portfolio());
    if risk.risk_level == RiskLevel::High {
        warn!("High concentration risk: score {}", risk.risk_score);
    } else {
        info!("Risk {}: score {}", risk.risk_level, risk.risk_score);
    }
    audit::log_risk_assessed(audit, &risk)?;
    Ok(risk)
}
