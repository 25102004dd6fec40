//! Plain-text tables printed by the CLI.

use gridfolio::{GridAction, GridEngine, RebalancePlan, RiskAssessment};

/// The ladder with fill state, top level first.
pub fn ladder(engine: &GridEngine) -> String {
    let config = engine.config();
    let mut out = vec![format!(
        "GRID {} (base {}, spacing {}%):",
        config.symbol, config.base_price, config.grid_spacing
    )];
    out.push(format!(
        "  {:>6}  {:6} {:>14} {:>12}  {}",
        "Level", "Action", "Trigger", "Size", "Fill"
    ));

    let mut levels: Vec<_> = engine.levels().iter().collect();
    levels.sort_by(|a, b| b.trigger_price.cmp(&a.trigger_price));
    for level in levels {
        let fill = match level.fill {
            Some(fill) => format!("{} @ {}", fill.quantity, fill.price),
            None => "-".to_string(),
        };
        out.push(format!(
            "  {:>6}  {:6} {:>14} {:>12}  {}",
            level.id().to_string(),
            level.action.to_string(),
            level.trigger_price.to_string(),
            level.target_allocation.to_string(),
            fill,
        ));
    }
    out.push(format!("\n{}", engine.statistics()));
    out.join("\n")
}

/// Triggered grid actions.
pub fn grid_actions(actions: &[GridAction]) -> String {
    if actions.is_empty() {
        return "No levels triggered.".to_string();
    }
    let mut out = vec!["TRIGGERED LEVELS:".to_string()];
    for (i, action) in actions.iter().enumerate() {
        out.push(format!("  {:>3}  {action}", i + 1));
    }
    out.join("\n")
}

/// Netted rebalance actions followed by portfolio metrics.
pub fn plan(plan: &RebalancePlan) -> String {
    let mut out = Vec::new();
    if plan.needs_rebalancing {
        out.push("REBALANCE ACTIONS:".to_string());
        out.push(format!(
            "  {:>3}  {:6} {:8} {:>14}",
            "#", "Action", "Symbol", "Value"
        ));
        for (i, action) in plan.actions.iter().enumerate() {
            out.push(format!(
                "  {:>3}  {:6} {:8} {:>14}   ({})",
                i + 1,
                action.action.to_string(),
                action.symbol,
                action.value.round_dp(2).to_string(),
                action.reason,
            ));
        }
    } else {
        out.push("No rebalancing needed: every position is within its band.".to_string());
    }
    out.push(String::new());
    out.push(plan.metrics.to_string());
    out.join("\n")
}

/// Risk score, level and the largest positions.
pub fn risk(risk: &RiskAssessment) -> String {
    let mut out = vec![
        format!("RISK: {} (score {})", risk.risk_level, risk.risk_score),
        format!(
            "  max concentration {}%, {} significant positions",
            risk.max_concentration_pct, risk.significant_positions
        ),
    ];
    if !risk.top_concentrations.is_empty() {
        out.push("  TOP POSITIONS:".to_string());
        for c in &risk.top_concentrations {
            out.push(format!(
                "    {:8} {:>8}% {:>14}",
                c.symbol,
                c.pct.round_dp(2).to_string(),
                c.market_value.to_string(),
            ));
        }
    }
    out.join("\n")
}
