//! JSONL audit trail logging.
//!
//! Each planner run appends events to an audit.jsonl file,
//! one JSON object per line.

use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use gridfolio::{Decimal, GridAction, GridStatistics, RebalancePlan, RiskAssessment};
use serde::Serialize;

use crate::error::Result;

/// An audit event written to the JSONL trail.
#[derive(Debug, Clone, Serialize)]
pub struct AuditEvent {
    pub event: &'static str,
    pub ts: DateTime<Utc>,
    #[serde(flatten)]
    pub data: serde_json::Value,
}

/// Append-only audit logger.
pub struct AuditLog {
    writer: BufWriter<std::fs::File>,
}

impl AuditLog {
    /// Open (or create) the audit log file for appending.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            writer: BufWriter::new(file),
        })
    }

    /// Log an event with arbitrary JSON data.
    pub fn log(&mut self, event: &'static str, data: serde_json::Value) -> Result<()> {
        let entry = AuditEvent {
            event,
            ts: Utc::now(),
            data,
        };
        let json = serde_json::to_string(&entry)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        writeln!(self.writer, "{json}")?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Log a ladder evaluation: the price seen, actions emitted, fill state.
pub fn log_grid_evaluated(
    audit: &mut AuditLog,
    symbol: &str,
    price: Decimal,
    actions: &[GridAction],
    stats: &GridStatistics,
) -> Result<()> {
    let action_data: Vec<_> = actions
        .iter()
        .map(|a| {
            serde_json::json!({
                "level": a.level_id.to_string(),
                "action": a.action.to_string(),
                "quantity": a.quantity,
                "price": a.price,
            })
        })
        .collect();

    audit.log(
        "grid_evaluated",
        serde_json::json!({
            "symbol": symbol,
            "price": price,
            "actions": action_data,
            "filled_levels": stats.filled_levels,
            "total_levels": stats.total_levels,
        }),
    )
}

/// Log a volatility-driven re-grid.
pub fn log_spacing_adjusted(
    audit: &mut AuditLog,
    symbol: &str,
    volatility: Decimal,
    old_spacing: Decimal,
    new_spacing: Decimal,
) -> Result<()> {
    audit.log(
        "spacing_adjusted",
        serde_json::json!({
            "symbol": symbol,
            "volatility": volatility,
            "old_spacing": old_spacing,
            "new_spacing": new_spacing,
        }),
    )
}

/// Log a computed rebalance plan.
pub fn log_rebalance_planned(audit: &mut AuditLog, plan: &RebalancePlan) -> Result<()> {
    let action_data: Vec<_> = plan
        .actions
        .iter()
        .map(|a| {
            serde_json::json!({
                "symbol": a.symbol,
                "action": a.action.to_string(),
                "value": a.value,
                "reason": a.reason,
            })
        })
        .collect();

    audit.log(
        "rebalance_planned",
        serde_json::json!({
            "needs_rebalancing": plan.needs_rebalancing,
            "actions": action_data,
            "num_positions": plan.metrics.num_positions,
            "herfindahl_index": plan.metrics.herfindahl_index,
        }),
    )
}

/// Log a concentration risk assessment.
pub fn log_risk_assessed(audit: &mut AuditLog, risk: &RiskAssessment) -> Result<()> {
    audit.log(
        "risk_assessed",
        serde_json::json!({
            "risk_score": risk.risk_score,
            "risk_level": risk.risk_level.to_string(),
            "max_concentration_pct": risk.max_concentration_pct,
            "significant_positions": risk.significant_positions,
        }),
    )
}
