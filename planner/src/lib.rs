//! gridfolio-planner: command-line front end for the gridfolio engines.
//!
//! Reads a TOML config and JSON snapshots, evaluates grid ladders or
//! rebalance plans, prints the result, and appends an audit trail.

pub mod audit;
pub mod config;
pub mod error;
pub mod report;
pub mod run;
pub mod snapshot;
