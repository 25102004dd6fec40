//! CLI entry point for the gridfolio planner.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use gridfolio::Decimal;
use gridfolio_planner::audit::AuditLog;
use gridfolio_planner::config::Config;
use gridfolio_planner::error::Result;
use gridfolio_planner::report;
use gridfolio_planner::run;
use gridfolio_planner::snapshot::{GridSnapshot, PortfolioSnapshot};

#[derive(Parser)]
#[command(name = "gridfolio")]
#[command(about = "Grid ladders and band rebalancing for portfolio snapshots")]
#[command(version)]
struct Cli {
    /// Path to config.toml (defaults apply when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate a grid ladder against a price
    Grid {
        /// Path to grid snapshot JSON
        snapshot: PathBuf,

        /// Current market price
        #[arg(long)]
        price: Decimal,

        /// Re-grid to this volatility before evaluating (e.g. 0.04)
        #[arg(long)]
        volatility: Option<Decimal>,
    },

    /// Compute netted rebalance actions and portfolio metrics
    Rebalance {
        /// Path to portfolio snapshot JSON
        portfolio: PathBuf,
    },

    /// Score portfolio concentration risk
    Risk {
        /// Path to portfolio snapshot JSON
        portfolio: PathBuf,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match Config::load(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config: {e}");
                process::exit(1);
            }
        },
        None => Config::default(),
    };

    if let Err(e) = execute(&config, cli.command) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn execute(config: &Config, command: Command) -> Result<()> {
    let mut audit = AuditLog::open(&config.audit_path())?;

    match command {
        Command::Grid {
            snapshot,
            price,
            volatility,
        } => {
            let snapshot = GridSnapshot::load(&snapshot)?;
            let result = run::run_grid(config, &snapshot, price, volatility, &mut audit)?;
            if let Some(spacing) = result.new_spacing {
                println!("Re-gridded to {spacing}% spacing\n");
            }
            println!("{}", report::ladder(&result.engine));
            println!();
            println!("{}", report::grid_actions(&result.actions));
        }
        Command::Rebalance { portfolio } => {
            let snapshot = PortfolioSnapshot::load(&portfolio)?;
            let plan = run::run_rebalance(config, &snapshot, &mut audit)?;
            println!("{}", report::plan(&plan));
        }
        Command::Risk { portfolio } => {
            let snapshot = PortfolioSnapshot::load(&portfolio)?;
            let risk = run::run_risk(config, &snapshot, &mut audit)?;
            println!("{}", report::risk(&risk));
        }
    }
    Ok(())
}
