//! TOML configuration loading and validation.

use std::path::Path;

use gridfolio::{Decimal, RebalanceConfig, Rebalancer, RiskConfig, VolatilityScaling};
use serde::Deserialize;

use crate::error::{Error, Result};

/// Top-level configuration. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub grid: GridSection,
    #[serde(default)]
    pub rebalance: RebalanceSection,
    #[serde(default)]
    pub risk: RiskSection,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Volatility scaling applied by `grid --volatility`.
#[derive(Debug, Clone, Deserialize)]
pub struct GridSection {
    #[serde(default = "default_reference_volatility")]
    pub reference_volatility: Decimal,
    #[serde(default = "default_min_multiplier")]
    pub min_multiplier: Decimal,
    #[serde(default = "default_max_multiplier")]
    pub max_multiplier: Decimal,
}

impl Default for GridSection {
    fn default() -> Self {
        Self {
            reference_volatility: default_reference_volatility(),
            min_multiplier: default_min_multiplier(),
            max_multiplier: default_max_multiplier(),
        }
    }
}

fn default_reference_volatility() -> Decimal {
    VolatilityScaling::default().reference_volatility
}
fn default_min_multiplier() -> Decimal {
    VolatilityScaling::default().min_multiplier
}
fn default_max_multiplier() -> Decimal {
    VolatilityScaling::default().max_multiplier
}

#[derive(Debug, Clone, Deserialize)]
pub struct RebalanceSection {
    #[serde(default = "default_band")]
    pub default_band_pct: Decimal,
}

impl Default for RebalanceSection {
    fn default() -> Self {
        Self {
            default_band_pct: default_band(),
        }
    }
}

fn default_band() -> Decimal {
    RebalanceConfig::default().default_band_pct
}

#[derive(Debug, Clone, Deserialize)]
pub struct RiskSection {
    #[serde(default = "default_high")]
    pub high_threshold: Decimal,
    #[serde(default = "default_medium")]
    pub medium_threshold: Decimal,
    #[serde(default = "default_significant")]
    pub significant_pct: Decimal,
}

impl Default for RiskSection {
    fn default() -> Self {
        Self {
            high_threshold: default_high(),
            medium_threshold: default_medium(),
            significant_pct: default_significant(),
        }
    }
}

fn default_high() -> Decimal {
    RiskConfig::default().high_threshold
}
fn default_medium() -> Decimal {
    RiskConfig::default().medium_threshold
}
fn default_significant() -> Decimal {
    RiskConfig::default().significant_pct
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_dir")]
    pub dir: String,
    #[serde(default = "default_audit_file")]
    pub audit_file: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: default_log_dir(),
            audit_file: default_audit_file(),
        }
    }
}

fn default_log_dir() -> String {
    "./logs".into()
}
fn default_audit_file() -> String {
    "audit.jsonl".into()
}

impl Config {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml(&contents)
    }

    /// Parse and validate from a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate config invariants.
    fn validate(&self) -> Result<()> {
        self.scaling()
            .validate()
            .map_err(|e| Error::Config(e.to_string()))?;
        if self.rebalance.default_band_pct < Decimal::ZERO {
            return Err(Error::Config("default_band_pct must be >= 0".into()));
        }
        if self.risk.medium_threshold > self.risk.high_threshold {
            return Err(Error::Config(
                "medium_threshold must not exceed high_threshold".into(),
            ));
        }
        if self.risk.significant_pct < Decimal::ZERO {
            return Err(Error::Config("significant_pct must be >= 0".into()));
        }
        if self.logging.audit_file.is_empty() {
            return Err(Error::Config("audit_file must not be empty".into()));
        }
        Ok(())
    }

    /// Volatility scaling for the grid engine.
    pub fn scaling(&self) -> VolatilityScaling {
        VolatilityScaling {
            reference_volatility: self.grid.reference_volatility,
            min_multiplier: self.grid.min_multiplier,
            max_multiplier: self.grid.max_multiplier,
        }
    }

    /// Rebalancer configured from the `[rebalance]` and `[risk]` sections.
    pub fn rebalancer(&self) -> Rebalancer {
        Rebalancer::new(
            RebalanceConfig {
                default_band_pct: self.rebalance.default_band_pct,
            },
            RiskConfig {
                high_threshold: self.risk.high_threshold,
                medium_threshold: self.risk.medium_threshold,
                significant_pct: self.risk.significant_pct,
            },
        )
    }

    /// Full path to the audit log file.
    pub fn audit_path(&self) -> std::path::PathBuf {
        Path::new(&self.logging.dir).join(&self.logging.audit_file)
    }
}
