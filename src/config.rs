//! Application configuration loaded from environment variables.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::ConfigError;

/// Engine configuration loaded from environment variables.
///
/// All detection and sizing parameters live here and are passed explicitly
/// into [`crate::arbitrage::ArbitrageDetector`] at construction time; the
/// engine itself never reads the process environment.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Detection Parameters ===
    /// Number of outcomes a market must have to be evaluable (2 = H2H).
    #[serde(default = "default_outcome_count")]
    pub outcome_count: usize,

    /// Minimum profit margin as a fraction (0.005 = 0.5%).
    #[serde(default = "default_min_margin")]
    pub min_margin: Decimal,

    /// Market keys to scan on each event (comma-separated in the env).
    #[serde(default = "default_markets")]
    pub markets_to_scan: Vec<String>,

    // === Stake Sizing ===
    /// Total stake to split across outcomes of one opportunity.
    #[serde(default = "default_total_stake")]
    pub total_stake: Decimal,

    /// Starting bankroll for budget-policy sizing.
    #[serde(default = "default_start_bankroll")]
    pub start_bankroll: Decimal,

    /// Stake fraction per unit of margin (fractional-Kelly multiplier).
    #[serde(default = "default_kelly_multiplier")]
    pub kelly_multiplier: Decimal,

    /// Hard cap on bankroll fraction staked on a single arb.
    #[serde(default = "default_max_stake_per_arb")]
    pub max_stake_per_arb: Decimal,

    // === Deduplication ===
    /// Maximum number of remembered opportunity keys.
    #[serde(default = "default_dedup_capacity")]
    pub dedup_capacity: usize,

    /// Seconds before a remembered opportunity key expires.
    #[serde(default = "default_dedup_ttl_seconds")]
    pub dedup_ttl_seconds: u64,

    // === Logging ===
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,
}

fn default_outcome_count() -> usize {
    2
}

fn default_min_margin() -> Decimal {
    Decimal::new(5, 3) // 0.005 = 0.5%
}

fn default_markets() -> Vec<String> {
    vec!["h2h".to_string()]
}

fn default_total_stake() -> Decimal {
    Decimal::new(100, 0)
}

fn default_start_bankroll() -> Decimal {
    Decimal::new(100, 0)
}

fn default_kelly_multiplier() -> Decimal {
    Decimal::new(5, 0)
}

fn default_max_stake_per_arb() -> Decimal {
    Decimal::new(25, 2) // 0.25
}

fn default_dedup_capacity() -> usize {
    4096
}

fn default_dedup_ttl_seconds() -> u64 {
    3600
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            outcome_count: default_outcome_count(),
            min_margin: default_min_margin(),
            markets_to_scan: default_markets(),
            total_stake: default_total_stake(),
            start_bankroll: default_start_bankroll(),
            kelly_multiplier: default_kelly_multiplier(),
            max_stake_per_arb: default_max_stake_per_arb(),
            dedup_capacity: default_dedup_capacity(),
            dedup_ttl_seconds: default_dedup_ttl_seconds(),
            rust_log: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let config: Config = envy::from_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every option is in its valid range. Fails fast so no
    /// snapshot is ever processed with bad parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.outcome_count < 2 {
            return Err(ConfigError::Invalid {
                field: "outcome_count",
                reason: format!("must be at least 2, got {}", self.outcome_count),
            });
        }

        if self.min_margin < Decimal::ZERO || self.min_margin >= Decimal::ONE {
            return Err(ConfigError::Invalid {
                field: "min_margin",
                reason: format!("must be a fraction in [0, 1), got {}", self.min_margin),
            });
        }

        if self.markets_to_scan.is_empty() {
            return Err(ConfigError::Invalid {
                field: "markets_to_scan",
                reason: "must name at least one market key".to_string(),
            });
        }

        if self.total_stake <= Decimal::ZERO {
            return Err(ConfigError::Invalid {
                field: "total_stake",
                reason: format!("must be positive, got {}", self.total_stake),
            });
        }

        if self.kelly_multiplier <= Decimal::ZERO {
            return Err(ConfigError::Invalid {
                field: "kelly_multiplier",
                reason: format!("must be positive, got {}", self.kelly_multiplier),
            });
        }

        if self.max_stake_per_arb <= Decimal::ZERO || self.max_stake_per_arb > Decimal::ONE {
            return Err(ConfigError::Invalid {
                field: "max_stake_per_arb",
                reason: format!("must be a fraction in (0, 1], got {}", self.max_stake_per_arb),
            });
        }

        if self.dedup_capacity == 0 {
            return Err(ConfigError::Invalid {
                field: "dedup_capacity",
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(())
    }
}
