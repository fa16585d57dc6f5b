//! Application configuration.
//!
//! Every field has a default, so an empty file (or no file at all) runs
//! with the exchange's contract values.

use crate::error::{AppError, AppResult};
use pairmm_core::limits::{
    ARBITRAGE_LIMIT, CLEAR_DEPTH_LOTS, LOT_SIZE, MAXIMUM_ASK, MINIMUM_BID, POSITION_LIMIT,
    QUOTE_SKEW_TICKS, TICK_SIZE_IN_CENTS,
};
use pairmm_core::Price;
use pairmm_detector::DetectorConfig;
use pairmm_executor::ThrottleConfig;
use pairmm_mm::QuoterConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Position and sizing limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraderLimits {
    /// Volume of every market-making quote.
    #[serde(default = "default_lot_size")]
    pub lot_size: u32,
    /// Absolute ETF position the agent may never exceed.
    #[serde(default = "default_position_limit")]
    pub position_limit: i64,
    /// Absolute position a single arbitrage order may build up to.
    #[serde(default = "default_arbitrage_limit")]
    pub arbitrage_limit: i64,
    /// Exchange tick size in cents.
    #[serde(default = "default_tick_size")]
    pub tick_size: i64,
}

fn default_lot_size() -> u32 {
    LOT_SIZE.inner()
}

fn default_position_limit() -> i64 {
    POSITION_LIMIT
}

fn default_arbitrage_limit() -> i64 {
    ARBITRAGE_LIMIT
}

fn default_tick_size() -> i64 {
    TICK_SIZE_IN_CENTS
}

impl Default for TraderLimits {
    fn default() -> Self {
        Self {
            lot_size: default_lot_size(),
            position_limit: default_position_limit(),
            arbitrage_limit: default_arbitrage_limit(),
            tick_size: default_tick_size(),
        }
    }
}

/// Ladder shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotingConfig {
    /// Visible volume, in lots, beyond which own quotes are cleared.
    #[serde(default = "default_clear_depth_lots")]
    pub clear_depth_lots: u32,
    /// Ticks between the future's touch and the innermost quote.
    #[serde(default = "default_skew_ticks")]
    pub skew_ticks: i64,
}

fn default_clear_depth_lots() -> u32 {
    CLEAR_DEPTH_LOTS
}

fn default_skew_ticks() -> i64 {
    QUOTE_SKEW_TICKS
}

impl Default for QuotingConfig {
    fn default() -> Self {
        Self {
            clear_depth_lots: default_clear_depth_lots(),
            skew_ticks: default_skew_ticks(),
        }
    }
}

/// Exchange price bounds used to price hedges so they always cross.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HedgeConfig {
    /// Lowest bid price the exchange accepts, in cents.
    #[serde(default = "default_min_bid")]
    pub min_bid: i64,
    /// Highest ask price the exchange accepts, in cents.
    #[serde(default = "default_max_ask")]
    pub max_ask: i64,
}

fn default_min_bid() -> i64 {
    MINIMUM_BID.inner()
}

fn default_max_ask() -> i64 {
    MAXIMUM_ASK.inner()
}

impl Default for HedgeConfig {
    fn default() -> Self {
        Self {
            min_bid: default_min_bid(),
            max_ask: default_max_ask(),
        }
    }
}

/// Config file used when no path is given.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Main application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub limits: TraderLimits,
    #[serde(default)]
    pub throttle: ThrottleConfig,
    #[serde(default)]
    pub quoting: QuotingConfig,
    #[serde(default)]
    pub hedge: HedgeConfig,
}

impl AppConfig {
    /// Load from a specific file.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config: {e}")))?;

        toml::from_str(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))
    }

    /// Load from an explicitly requested path, which must exist, or fall
    /// back to [`DEFAULT_CONFIG_PATH`] and then to defaults.
    pub fn load(explicit: Option<&str>) -> AppResult<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => Self::load_or_default(DEFAULT_CONFIG_PATH),
        }
    }

    /// Load from `path`, or use defaults if the file does not exist.
    pub fn load_or_default(path: &str) -> AppResult<Self> {
        if Path::new(path).exists() {
            Self::from_file(path)
        } else {
            tracing::warn!(path = %path, "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Reject configurations the strategy arithmetic cannot run with.
    pub fn validate(&self) -> AppResult<()> {
        let limits = &self.limits;
        if limits.lot_size == 0 {
            return Err(AppError::Config("limits.lot_size must be positive".into()));
        }
        if limits.tick_size <= 0 {
            return Err(AppError::Config("limits.tick_size must be positive".into()));
        }
        if limits.position_limit <= 0 {
            return Err(AppError::Config(
                "limits.position_limit must be positive".into(),
            ));
        }
        if limits.arbitrage_limit < 0 || limits.arbitrage_limit > limits.position_limit {
            return Err(AppError::Config(format!(
                "limits.arbitrage_limit must be within 0..={}",
                limits.position_limit
            )));
        }
        if self.throttle.max_messages == 0 || self.throttle.window_ms == 0 {
            return Err(AppError::Config(
                "throttle.max_messages and throttle.window_ms must be positive".into(),
            ));
        }
        if self.hedge.min_bid <= 0 || self.hedge.min_bid >= self.hedge.max_ask {
            return Err(AppError::Config(
                "hedge.min_bid must be positive and below hedge.max_ask".into(),
            ));
        }
        self.quoter_config().validate()?;
        Ok(())
    }

    pub fn detector_config(&self) -> DetectorConfig {
        DetectorConfig {
            arbitrage_limit: self.limits.arbitrage_limit,
        }
    }

    pub fn quoter_config(&self) -> QuoterConfig {
        QuoterConfig {
            lot_size: self.limits.lot_size,
            position_limit: self.limits.position_limit,
            tick_size: self.limits.tick_size,
            clear_depth_lots: self.quoting.clear_depth_lots,
            skew_ticks: self.quoting.skew_ticks,
        }
    }

    /// Price for hedge sells: the first tick above the minimum bid.
    pub fn hedge_sell_price(&self) -> Price {
        Price::new(self.hedge.min_bid + self.limits.tick_size).floor_to_tick(self.limits.tick_size)
    }

    /// Price for hedge buys: the last tick at or below the maximum ask.
    pub fn hedge_buy_price(&self) -> Price {
        Price::new(self.hedge.max_ask).floor_to_tick(self.limits.tick_size)
    }
}
