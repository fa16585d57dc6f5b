//! Quoting configuration.

use pairmm_core::limits::{
    CLEAR_DEPTH_LOTS, LOT_SIZE, POSITION_LIMIT, QUOTE_SKEW_TICKS, TICK_SIZE_IN_CENTS,
};
use pairmm_core::{CoreError, Volume};
use serde::{Deserialize, Serialize};

/// Market making configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoterConfig {
    /// Volume of every quote.
    #[serde(default = "default_lot_size")]
    pub lot_size: u32,

    /// Absolute ETF position the quotes may build up to.
    #[serde(default = "default_position_limit")]
    pub position_limit: i64,

    /// Price step between ladder rungs, in cents.
    #[serde(default = "default_tick_size")]
    pub tick_size: i64,

    /// Cumulative book volume, in lots, past which own quotes are cleared.
    #[serde(default = "default_clear_depth_lots")]
    pub clear_depth_lots: u32,

    /// Ticks between the future's touch and the innermost quote.
    #[serde(default = "default_skew_ticks")]
    pub skew_ticks: i64,
}

fn default_lot_size() -> u32 {
    LOT_SIZE.inner()
}

fn default_position_limit() -> i64 {
    POSITION_LIMIT
}

fn default_tick_size() -> i64 {
    TICK_SIZE_IN_CENTS
}

fn default_clear_depth_lots() -> u32 {
    CLEAR_DEPTH_LOTS
}

fn default_skew_ticks() -> i64 {
    QUOTE_SKEW_TICKS
}

impl Default for QuoterConfig {
    fn default() -> Self {
        Self {
            lot_size: default_lot_size(),
            position_limit: default_position_limit(),
            tick_size: default_tick_size(),
            clear_depth_lots: default_clear_depth_lots(),
            skew_ticks: default_skew_ticks(),
        }
    }
}

impl QuoterConfig {
    pub fn lot(&self) -> Volume {
        Volume::new(self.lot_size)
    }

    /// Cumulative volume at which book clearing cuts off.
    pub fn clear_threshold(&self) -> Volume {
        Volume::new(self.lot_size.saturating_mul(self.clear_depth_lots))
    }

    /// Reject values the ladder arithmetic cannot work with.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.lot_size == 0 {
            return Err(CoreError::InvalidConfig("lot_size must be positive".into()));
        }
        if self.tick_size <= 0 {
            return Err(CoreError::InvalidConfig("tick_size must be positive".into()));
        }
        if self.position_limit < 0 {
            return Err(CoreError::InvalidConfig(
                "position_limit must not be negative".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_toml() {
        let config: QuoterConfig = toml::from_str("").unwrap();
        assert_eq!(config.lot_size, 20);
        assert_eq!(config.position_limit, 100);
        assert_eq!(config.tick_size, 100);
        assert_eq!(config.clear_threshold(), Volume::new(60));
        assert_eq!(config.skew_ticks, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_tick_rejected() {
        let config = QuoterConfig {
            tick_size: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(CoreError::InvalidConfig(_))));
    }
}
