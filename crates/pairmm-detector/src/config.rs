//! Detector configuration.

use pairmm_core::limits::ARBITRAGE_LIMIT;
use serde::{Deserialize, Serialize};

/// Arbitrage sizing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Absolute position an arbitrage order may take the agent to.
    /// Tighter than the overall position limit so one burst of crosses
    /// cannot fill the whole inventory budget.
    #[serde(default = "default_arbitrage_limit")]
    pub arbitrage_limit: i64,
}

fn default_arbitrage_limit() -> i64 {
    ARBITRAGE_LIMIT
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            arbitrage_limit: default_arbitrage_limit(),
        }
    }
}
