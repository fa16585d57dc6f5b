//! Arbitrage signal types.

use pairmm_core::{Lifespan, Price, Side, Volume};
use std::fmt;

/// Direction of the ETF's mispricing against the future.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mispricing {
    /// ETF best ask below the future's best bid: buy the ETF.
    EtfCheap,
    /// ETF best bid above the future's best ask: sell the ETF.
    EtfRich,
}

impl fmt::Display for Mispricing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EtfCheap => write!(f, "etf_cheap"),
            Self::EtfRich => write!(f, "etf_rich"),
        }
    }
}

/// A sized order taking an ETF/future cross.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArbitrageSignal {
    pub mispricing: Mispricing,
    pub side: Side,
    /// ETF touch price being taken.
    pub price: Price,
    pub volume: Volume,
}

impl ArbitrageSignal {
    /// Arbitrage orders never rest.
    pub fn lifespan(&self) -> Lifespan {
        Lifespan::FillAndKill
    }
}
