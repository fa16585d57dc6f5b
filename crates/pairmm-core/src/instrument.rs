//! Instrument identification.
//!
//! The agent trades exactly one pair: an ETF, where it quotes and takes,
//! and the future the ETF tracks, where it only hedges.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One leg of the traded pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Instrument {
    Future,
    Etf,
}

impl Instrument {
    /// Both instruments, in index order.
    pub const ALL: [Self; 2] = [Self::Future, Self::Etf];

    /// Index for per-instrument arrays.
    pub fn index(&self) -> usize {
        match self {
            Self::Future => 0,
            Self::Etf => 1,
        }
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Future => write!(f, "future"),
            Self::Etf => write!(f, "etf"),
        }
    }
}
