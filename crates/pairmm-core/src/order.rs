//! Order-related types and identifiers.
//!
//! Provides order side, lifespan and client order ID types
//! for the trading system.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Order side: buy (bid) or sell (ask).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Returns the opposite side.
    pub fn opposite(&self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }

    /// Returns 1 for buy, -1 for sell (for position calculations).
    pub fn sign(&self) -> i64 {
        match self {
            Self::Buy => 1,
            Self::Sell => -1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "buy"),
            Self::Sell => write!(f, "sell"),
        }
    }
}

/// How long an order may rest on the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Lifespan {
    /// Rests until filled, cancelled, or the session ends. Used for quotes.
    #[default]
    #[serde(rename = "gfd")]
    GoodForDay,
    /// Fills what it can immediately, the remainder is cancelled. Used for
    /// arbitrage so that no resting residue is left behind.
    #[serde(rename = "fak")]
    FillAndKill,
}

impl fmt::Display for Lifespan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GoodForDay => write!(f, "gfd"),
            Self::FillAndKill => write!(f, "fak"),
        }
    }
}

/// Client order ID.
///
/// Allocated from a single per-session counter starting at 1. Ids are
/// assigned only when a command actually leaves the agent and are never
/// reused, so an id uniquely names one order or hedge for the session.
/// Zero is reserved by the host for session-level errors.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ClientOrderId(u64);

impl ClientOrderId {
    /// Id the host uses for errors that do not refer to an order.
    pub const SESSION: Self = Self(0);

    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// True for the reserved session-level id.
    pub fn is_session(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for ClientOrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ClientOrderId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}
