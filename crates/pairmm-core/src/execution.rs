//! Execution-related types for order lifecycle management.
//!
//! This module provides types for:
//! - Order lifecycle states
//! - Resting order bookkeeping
//! - Outbound commands handed to the host

use serde::{Deserialize, Serialize};

use crate::order::{ClientOrderId, Lifespan, Side};
use crate::{Price, Volume};

// ============================================================================
// Order Tracking Types
// ============================================================================

/// State of an order in its lifecycle.
///
/// ```text
/// Sent ──► Working ──► PartiallyFilled ──┐ (self-loop)
///   │         │              │  ◄────────┘
///   │         ├──────────────┴──► FullyFilled
///   │         └──────────────┴──► Cancelled
///   └──► Rejected
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OrderState {
    /// Insert command handed to the host, no status seen yet.
    #[default]
    Sent,
    /// Acknowledged by the exchange and resting with nothing filled.
    Working,
    /// Some volume traded, some still resting.
    PartiallyFilled,
    /// All volume traded.
    FullyFilled,
    /// Removed from the book with volume left (cancel or fill-and-kill).
    Cancelled,
    /// Refused by the exchange.
    Rejected,
}

impl OrderState {
    /// Returns true if the order is in a terminal state.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::FullyFilled | Self::Cancelled | Self::Rejected)
    }

    /// State implied by a status report.
    ///
    /// A report with nothing remaining is terminal: fully filled when the
    /// whole original volume traded, cancelled otherwise.
    #[must_use]
    pub fn from_status(original: Volume, filled: Volume, remaining: Volume) -> Self {
        if remaining.is_zero() {
            if filled >= original {
                Self::FullyFilled
            } else {
                Self::Cancelled
            }
        } else if filled.is_zero() {
            Self::Working
        } else {
            Self::PartiallyFilled
        }
    }
}

impl std::fmt::Display for OrderState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sent => write!(f, "sent"),
            Self::Working => write!(f, "working"),
            Self::PartiallyFilled => write!(f, "partially_filled"),
            Self::FullyFilled => write!(f, "fully_filled"),
            Self::Cancelled => write!(f, "cancelled"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

/// An order this agent has on the ETF book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestingOrder {
    pub id: ClientOrderId,
    pub side: Side,
    /// Limit price.
    pub price: Price,
    /// Original order volume.
    pub volume: Volume,
    pub lifespan: Lifespan,
    pub state: OrderState,
    /// Volume traded so far, as last reported by the exchange.
    pub filled: Volume,
}

impl RestingOrder {
    /// Record a freshly sent order.
    #[must_use]
    pub fn sent(id: ClientOrderId, side: Side, price: Price, volume: Volume, lifespan: Lifespan) -> Self {
        Self {
            id,
            side,
            price,
            volume,
            lifespan,
            state: OrderState::Sent,
            filled: Volume::ZERO,
        }
    }

    /// Returns the remaining unfilled volume.
    #[must_use]
    pub fn remaining(&self) -> Volume {
        self.volume - self.filled
    }
}

// ============================================================================
// Outbound Commands
// ============================================================================

/// Command the agent hands to the host transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    InsertOrder {
        id: ClientOrderId,
        side: Side,
        price: Price,
        volume: Volume,
        lifespan: Lifespan,
    },
    CancelOrder {
        id: ClientOrderId,
    },
    HedgeOrder {
        id: ClientOrderId,
        side: Side,
        price: Price,
        volume: Volume,
    },
}

impl Command {
    /// Order id the command refers to.
    pub fn id(&self) -> ClientOrderId {
        match self {
            Self::InsertOrder { id, .. } | Self::CancelOrder { id } | Self::HedgeOrder { id, .. } => {
                *id
            }
        }
    }

    /// Short label used for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InsertOrder { .. } => "insert",
            Self::CancelOrder { .. } => "cancel",
            Self::HedgeOrder { .. } => "hedge",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(OrderState::FullyFilled.is_terminal());
        assert!(OrderState::Cancelled.is_terminal());
        assert!(OrderState::Rejected.is_terminal());
        assert!(!OrderState::Sent.is_terminal());
        assert!(!OrderState::PartiallyFilled.is_terminal());
        assert!(!OrderState::Working.is_terminal());
    }

    #[test]
    fn test_state_from_status() {
        let lot = Volume::new(20);
        assert_eq!(
            OrderState::from_status(lot, Volume::ZERO, lot),
            OrderState::Working
        );
        assert_eq!(
            OrderState::from_status(lot, Volume::new(5), Volume::new(15)),
            OrderState::PartiallyFilled
        );
        assert_eq!(
            OrderState::from_status(lot, lot, Volume::ZERO),
            OrderState::FullyFilled
        );
        assert_eq!(
            OrderState::from_status(lot, Volume::new(5), Volume::ZERO),
            OrderState::Cancelled
        );
    }

    #[test]
    fn test_remaining_volume() {
        let mut order = RestingOrder::sent(
            ClientOrderId::new(1),
            Side::Buy,
            Price::new(9_900),
            Volume::new(20),
            Lifespan::GoodForDay,
        );
        order.filled = Volume::new(8);
        assert_eq!(order.remaining(), Volume::new(12));
    }

    #[test]
    fn test_command_json_shape() {
        let cmd = Command::CancelOrder {
            id: ClientOrderId::new(7),
        };
        let json = serde_json::to_string(&cmd).unwrap();
        assert_eq!(json, r#"{"type":"cancel_order","id":7}"#);
        assert_eq!(cmd.kind(), "cancel");
    }
}
