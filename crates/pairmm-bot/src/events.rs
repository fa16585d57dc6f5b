//! Host event wire format.
//!
//! One JSON object per line, tagged by `type`:
//!
//! ```text
//! {"type":"order_book_update","instrument":"etf","sequence_number":3,
//!  "ask_prices":[10300],"ask_volumes":[10],"bid_prices":[9900],"bid_volumes":[10]}
//! {"type":"order_filled","id":4,"price":9900,"volume":15}
//! ```

use pairmm_core::{BookSnapshot, ClientOrderId, Instrument, Price, Volume};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::handler::TraderHandler;

/// Book levels as delivered by the host, best-first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookLevels {
    pub instrument: Instrument,
    pub sequence_number: u64,
    #[serde(default)]
    pub ask_prices: Vec<i64>,
    #[serde(default)]
    pub ask_volumes: Vec<u32>,
    #[serde(default)]
    pub bid_prices: Vec<i64>,
    #[serde(default)]
    pub bid_volumes: Vec<u32>,
}

impl BookLevels {
    pub fn to_snapshot(&self) -> AppResult<BookSnapshot> {
        Ok(BookSnapshot::from_levels(
            self.instrument,
            self.sequence_number,
            &self.ask_prices,
            &self.ask_volumes,
            &self.bid_prices,
            &self.bid_volumes,
        )?)
    }
}

/// One inbound host event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostEvent {
    OrderBookUpdate(BookLevels),
    TradeTicks(BookLevels),
    OrderFilled {
        id: ClientOrderId,
        price: Price,
        volume: Volume,
    },
    OrderStatus {
        id: ClientOrderId,
        fill_volume: Volume,
        remaining_volume: Volume,
        #[serde(default)]
        fees: i64,
    },
    HedgeFilled {
        id: ClientOrderId,
        price: Price,
        volume: Volume,
    },
    Error {
        #[serde(default)]
        id: ClientOrderId,
        message: String,
    },
}

impl HostEvent {
    /// Parse one JSON line.
    pub fn parse(line: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(line)?)
    }

    /// Event name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::OrderBookUpdate(_) => "order_book_update",
            Self::TradeTicks(_) => "trade_ticks",
            Self::OrderFilled { .. } => "order_filled",
            Self::OrderStatus { .. } => "order_status",
            Self::HedgeFilled { .. } => "hedge_filled",
            Self::Error { .. } => "error",
        }
    }

    /// Deliver the event to `handler`.
    ///
    /// Fails only when book levels cannot form a snapshot; the handler is
    /// not called in that case.
    pub fn dispatch<H: TraderHandler>(&self, handler: &mut H) -> AppResult<()> {
        match self {
            Self::OrderBookUpdate(levels) => handler.on_order_book_update(&levels.to_snapshot()?),
            Self::TradeTicks(levels) => handler.on_trade_ticks(&levels.to_snapshot()?),
            Self::OrderFilled { id, price, volume } => handler.on_order_filled(*id, *price, *volume),
            Self::OrderStatus {
                id,
                fill_volume,
                remaining_volume,
                fees,
            } => handler.on_order_status(*id, *fill_volume, *remaining_volume, *fees),
            Self::HedgeFilled { id, price, volume } => handler.on_hedge_filled(*id, *price, *volume),
            Self::Error { id, message } => handler.on_error(*id, message),
        }
        Ok(())
    }
}
