//! Order book snapshot types.
//!
//! The host reports the five best levels of each side of a book,
//! best-first, with zeros padding any missing levels.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::{Instrument, Price, Side, Volume};

/// Number of price levels reported per side.
pub const BOOK_DEPTH: usize = 5;

/// Top-of-book state used to reject unusable snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookState {
    /// Both best bid and best ask are present.
    Valid,
    /// Best bid price is zero.
    NoBid,
    /// Best ask price is zero.
    NoAsk,
    /// Both sides are empty.
    Empty,
}

impl BookState {
    /// Check if this state allows trading decisions.
    pub fn is_tradeable(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

impl std::fmt::Display for BookState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Valid => write!(f, "VALID"),
            Self::NoBid => write!(f, "NO_BID"),
            Self::NoAsk => write!(f, "NO_ASK"),
            Self::Empty => write!(f, "EMPTY"),
        }
    }
}

/// Best bid and ask of a book, as last seen.
///
/// Zero prices mean "not yet known".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Touch {
    pub bid: Price,
    pub ask: Price,
}

impl Touch {
    pub fn new(bid: Price, ask: Price) -> Self {
        Self { bid, ask }
    }

    /// Both sides have been observed.
    pub fn is_known(&self) -> bool {
        self.bid.is_positive() && self.ask.is_positive()
    }
}

/// Five-level order book snapshot for one instrument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSnapshot {
    pub instrument: Instrument,
    /// Non-decreasing per instrument; used to drop reordered deliveries.
    pub sequence_number: u64,
    pub ask_prices: [Price; BOOK_DEPTH],
    pub ask_volumes: [Volume; BOOK_DEPTH],
    pub bid_prices: [Price; BOOK_DEPTH],
    pub bid_volumes: [Volume; BOOK_DEPTH],
}

impl BookSnapshot {
    /// Build a snapshot from raw host arrays.
    ///
    /// Shorter sequences are zero-padded to [`BOOK_DEPTH`]; longer ones are
    /// rejected.
    pub fn from_levels(
        instrument: Instrument,
        sequence_number: u64,
        ask_prices: &[i64],
        ask_volumes: &[u32],
        bid_prices: &[i64],
        bid_volumes: &[u32],
    ) -> Result<Self, CoreError> {
        Ok(Self {
            instrument,
            sequence_number,
            ask_prices: pad_prices(ask_prices, "ask_prices")?,
            ask_volumes: pad_volumes(ask_volumes, "ask_volumes")?,
            bid_prices: pad_prices(bid_prices, "bid_prices")?,
            bid_volumes: pad_volumes(bid_volumes, "bid_volumes")?,
        })
    }

    pub fn best_ask(&self) -> Price {
        self.ask_prices[0]
    }

    pub fn best_bid(&self) -> Price {
        self.bid_prices[0]
    }

    pub fn best_ask_volume(&self) -> Volume {
        self.ask_volumes[0]
    }

    pub fn best_bid_volume(&self) -> Volume {
        self.bid_volumes[0]
    }

    /// Top-of-book state. Only the prices are checked: the host pads
    /// missing levels with zero prices.
    pub fn state(&self) -> BookState {
        match (self.best_bid().is_positive(), self.best_ask().is_positive()) {
            (true, true) => BookState::Valid,
            (true, false) => BookState::NoAsk,
            (false, true) => BookState::NoBid,
            (false, false) => BookState::Empty,
        }
    }

    /// Best bid and ask.
    pub fn touch(&self) -> Touch {
        Touch::new(self.best_bid(), self.best_ask())
    }

    /// Levels of one side, best-first.
    pub fn levels(&self, side: Side) -> impl Iterator<Item = (Price, Volume)> + '_ {
        let (prices, volumes) = match side {
            Side::Buy => (&self.bid_prices, &self.bid_volumes),
            Side::Sell => (&self.ask_prices, &self.ask_volumes),
        };
        prices.iter().copied().zip(volumes.iter().copied())
    }

    /// Price of the first level at which cumulative volume from the touch
    /// reaches `threshold`; the worst reported level if it never does.
    pub fn depth_cutoff(&self, side: Side, threshold: Volume) -> Price {
        let mut cumulative = Volume::ZERO;
        let mut worst = Price::ZERO;
        for (price, volume) in self.levels(side) {
            cumulative = cumulative + volume;
            if cumulative >= threshold {
                return price;
            }
            worst = price;
        }
        worst
    }
}

fn pad_prices(raw: &[i64], field: &str) -> Result<[Price; BOOK_DEPTH], CoreError> {
    if raw.len() > BOOK_DEPTH {
        return Err(CoreError::InvalidBook(format!(
            "{field} has {} levels, max {BOOK_DEPTH}",
            raw.len()
        )));
    }
    let mut out = [Price::ZERO; BOOK_DEPTH];
    for (slot, &cents) in out.iter_mut().zip(raw) {
        *slot = Price::new(cents);
    }
    Ok(out)
}

fn pad_volumes(raw: &[u32], field: &str) -> Result<[Volume; BOOK_DEPTH], CoreError> {
    if raw.len() > BOOK_DEPTH {
        return Err(CoreError::InvalidBook(format!(
            "{field} has {} levels, max {BOOK_DEPTH}",
            raw.len()
        )));
    }
    let mut out = [Volume::ZERO; BOOK_DEPTH];
    for (slot, &lots) in out.iter_mut().zip(raw) {
        *slot = Volume::new(lots);
    }
    Ok(out)
}
