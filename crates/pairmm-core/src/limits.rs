//! Fixed contract constants of the strategy and the exchange.
//!
//! These are the canonical values; runtime configuration defaults to them.

use crate::{Price, Volume};

/// Volume of every market-making quote.
pub const LOT_SIZE: Volume = Volume::new(20);

/// Absolute ETF position the agent may never exceed.
pub const POSITION_LIMIT: i64 = 100;

/// Absolute position a single arbitrage order may build up to.
pub const ARBITRAGE_LIMIT: i64 = 20;

/// Exchange tick size in cents.
pub const TICK_SIZE_IN_CENTS: i64 = 100;

/// Outbound commands allowed per rate window.
pub const MESSAGE_LIMIT: u32 = 50;

/// Rate window length in milliseconds (one second plus a safety margin).
pub const MESSAGE_WINDOW_MS: u64 = 1010;

/// Levels of cumulative book volume, in lots, that make a quote "deep".
pub const CLEAR_DEPTH_LOTS: u32 = 3;

/// Distance from the future's touch, in ticks, to the innermost quote.
pub const QUOTE_SKEW_TICKS: i64 = 2;

/// Lowest bid price the exchange accepts.
pub const MINIMUM_BID: Price = Price::new(1);

/// Highest ask price the exchange accepts.
pub const MAXIMUM_ASK: Price = Price::new(2_147_483_647);

/// Hedge sell price: the lowest tick-aligned price strictly above the
/// minimum bid, so the hedge crosses any resting bid.
pub const MIN_BID_NEAREST_TICK: Price = Price::new(
    (MINIMUM_BID.0 + TICK_SIZE_IN_CENTS) / TICK_SIZE_IN_CENTS * TICK_SIZE_IN_CENTS,
);

/// Hedge buy price: the highest tick-aligned price not above the maximum ask.
pub const MAX_ASK_NEAREST_TICK: Price =
    Price::new(MAXIMUM_ASK.0 / TICK_SIZE_IN_CENTS * TICK_SIZE_IN_CENTS);
