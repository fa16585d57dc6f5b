//! Ladder price calculation.
//!
//! Quotes are anchored on the future, not on the ETF book:
//! - asks run from `future_ask + skew` up to (not including) the ETF ask
//! - bids run from the ETF bid up to (not including) `future_bid - skew`
//!
//! Every rung is one lot. How many rungs each side gets is bounded by the
//! position room left on that side, in lots, minus the orders already
//! resting there. A long position therefore leaves fewer bids to place and
//! a short one fewer asks.

use pairmm_core::{BookSnapshot, Price, Side, Touch, Volume};

use crate::config::QuoterConfig;

/// Prices at or beyond which own quotes count as too deep to fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearCutoffs {
    /// Own bids at or below this are cleared.
    pub bid: Price,
    /// Own asks at or above this are cleared.
    pub ask: Price,
}

impl ClearCutoffs {
    /// Whether an own quote at `price` on `side` should be cleared.
    pub fn is_deep(&self, side: Side, price: Price) -> bool {
        match side {
            Side::Buy => price <= self.bid,
            Side::Sell => price >= self.ask,
        }
    }
}

/// New quotes to place, innermost first per side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteLadder {
    pub asks: Vec<Price>,
    pub bids: Vec<Price>,
}

impl QuoteLadder {
    pub fn is_empty(&self) -> bool {
        self.asks.is_empty() && self.bids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.asks.len() + self.bids.len()
    }
}

/// Stateless ladder calculator.
#[derive(Debug, Clone, Default)]
pub struct QuoteEngine {
    config: QuoterConfig,
}

impl QuoteEngine {
    pub fn new(config: QuoterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &QuoterConfig {
        &self.config
    }

    /// Whether the ETF touch sits strictly outside the future's touch on
    /// both sides, leaving room to quote inside it.
    pub fn should_make_market(etf: &BookSnapshot, future: Touch) -> bool {
        etf.best_ask() > future.ask && etf.best_bid() < future.bid
    }

    /// Cutoffs where cumulative visible volume first reaches the clearing
    /// threshold, falling back to the last reported level per side.
    pub fn clear_cutoffs(&self, etf: &BookSnapshot) -> ClearCutoffs {
        let threshold = self.config.clear_threshold();
        ClearCutoffs {
            bid: etf.depth_cutoff(Side::Buy, threshold),
            ask: etf.depth_cutoff(Side::Sell, threshold),
        }
    }

    /// Innermost bid price: the future bid less the skew.
    pub fn max_bid(&self, future: Touch) -> Price {
        future
            .bid
            .offset_ticks(-self.config.skew_ticks, self.config.tick_size)
    }

    /// Innermost ask price: the future ask plus the skew.
    pub fn min_ask(&self, future: Touch) -> Price {
        future
            .ask
            .offset_ticks(self.config.skew_ticks, self.config.tick_size)
    }

    /// Number of new quotes `side` may receive. Negative when the side is
    /// already over-committed.
    pub fn capacity(&self, side: Side, position: i64, resting: usize) -> i64 {
        let room = match side {
            Side::Buy => self.config.position_limit - position,
            Side::Sell => position + self.config.position_limit,
        };
        room.div_euclid(i64::from(self.config.lot_size.max(1))) - resting as i64
    }

    /// Candidate rung prices for one side, innermost first, before capacity.
    /// Lazy: callers stop the walk once capacity is used up.
    pub fn rungs(
        &self,
        side: Side,
        etf: &BookSnapshot,
        future: Touch,
    ) -> impl Iterator<Item = Price> {
        let (start, end) = match side {
            Side::Sell => (self.min_ask(future), etf.best_ask()),
            Side::Buy => (etf.best_bid(), self.max_bid(future)),
        };
        let step = self.config.tick_size.max(1);

        std::iter::successors(Some(start), move |p| Some(Price::new(p.inner() + step)))
            .take_while(move |p| *p < end)
    }

    /// Plan the ladder.
    ///
    /// `is_quoted(side, price)` reports whether an own order already rests
    /// there; such rungs are skipped without using capacity. Asks are
    /// planned before bids.
    pub fn plan(
        &self,
        etf: &BookSnapshot,
        future: Touch,
        position: i64,
        resting_bids: usize,
        resting_asks: usize,
        is_quoted: impl Fn(Side, Price) -> bool,
    ) -> QuoteLadder {
        let mut ladder = QuoteLadder::default();

        for (side, resting) in [(Side::Sell, resting_asks), (Side::Buy, resting_bids)] {
            let mut capacity = self.capacity(side, position, resting);
            let out = match side {
                Side::Sell => &mut ladder.asks,
                Side::Buy => &mut ladder.bids,
            };
            for price in self.rungs(side, etf, future) {
                if capacity <= 0 {
                    break;
                }
                if is_quoted(side, price) {
                    continue;
                }
                out.push(price);
                capacity -= 1;
            }
        }

        ladder
    }

    /// Quote volume.
    pub fn lot(&self) -> Volume {
        self.config.lot()
    }
}
