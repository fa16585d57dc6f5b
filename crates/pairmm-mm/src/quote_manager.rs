//! Quote lifecycle on ETF snapshots.
//!
//! One pass per accepted ETF snapshot while the market is not crossed:
//! 1. clear own quotes deeper than the clearing threshold
//! 2. place the planned ladder through the ledger
//!
//! Sends are best effort. A throttled insert or cancel is not retried; the
//! next snapshot recomputes everything from the ledger's contents.

use pairmm_core::{BookSnapshot, ClientOrderId, Lifespan, Side, Touch};
use pairmm_executor::{Clock, OrderLedger, OrderSender};
use tracing::debug;

use crate::config::QuoterConfig;
use crate::quote_engine::QuoteEngine;

/// What one market-making pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteReport {
    /// Cancels sent by book clearing.
    pub cleared: usize,
    /// Ids of quotes placed.
    pub placed: Vec<ClientOrderId>,
    /// Planned quotes dropped by the rate limit.
    pub throttled: usize,
}

/// Drives [`QuoteEngine`] plans through an [`OrderLedger`].
#[derive(Debug, Clone, Default)]
pub struct QuoteManager {
    engine: QuoteEngine,
}

impl QuoteManager {
    pub fn new(config: QuoterConfig) -> Self {
        Self {
            engine: QuoteEngine::new(config),
        }
    }

    pub fn engine(&self) -> &QuoteEngine {
        &self.engine
    }

    /// Cancel own quotes past the clearing cutoffs, bids first. Returns the
    /// number of cancels sent.
    pub fn clear_book<S: OrderSender, C: Clock>(
        &self,
        ledger: &mut OrderLedger<S, C>,
        etf: &BookSnapshot,
    ) -> usize {
        let cutoffs = self.engine.clear_cutoffs(etf);
        let mut sent = 0;
        for side in [Side::Buy, Side::Sell] {
            for id in ledger.select(side, |o| cutoffs.is_deep(side, o.price)) {
                if ledger.cancel(id) {
                    sent += 1;
                }
            }
        }
        debug!(
            bid_cutoff = %cutoffs.bid,
            ask_cutoff = %cutoffs.ask,
            cancels = sent,
            "Book cleared"
        );
        sent
    }

    /// Run one market-making pass.
    ///
    /// Capacity is taken from the ledger before clearing cancels are
    /// confirmed, so orders pending cancel still count against it.
    pub fn make_market<S: OrderSender, C: Clock>(
        &self,
        ledger: &mut OrderLedger<S, C>,
        etf: &BookSnapshot,
        future: Touch,
        position: i64,
    ) -> QuoteReport {
        let mut report = QuoteReport {
            cleared: self.clear_book(ledger, etf),
            ..Default::default()
        };

        let ladder = self.engine.plan(
            etf,
            future,
            position,
            ledger.count(Side::Buy),
            ledger.count(Side::Sell),
            |side, price| ledger.is_quoted(side, price),
        );

        let lot = self.engine.lot();
        let orders = ladder
            .asks
            .iter()
            .map(|&p| (Side::Sell, p))
            .chain(ladder.bids.iter().map(|&p| (Side::Buy, p)));
        for (side, price) in orders {
            match ledger.place(side, price, lot, Lifespan::GoodForDay) {
                Some(id) => report.placed.push(id),
                None => report.throttled += 1,
            }
        }

        debug!(
            position,
            asks = ladder.asks.len(),
            bids = ladder.bids.len(),
            placed = report.placed.len(),
            throttled = report.throttled,
            "Market making pass"
        );
        report
    }
}
