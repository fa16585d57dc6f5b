//! Ledger of the agent's own orders.
//!
//! Tracks every live ETF order per side and every hedge whose fill has not
//! arrived yet. The ledger is the only path to the transport: it asks the
//! throttle for a slot, allocates the client order id, forwards the command
//! and records it.
//!
//! Entries reflect what the agent has sent. An order leaves the ledger only
//! when the exchange reports it finished (nothing remaining) or errors it,
//! never when a cancel is merely requested.

use std::collections::{BTreeMap, BTreeSet};

use pairmm_core::{ClientOrderId, Lifespan, OrderState, Price, RestingOrder, Side, Volume};
use pairmm_telemetry::Metrics;
use tracing::{debug, info};

use crate::clock::Clock;
use crate::ids::OrderIdGenerator;
use crate::sender::OrderSender;
use crate::throttle::MessageThrottle;

/// Running totals of ledger activity.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LedgerStats {
    pub inserts: u64,
    pub cancels: u64,
    pub hedges: u64,
    /// Inserts and cancels skipped because the rate window was full.
    pub throttled: u64,
}

/// Own orders, own hedges, and the gate in front of the transport.
pub struct OrderLedger<S: OrderSender, C: Clock> {
    sender: S,
    throttle: MessageThrottle<C>,
    ids: OrderIdGenerator,
    /// Live buy orders keyed by id (ids increase, so this is send order).
    bids: BTreeMap<ClientOrderId, RestingOrder>,
    /// Live sell orders keyed by id.
    asks: BTreeMap<ClientOrderId, RestingOrder>,
    /// Hedge buys awaiting their fill.
    hedge_bids: BTreeSet<ClientOrderId>,
    /// Hedge sells awaiting their fill.
    hedge_asks: BTreeSet<ClientOrderId>,
    stats: LedgerStats,
}

impl<S: OrderSender, C: Clock> OrderLedger<S, C> {
    /// Create an empty ledger in front of `sender`.
    pub fn new(sender: S, throttle: MessageThrottle<C>) -> Self {
        Self {
            sender,
            throttle,
            ids: OrderIdGenerator::new(),
            bids: BTreeMap::new(),
            asks: BTreeMap::new(),
            hedge_bids: BTreeSet::new(),
            hedge_asks: BTreeSet::new(),
            stats: LedgerStats::default(),
        }
    }

    /// Send a new ETF order if the rate window has room.
    ///
    /// Returns `None` when throttled; nothing is sent, recorded, or
    /// allocated in that case.
    pub fn place(
        &mut self,
        side: Side,
        price: Price,
        volume: Volume,
        lifespan: Lifespan,
    ) -> Option<ClientOrderId> {
        if !self.throttle.try_admit() {
            self.stats.throttled += 1;
            Metrics::throttled("insert");
            debug!(side = %side, price = %price, volume = %volume, "Insert throttled");
            return None;
        }

        let id = self.ids.next_id();
        self.sender.insert_order(id, side, price, volume, lifespan);
        self.book_mut(side)
            .insert(id, RestingOrder::sent(id, side, price, volume, lifespan));
        self.stats.inserts += 1;
        Metrics::command_sent("insert");

        debug!(
            order_id = %id,
            side = %side,
            price = %price,
            volume = %volume,
            lifespan = %lifespan,
            "Order sent"
        );
        Some(id)
    }

    /// Request cancellation of a live order.
    ///
    /// Returns whether the cancel was sent, not whether the exchange will
    /// honour it. The order stays in the ledger until its final status.
    pub fn cancel(&mut self, id: ClientOrderId) -> bool {
        if self.get(id).is_none() {
            debug!(order_id = %id, "Cancel for unknown order ignored");
            return false;
        }

        if !self.throttle.try_admit() {
            self.stats.throttled += 1;
            Metrics::throttled("cancel");
            debug!(order_id = %id, "Cancel throttled");
            return false;
        }

        self.sender.cancel_order(id);
        self.stats.cancels += 1;
        Metrics::command_sent("cancel");
        debug!(order_id = %id, "Cancel sent");
        true
    }

    /// Remove an order from whichever side holds it. Safe for unknown ids.
    pub fn retire(&mut self, id: ClientOrderId) -> Option<RestingOrder> {
        self.bids.remove(&id).or_else(|| self.asks.remove(&id))
    }

    /// Apply an exchange status report.
    ///
    /// Returns the order's new state, or `None` for ids the ledger does not
    /// hold. Terminal states retire the order.
    pub fn record_status(
        &mut self,
        id: ClientOrderId,
        filled: Volume,
        remaining: Volume,
    ) -> Option<OrderState> {
        let order = self.get_mut(id)?;
        let previous = order.state;
        let state = OrderState::from_status(order.volume, filled, remaining);
        order.state = state;
        order.filled = filled;

        debug!(
            order_id = %id,
            from = %previous,
            to = %state,
            unfilled = %order.remaining(),
            "Order state changed"
        );

        if state.is_terminal() {
            self.retire(id);
        }
        Some(state)
    }

    /// Mark an order rejected by the exchange and retire it.
    pub fn reject(&mut self, id: ClientOrderId) -> Option<RestingOrder> {
        let mut order = self.retire(id)?;
        order.state = OrderState::Rejected;
        debug!(order_id = %id, "Order rejected");
        Some(order)
    }

    /// Send a hedge on the future.
    ///
    /// Hedges are never dropped: if the rate window is full this blocks
    /// until a slot frees up.
    pub fn hedge(&mut self, side: Side, price: Price, volume: Volume) -> ClientOrderId {
        let waited = self.throttle.admit_blocking();

        let id = self.ids.next_id();
        match side {
            Side::Buy => self.hedge_bids.insert(id),
            Side::Sell => self.hedge_asks.insert(id),
        };
        self.sender.hedge_order(id, side, price, volume);
        self.stats.hedges += 1;
        Metrics::command_sent("hedge");

        info!(
            order_id = %id,
            side = %side,
            price = %price,
            volume = %volume,
            waited_ms = waited.as_millis() as u64,
            "Hedge sent"
        );
        id
    }

    /// Remove an outstanding hedge, returning its side if it was known.
    pub fn retire_hedge(&mut self, id: ClientOrderId) -> Option<Side> {
        if self.hedge_bids.remove(&id) {
            Some(Side::Buy)
        } else if self.hedge_asks.remove(&id) {
            Some(Side::Sell)
        } else {
            None
        }
    }

    /// Limit price of a live order.
    pub fn price_of(&self, id: ClientOrderId) -> Option<Price> {
        self.get(id).map(|o| o.price)
    }

    /// Side of a live order.
    pub fn side_of(&self, id: ClientOrderId) -> Option<Side> {
        self.get(id).map(|o| o.side)
    }

    pub fn get(&self, id: ClientOrderId) -> Option<&RestingOrder> {
        self.bids.get(&id).or_else(|| self.asks.get(&id))
    }

    /// Live orders on one side, oldest first.
    pub fn orders(&self, side: Side) -> impl Iterator<Item = &RestingOrder> + '_ {
        self.book(side).values()
    }

    /// Number of live orders on one side.
    pub fn count(&self, side: Side) -> usize {
        self.book(side).len()
    }

    /// Whether a live order on `side` already sits at `price`.
    pub fn is_quoted(&self, side: Side, price: Price) -> bool {
        self.book(side).values().any(|o| o.price == price)
    }

    /// Ids of live orders on `side` matching `pred`, oldest first.
    pub fn select(&self, side: Side, pred: impl Fn(&RestingOrder) -> bool) -> Vec<ClientOrderId> {
        self.book(side)
            .values()
            .filter(|o| pred(o))
            .map(|o| o.id)
            .collect()
    }

    /// Hedges still awaiting their fill.
    pub fn hedge_count(&self) -> usize {
        self.hedge_bids.len() + self.hedge_asks.len()
    }

    /// Client order ids allocated this session, orders and hedges alike.
    pub fn ids_issued(&self) -> u64 {
        self.ids.issued()
    }

    pub fn stats(&self) -> LedgerStats {
        self.stats
    }

    /// Messages currently inside the rate window.
    pub fn rate_usage(&mut self) -> usize {
        self.throttle.in_window()
    }

    pub fn sender(&self) -> &S {
        &self.sender
    }

    pub fn sender_mut(&mut self) -> &mut S {
        &mut self.sender
    }

    pub fn throttle_mut(&mut self) -> &mut MessageThrottle<C> {
        &mut self.throttle
    }

    /// Consume the ledger, handing back the transport.
    pub fn into_sender(self) -> S {
        self.sender
    }

    fn book(&self, side: Side) -> &BTreeMap<ClientOrderId, RestingOrder> {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        }
    }

    fn book_mut(&mut self, side: Side) -> &mut BTreeMap<ClientOrderId, RestingOrder> {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }

    fn get_mut(&mut self, id: ClientOrderId) -> Option<&mut RestingOrder> {
        if self.bids.contains_key(&id) {
            self.bids.get_mut(&id)
        } else {
            self.asks.get_mut(&id)
        }
    }
}
