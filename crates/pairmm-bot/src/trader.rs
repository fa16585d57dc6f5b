//! Event coordinator.
//!
//! Owns every piece of strategy state and reacts to host events:
//!
//! ```text
//! book update ─► SnapshotGate ─┬─ future ─► cache touch, trim exposed quotes
//!                              └─ etf ────► crossed?   ─► ArbitrageDetector (FAK)
//!                                           outside?   ─► QuoteManager (GFD ladder)
//!                                           otherwise  ─► nothing
//!
//! order fill ─► PositionTracker ─► hedge on the future (blocking admission)
//! ```
//!
//! Events are handled strictly one at a time, so no state here is shared.

use chrono::{DateTime, Utc};
use pairmm_core::{BookSnapshot, ClientOrderId, Instrument, Price, Side, Volume};
use pairmm_detector::ArbitrageDetector;
use pairmm_executor::{Clock, MessageThrottle, OrderLedger, OrderSender};
use pairmm_feed::SnapshotGate;
use pairmm_mm::{trim_to_future, QuoteEngine, QuoteManager};
use pairmm_position::PositionTracker;
use pairmm_telemetry::{Metrics, SessionStats};
use tracing::{debug, info, trace, warn};

use crate::config::AppConfig;
use crate::handler::TraderHandler;

/// The market-making and arbitrage agent.
pub struct AutoTrader<S: OrderSender, C: Clock> {
    ledger: OrderLedger<S, C>,
    tracker: PositionTracker,
    gate: SnapshotGate,
    detector: ArbitrageDetector,
    quoter: QuoteManager,
    hedge_sell_price: Price,
    hedge_buy_price: Price,
    started_at: DateTime<Utc>,
}

impl<S: OrderSender, C: Clock> AutoTrader<S, C> {
    /// Create a trader sending through `sender`, timed by `clock`.
    pub fn new(config: &AppConfig, sender: S, clock: C) -> Self {
        let throttle = MessageThrottle::new(config.throttle.clone(), clock);
        Self {
            ledger: OrderLedger::new(sender, throttle),
            tracker: PositionTracker::new(),
            gate: SnapshotGate::new(),
            detector: ArbitrageDetector::new(config.detector_config()),
            quoter: QuoteManager::new(config.quoter_config()),
            hedge_sell_price: config.hedge_sell_price(),
            hedge_buy_price: config.hedge_buy_price(),
            started_at: Utc::now(),
        }
    }

    pub fn position(&self) -> i64 {
        self.tracker.position()
    }

    pub fn delta(&self) -> i64 {
        self.tracker.delta()
    }

    pub fn tracker(&self) -> &PositionTracker {
        &self.tracker
    }

    pub fn ledger(&self) -> &OrderLedger<S, C> {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut OrderLedger<S, C> {
        &mut self.ledger
    }

    pub fn gate(&self) -> &SnapshotGate {
        &self.gate
    }

    pub fn sender(&self) -> &S {
        self.ledger.sender()
    }

    pub fn sender_mut(&mut self) -> &mut S {
        self.ledger.sender_mut()
    }

    /// Consume the trader, handing back the transport.
    pub fn into_sender(self) -> S {
        self.ledger.into_sender()
    }

    /// Snapshot of the session so far.
    pub fn session_stats(&self) -> SessionStats {
        let ledger = self.ledger.stats();
        let gate = self.gate.stats();
        SessionStats {
            started_at: self.started_at,
            ended_at: Utc::now(),
            position: self.tracker.position(),
            delta: self.tracker.delta(),
            hedged: self.tracker.is_hedged(),
            etf_fills: self.tracker.etf_fills(),
            hedge_fills: self.tracker.hedge_fills(),
            live_bids: self.ledger.count(Side::Buy),
            live_asks: self.ledger.count(Side::Sell),
            outstanding_hedges: self.ledger.hedge_count(),
            ids_issued: self.ledger.ids_issued(),
            inserts_sent: ledger.inserts,
            cancels_sent: ledger.cancels,
            hedges_sent: ledger.hedges,
            sends_throttled: ledger.throttled,
            snapshots_accepted: gate.accepted,
            snapshots_discarded: gate.discarded(),
        }
    }

    fn on_future_book(&mut self, snapshot: &BookSnapshot) {
        self.tracker.update_future(snapshot.touch());
        trim_to_future(&mut self.ledger, self.tracker.future());
    }

    fn on_etf_book(&mut self, snapshot: &BookSnapshot) {
        let future = self.tracker.future();
        if !future.is_known() {
            debug!(
                sequence = snapshot.sequence_number,
                "Future price unknown, ETF snapshot not traded"
            );
            return;
        }

        let position = self.tracker.position();
        if ArbitrageDetector::is_crossed(snapshot, future) {
            if let Some(signal) = self.detector.check(snapshot, position, future) {
                let sent = self
                    .ledger
                    .place(signal.side, signal.price, signal.volume, signal.lifespan());
                info!(
                    mispricing = %signal.mispricing,
                    side = %signal.side,
                    price = %signal.price,
                    volume = %signal.volume,
                    sent = sent.is_some(),
                    "Arbitrage order"
                );
            }
        } else if QuoteEngine::should_make_market(snapshot, future) {
            self.quoter
                .make_market(&mut self.ledger, snapshot, future, position);
        } else {
            trace!(
                etf_bid = %snapshot.best_bid(),
                etf_ask = %snapshot.best_ask(),
                future_bid = %future.bid,
                future_ask = %future.ask,
                "ETF touch inside future band, no action"
            );
        }
    }

    /// Hedge an ETF fill on the future at a price that always crosses.
    fn hedge_fill(&mut self, side: Side, volume: Volume) -> ClientOrderId {
        let hedge_side = side.opposite();
        let price = match hedge_side {
            Side::Sell => self.hedge_sell_price,
            Side::Buy => self.hedge_buy_price,
        };
        self.ledger.hedge(hedge_side, price, volume)
    }
}

impl<S: OrderSender, C: Clock> TraderHandler for AutoTrader<S, C> {
    fn on_order_book_update(&mut self, snapshot: &BookSnapshot) {
        if !self.gate.admit(snapshot).is_accepted() {
            return;
        }

        let rate_usage = self.ledger.rate_usage();
        info!(
            instrument = %snapshot.instrument,
            sequence = snapshot.sequence_number,
            position = self.tracker.position(),
            delta = self.tracker.delta(),
            rate_usage,
            "Book update"
        );

        match snapshot.instrument {
            Instrument::Future => self.on_future_book(snapshot),
            Instrument::Etf => self.on_etf_book(snapshot),
        }
    }

    fn on_trade_ticks(&mut self, ticks: &BookSnapshot) {
        debug!(
            instrument = %ticks.instrument,
            sequence = ticks.sequence_number,
            "Trade ticks"
        );
    }

    fn on_order_filled(&mut self, id: ClientOrderId, price: Price, volume: Volume) {
        let Some(side) = self.ledger.side_of(id) else {
            debug!(order_id = %id, "Fill for unknown order ignored");
            return;
        };

        info!(
            order_id = %id,
            side = %side,
            price = %price,
            volume = %volume,
            "Order filled"
        );
        Metrics::fill(&side.to_string(), volume.inner());
        self.tracker.on_fill(side, volume);

        self.hedge_fill(side, volume);
    }

    fn on_order_status(&mut self, id: ClientOrderId, filled: Volume, remaining: Volume, fees: i64) {
        match self.ledger.record_status(id, filled, remaining) {
            Some(state) => debug!(
                order_id = %id,
                filled = %filled,
                remaining = %remaining,
                fees,
                state = %state,
                "Order status"
            ),
            None => trace!(order_id = %id, "Status for unknown order"),
        }
    }

    fn on_hedge_filled(&mut self, id: ClientOrderId, price: Price, volume: Volume) {
        let Some(side) = self.ledger.retire_hedge(id) else {
            warn!(order_id = %id, "Fill for unknown hedge ignored");
            return;
        };

        info!(
            order_id = %id,
            side = %side,
            price = %price,
            volume = %volume,
            "Hedge filled"
        );
        self.tracker.on_hedge_fill(side, volume);
        if self.tracker.is_hedged() {
            debug!(position = self.tracker.position(), "Delta flat");
        }
    }

    fn on_error(&mut self, id: ClientOrderId, message: &str) {
        warn!(order_id = %id, error = message, "Exchange error");
        if id.is_session() {
            return;
        }
        self.ledger.reject(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pairmm_core::{Command, Lifespan};
    use pairmm_executor::{ManualClock, RecordingSender};

    fn trader() -> AutoTrader<RecordingSender, ManualClock> {
        AutoTrader::new(&AppConfig::default(), RecordingSender::new(), ManualClock::new())
    }

    fn book(instrument: Instrument, seq: u64, bid: i64, ask: i64, volume: u32) -> BookSnapshot {
        BookSnapshot::from_levels(instrument, seq, &[ask], &[volume], &[bid], &[volume]).unwrap()
    }

    #[test]
    fn test_etf_ignored_until_future_known() {
        let mut trader = trader();
        trader.on_order_book_update(&book(Instrument::Etf, 1, 9_800, 9_900, 15));
        assert!(trader.sender().commands().is_empty());
    }

    #[test]
    fn test_error_retires_known_order() {
        let mut trader = trader();
        let id = trader
            .ledger_mut()
            .place(Side::Buy, Price::new(9_900), Volume::new(20), Lifespan::GoodForDay)
            .unwrap();

        trader.on_error(id, "Order rejected");
        assert!(trader.ledger().get(id).is_none());

        // A later fill for the errored order no longer hedges.
        trader.on_order_filled(id, Price::new(9_900), Volume::new(20));
        assert_eq!(trader.position(), 0);
        assert_eq!(trader.sender().count("hedge"), 0);
    }

    #[test]
    fn test_session_error_changes_nothing() {
        let mut trader = trader();
        trader
            .ledger_mut()
            .place(Side::Sell, Price::new(10_300), Volume::new(20), Lifespan::GoodForDay);
        trader.on_error(ClientOrderId::SESSION, "Session warning");
        assert_eq!(trader.ledger().count(Side::Sell), 1);
    }

    #[test]
    fn test_sell_fill_hedges_with_buy_at_max_ask_tick() {
        let mut trader = trader();
        let id = trader
            .ledger_mut()
            .place(Side::Sell, Price::new(10_300), Volume::new(20), Lifespan::GoodForDay)
            .unwrap();
        trader.sender_mut().drain();

        trader.on_order_filled(id, Price::new(10_300), Volume::new(5));

        assert_eq!(trader.position(), -5);
        assert_eq!(
            trader.sender().commands(),
            &[Command::HedgeOrder {
                id: ClientOrderId::new(2),
                side: Side::Buy,
                price: Price::new(2_147_483_600),
                volume: Volume::new(5),
            }]
        );
    }

    #[test]
    fn test_session_stats_reflect_activity() {
        let mut trader = trader();
        trader.on_order_book_update(&book(Instrument::Future, 1, 10_000, 10_100, 10));
        trader.on_order_book_update(&book(Instrument::Future, 0, 10_000, 10_100, 10));

        let stats = trader.session_stats();
        assert_eq!(stats.snapshots_accepted, 1);
        assert_eq!(stats.snapshots_discarded, 1);
        assert_eq!(stats.position, 0);
        assert!(stats.ended_at >= stats.started_at);
    }
}
