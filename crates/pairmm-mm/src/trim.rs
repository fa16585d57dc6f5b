//! Future-price trim.
//!
//! After the future moves, an own bid above the future ask (or an own ask
//! below the future bid) could be lifted by anyone arbitraging the two
//! books. Those quotes are cancelled as soon as the new future touch is
//! known.

use pairmm_core::{RestingOrder, Side, Touch};
use pairmm_executor::{Clock, OrderLedger, OrderSender};
use tracing::debug;

/// Whether `order` would be arbitrageable against `future`.
pub fn exposed_to_future(order: &RestingOrder, future: Touch) -> bool {
    match order.side {
        Side::Buy => order.price > future.ask,
        Side::Sell => order.price < future.bid,
    }
}

/// Request cancellation of every exposed quote, bids first. Returns the
/// number of cancels actually sent.
pub fn trim_to_future<S: OrderSender, C: Clock>(
    ledger: &mut OrderLedger<S, C>,
    future: Touch,
) -> usize {
    let mut sent = 0;
    for side in [Side::Buy, Side::Sell] {
        for id in ledger.select(side, |o| exposed_to_future(o, future)) {
            if ledger.cancel(id) {
                sent += 1;
            }
        }
    }
    if sent > 0 {
        debug!(
            future_bid = %future.bid,
            future_ask = %future.ask,
            cancels = sent,
            "Trimmed quotes against future"
        );
    }
    sent
}

#[cfg(test)]
mod tests {
    use super::*;
    use pairmm_core::{ClientOrderId, Command, Lifespan, Price, Volume};
    use pairmm_executor::{ManualClock, MessageThrottle, RecordingSender, ThrottleConfig};

    fn ledger() -> OrderLedger<RecordingSender, ManualClock> {
        let throttle = MessageThrottle::new(ThrottleConfig::default(), ManualClock::new());
        OrderLedger::new(RecordingSender::new(), throttle)
    }

    #[test]
    fn test_exposed_quotes_cancelled() {
        let mut ledger = ledger();
        let lot = Volume::new(20);
        ledger.place(Side::Buy, Price::new(9_800), lot, Lifespan::GoodForDay); // 1
        ledger.place(Side::Buy, Price::new(10_200), lot, Lifespan::GoodForDay); // 2
        ledger.place(Side::Sell, Price::new(9_900), lot, Lifespan::GoodForDay); // 3
        ledger.place(Side::Sell, Price::new(10_400), lot, Lifespan::GoodForDay); // 4
        ledger.sender_mut().drain();

        let future = Touch::new(Price::new(10_000), Price::new(10_100));
        assert_eq!(trim_to_future(&mut ledger, future), 2);

        assert_eq!(
            ledger.sender().commands(),
            &[
                Command::CancelOrder {
                    id: ClientOrderId::new(2)
                },
                Command::CancelOrder {
                    id: ClientOrderId::new(3)
                },
            ]
        );
        // Cancels are requests; the orders stay until confirmed.
        assert_eq!(ledger.count(Side::Buy), 2);
    }

    #[test]
    fn test_quotes_at_future_touch_kept() {
        let mut ledger = ledger();
        let lot = Volume::new(20);
        ledger.place(Side::Buy, Price::new(10_100), lot, Lifespan::GoodForDay);
        ledger.place(Side::Sell, Price::new(10_000), lot, Lifespan::GoodForDay);

        let future = Touch::new(Price::new(10_000), Price::new(10_100));
        assert_eq!(trim_to_future(&mut ledger, future), 0);
    }
}
