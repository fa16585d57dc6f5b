//! Coordinator lifecycle integration tests.
//!
//! Drives `AutoTrader` through full host event sequences:
//! - Arbitrage on crossed books
//! - Market making ladders and clearing
//! - Fill → hedge, including under rate exhaustion
//! - Sequence gating and error handling

use std::time::Duration;

use pairmm_bot::{AppConfig, AutoTrader, TraderHandler};
use pairmm_core::{
    BookSnapshot, ClientOrderId, Command, Instrument, Lifespan, Price, Side, Volume,
};
use pairmm_executor::{Clock, ManualClock, RecordingSender};

type Trader = AutoTrader<RecordingSender, ManualClock>;

fn trader() -> (Trader, ManualClock) {
    let clock = ManualClock::new();
    let trader = AutoTrader::new(&AppConfig::default(), RecordingSender::new(), clock.clone());
    (trader, clock)
}

/// Five-level book one tick apart per level, `volume` lots everywhere.
fn book(instrument: Instrument, seq: u64, bid: i64, ask: i64, volume: u32) -> BookSnapshot {
    let asks: Vec<i64> = (0..5).map(|i| ask + i * 100).collect();
    let bids: Vec<i64> = (0..5).map(|i| bid - i * 100).collect();
    BookSnapshot::from_levels(instrument, seq, &asks, &[volume; 5], &bids, &[volume; 5]).unwrap()
}

/// Future at 10000 / 10100.
fn with_future(trader: &mut Trader) {
    trader.on_order_book_update(&book(Instrument::Future, 1, 10_000, 10_100, 50));
    trader.sender_mut().drain();
}

fn inserts(trader: &Trader) -> Vec<(Side, Price, Volume, Lifespan)> {
    trader
        .sender()
        .commands()
        .iter()
        .filter_map(|c| match c {
            Command::InsertOrder {
                side,
                price,
                volume,
                lifespan,
                ..
            } => Some((*side, *price, *volume, *lifespan)),
            _ => None,
        })
        .collect()
}

#[test]
fn test_cheap_etf_sends_single_fak_buy() {
    let (mut trader, _clock) = trader();
    with_future(&mut trader);

    trader.on_order_book_update(&book(Instrument::Etf, 1, 9_800, 9_900, 15));

    assert_eq!(
        trader.sender().commands(),
        &[Command::InsertOrder {
            id: ClientOrderId::new(1),
            side: Side::Buy,
            price: Price::new(9_900),
            volume: Volume::new(15),
            lifespan: Lifespan::FillAndKill,
        }]
    );
}

#[test]
fn test_rich_etf_sends_fak_sell() {
    let (mut trader, _clock) = trader();
    with_future(&mut trader);

    trader.on_order_book_update(&book(Instrument::Etf, 1, 10_200, 10_300, 50));

    assert_eq!(
        inserts(&trader),
        vec![(Side::Sell, Price::new(10_200), Volume::new(20), Lifespan::FillAndKill)]
    );
}

#[test]
fn test_narrow_etf_book_places_no_quotes() {
    let (mut trader, _clock) = trader();
    with_future(&mut trader);

    // ask 10300 / bid 9900: min_ask 10300 and max_bid 9800 leave no rungs.
    trader.on_order_book_update(&book(Instrument::Etf, 1, 9_900, 10_300, 10));

    assert!(trader.sender().commands().is_empty());
}

#[test]
fn test_wide_etf_book_gets_skewed_ladder() {
    let (mut trader, _clock) = trader();
    with_future(&mut trader);

    trader.on_order_book_update(&book(Instrument::Etf, 1, 9_400, 10_700, 100));

    let sent = inserts(&trader);
    let asks: Vec<Price> = sent.iter().filter(|o| o.0 == Side::Sell).map(|o| o.1).collect();
    let bids: Vec<Price> = sent.iter().filter(|o| o.0 == Side::Buy).map(|o| o.1).collect();

    assert_eq!(
        asks,
        vec![Price::new(10_300), Price::new(10_400), Price::new(10_500), Price::new(10_600)]
    );
    assert_eq!(bids, vec![Price::new(9_400), Price::new(9_500), Price::new(9_600), Price::new(9_700)]);
    for (_, price, volume, lifespan) in &sent {
        assert_eq!(*volume, Volume::new(20));
        assert_eq!(*lifespan, Lifespan::GoodForDay);
        assert!(*price < Price::new(10_700) && *price >= Price::new(9_400));
    }
}

#[test]
fn test_band_between_predicates_does_nothing() {
    let (mut trader, _clock) = trader();
    with_future(&mut trader);

    // Not crossed (10200 >= 10000, 10050 <= 10100) and the bid is not
    // below the future bid, so neither branch runs.
    trader.on_order_book_update(&book(Instrument::Etf, 1, 10_050, 10_200, 10));

    assert!(trader.sender().commands().is_empty());
}

#[test]
fn test_buy_fill_hedges_even_when_rate_exhausted() {
    let (mut trader, clock) = trader();
    with_future(&mut trader);
    trader.on_order_book_update(&book(Instrument::Etf, 1, 9_400, 10_700, 100));
    let bid_id = trader.ledger().orders(Side::Buy).next().unwrap().id;
    trader.sender_mut().drain();

    while trader.ledger_mut().throttle_mut().try_admit() {}
    let before = clock.now();

    trader.on_order_filled(bid_id, Price::new(9_400), Volume::new(20));

    assert_eq!(trader.position(), 20);
    assert_eq!(trader.delta(), 20);
    assert_eq!(
        trader.sender().commands(),
        &[Command::HedgeOrder {
            id: ClientOrderId::new(9),
            side: Side::Sell,
            price: Price::new(100),
            volume: Volume::new(20),
        }]
    );
    // The hedge waited for the window to roll rather than being dropped.
    assert!(clock.now() - before >= Duration::from_millis(1_010));
}

#[test]
fn test_hedge_fill_closes_delta() {
    let (mut trader, _clock) = trader();
    with_future(&mut trader);
    trader.on_order_book_update(&book(Instrument::Etf, 1, 9_800, 9_900, 15));

    trader.on_order_filled(ClientOrderId::new(1), Price::new(9_900), Volume::new(15));
    assert_eq!(trader.delta(), 15);

    trader.on_hedge_filled(ClientOrderId::new(2), Price::new(10_000), Volume::new(15));
    assert_eq!(trader.delta(), 0);
    assert_eq!(trader.position(), 15);
    assert_eq!(trader.ledger().hedge_count(), 0);

    // Repeated or unknown hedge fills are ignored.
    trader.on_hedge_filled(ClientOrderId::new(2), Price::new(10_000), Volume::new(15));
    trader.on_hedge_filled(ClientOrderId::new(77), Price::new(10_000), Volume::new(5));
    assert_eq!(trader.delta(), 0);
}

#[test]
fn test_stale_snapshot_is_noop() {
    let (mut trader, _clock) = trader();
    with_future(&mut trader);
    trader.on_order_book_update(&book(Instrument::Etf, 5, 10_050, 10_200, 10));
    assert!(trader.sender().commands().is_empty());

    // Crossed, but older than sequence 5.
    trader.on_order_book_update(&book(Instrument::Etf, 4, 9_800, 9_900, 15));
    assert!(trader.sender().commands().is_empty());
    assert_eq!(trader.position(), 0);
    assert_eq!(trader.gate().stats().stale, 1);

    // A stale future update leaves the cached touch alone.
    trader.on_order_book_update(&book(Instrument::Future, 0, 11_000, 11_100, 10));
    assert_eq!(trader.tracker().future_bid(), Price::new(10_000));
}

#[test]
fn test_zero_touch_snapshot_discarded() {
    let (mut trader, _clock) = trader();
    with_future(&mut trader);

    let one_sided =
        BookSnapshot::from_levels(Instrument::Etf, 2, &[9_900], &[15], &[], &[]).unwrap();
    trader.on_order_book_update(&one_sided);
    assert!(trader.sender().commands().is_empty());
}

#[test]
fn test_future_move_trims_exposed_quotes() {
    let (mut trader, _clock) = trader();
    with_future(&mut trader);
    trader.on_order_book_update(&book(Instrument::Etf, 1, 9_400, 10_700, 100));
    trader.sender_mut().drain();

    // Future drops: bids above the new ask 9500 and no asks below 9400.
    trader.on_order_book_update(&book(Instrument::Future, 2, 9_400, 9_500, 50));

    let cancelled: Vec<Price> = trader
        .sender()
        .commands()
        .iter()
        .filter_map(|c| match c {
            Command::CancelOrder { id } => trader.ledger().price_of(*id),
            _ => None,
        })
        .collect();
    assert_eq!(cancelled, vec![Price::new(9_600), Price::new(9_700)]);
    assert_eq!(trader.tracker().future_ask(), Price::new(9_500));
}

#[test]
fn test_status_retires_finished_orders() {
    let (mut trader, _clock) = trader();
    with_future(&mut trader);
    trader.on_order_book_update(&book(Instrument::Etf, 1, 9_400, 10_700, 100));
    let live = trader.ledger().count(Side::Buy) + trader.ledger().count(Side::Sell);
    assert_eq!(live, 8);

    // Partial fill keeps the order live, a cancel confirmation retires it.
    trader.on_order_status(ClientOrderId::new(1), Volume::new(5), Volume::new(15), -1);
    assert!(trader.ledger().get(ClientOrderId::new(1)).is_some());
    trader.on_order_status(ClientOrderId::new(1), Volume::new(5), Volume::new(0), -1);
    assert!(trader.ledger().get(ClientOrderId::new(1)).is_none());

    // Fills after retirement are ignored entirely.
    trader.on_order_filled(ClientOrderId::new(1), Price::new(10_300), Volume::new(5));
    assert_eq!(trader.position(), 0);
    assert_eq!(trader.sender().count("hedge"), 0);
}

#[test]
fn test_arbitrage_never_exceeds_limit_across_fills() {
    let (mut trader, _clock) = trader();
    with_future(&mut trader);

    for seq in 1..=10 {
        trader.on_order_book_update(&book(Instrument::Etf, seq, 9_800, 9_900, 15));
        let fills: Vec<(ClientOrderId, Volume)> = trader
            .sender_mut()
            .drain()
            .into_iter()
            .filter_map(|c| match c {
                Command::InsertOrder { id, volume, .. } => Some((id, volume)),
                _ => None,
            })
            .collect();
        for (id, volume) in fills {
            trader.on_order_filled(id, Price::new(9_900), volume);
            trader.on_order_status(id, volume, Volume::ZERO, 0);
            assert!(trader.position() <= 20);
        }
    }
    assert_eq!(trader.position(), 20);
}

#[test]
fn test_filled_ladder_stops_bidding_at_position_limit() {
    let (mut trader, _clock) = trader();
    with_future(&mut trader);
    trader.on_order_book_update(&book(Instrument::Etf, 1, 9_200, 10_900, 100));

    // Fill and retire every bid: five lots takes the position to the limit.
    let bids: Vec<ClientOrderId> = trader.ledger().orders(Side::Buy).map(|o| o.id).collect();
    assert_eq!(bids.len(), 5);
    for id in bids {
        trader.on_order_filled(id, Price::new(9_500), Volume::new(20));
        trader.on_order_status(id, Volume::new(20), Volume::ZERO, 0);
    }
    assert_eq!(trader.position(), 100);
    trader.sender_mut().drain();

    trader.on_order_book_update(&book(Instrument::Etf, 2, 9_200, 10_900, 100));
    assert!(inserts(&trader).iter().all(|o| o.0 == Side::Sell));
    assert!(trader.position().abs() <= 100);
}

#[test]
fn test_ids_increase_across_inserts_and_hedges() {
    let (mut trader, _clock) = trader();
    with_future(&mut trader);
    trader.on_order_book_update(&book(Instrument::Etf, 1, 9_800, 9_900, 15));
    trader.on_order_filled(ClientOrderId::new(1), Price::new(9_900), Volume::new(15));
    trader.on_order_book_update(&book(Instrument::Etf, 2, 9_800, 9_900, 15));

    let ids: Vec<u64> = trader
        .sender()
        .commands()
        .iter()
        .map(|c| c.id().value())
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);
}
