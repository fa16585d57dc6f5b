//! Cross detector implementation.
//!
//! Strategy: take the ETF whenever its touch crosses the future's
//! opposite touch.
//! - Buy: etf_ask < future_bid
//! - Sell: etf_bid > future_ask
//!
//! The buy check runs first and, once triggered, decides alone: a cheap
//! ETF that cannot be bought (position already at the limit) does not fall
//! through to the sell check.

use pairmm_core::{BookSnapshot, Side, Touch, Volume};
use tracing::debug;

use crate::config::DetectorConfig;
use crate::signal::{ArbitrageSignal, Mispricing};

/// ETF/future cross detector.
pub struct ArbitrageDetector {
    config: DetectorConfig,
}

impl ArbitrageDetector {
    /// Create a new detector with configuration.
    pub fn new(config: DetectorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Whether the ETF touch crosses the future's touch in either direction.
    pub fn is_crossed(etf: &BookSnapshot, future: Touch) -> bool {
        etf.best_ask() < future.bid || etf.best_bid() > future.ask
    }

    /// Which way the ETF is mispriced, if at all.
    pub fn mispricing(etf: &BookSnapshot, future: Touch) -> Option<Mispricing> {
        if etf.best_ask() < future.bid {
            Some(Mispricing::EtfCheap)
        } else if etf.best_bid() > future.ask {
            Some(Mispricing::EtfRich)
        } else {
            None
        }
    }

    /// Check for an arbitrage opportunity.
    ///
    /// Returns a signal sized so that a full fill leaves the position within
    /// `±arbitrage_limit`, and never more than the volume shown at the touch.
    pub fn check(&self, etf: &BookSnapshot, position: i64, future: Touch) -> Option<ArbitrageSignal> {
        let mispricing = Self::mispricing(etf, future)?;
        let limit = self.config.arbitrage_limit;

        let (side, price, shown, room) = match mispricing {
            Mispricing::EtfCheap => (
                Side::Buy,
                etf.best_ask(),
                etf.best_ask_volume(),
                limit - position,
            ),
            Mispricing::EtfRich => (
                Side::Sell,
                etf.best_bid(),
                etf.best_bid_volume(),
                position + limit,
            ),
        };

        let volume = shown.as_i64().min(room);
        if volume <= 0 {
            debug!(
                mispricing = %mispricing,
                position,
                shown = %shown,
                "Cross found but no arbitrage room"
            );
            return None;
        }

        Some(ArbitrageSignal {
            mispricing,
            side,
            price,
            volume: Volume::from_signed(volume),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pairmm_core::{Instrument, Lifespan, Price};

    fn etf(ask: i64, ask_vol: u32, bid: i64, bid_vol: u32) -> BookSnapshot {
        BookSnapshot::from_levels(
            Instrument::Etf,
            1,
            &[ask, ask + 100, ask + 200, ask + 300, ask + 400],
            &[ask_vol, 10, 10, 10, 10],
            &[bid, bid - 100, bid - 200, bid - 300, bid - 400],
            &[bid_vol, 10, 10, 10, 10],
        )
        .unwrap()
    }

    fn future() -> Touch {
        Touch::new(Price::new(10_000), Price::new(10_100))
    }

    fn detector() -> ArbitrageDetector {
        ArbitrageDetector::new(DetectorConfig::default())
    }

    #[test]
    fn test_cheap_etf_buys_shown_volume() {
        let book = etf(9_900, 15, 9_800, 10);
        let signal = detector().check(&book, 0, future()).unwrap();

        assert_eq!(signal.mispricing, Mispricing::EtfCheap);
        assert_eq!(signal.side, Side::Buy);
        assert_eq!(signal.price, Price::new(9_900));
        assert_eq!(signal.volume, Volume::new(15));
        assert_eq!(signal.lifespan(), Lifespan::FillAndKill);
    }

    #[test]
    fn test_buy_capped_by_arbitrage_limit() {
        let book = etf(9_900, 50, 9_800, 10);
        let signal = detector().check(&book, 5, future()).unwrap();
        assert_eq!(signal.volume, Volume::new(15));
    }

    #[test]
    fn test_no_buy_at_arbitrage_limit() {
        let book = etf(9_900, 50, 9_800, 10);
        assert!(detector().check(&book, 20, future()).is_none());
        assert!(detector().check(&book, 60, future()).is_none());
    }

    #[test]
    fn test_rich_etf_sells() {
        let book = etf(10_400, 10, 10_200, 30);
        let signal = detector().check(&book, 0, future()).unwrap();

        assert_eq!(signal.mispricing, Mispricing::EtfRich);
        assert_eq!(signal.side, Side::Sell);
        assert_eq!(signal.price, Price::new(10_200));
        assert_eq!(signal.volume, Volume::new(20));
    }

    #[test]
    fn test_sell_room_grows_when_long() {
        let book = etf(10_400, 10, 10_200, 100);
        let signal = detector().check(&book, 40, future()).unwrap();
        assert_eq!(signal.volume, Volume::new(60));
    }

    #[test]
    fn test_sell_never_pushes_short_past_limit() {
        let book = etf(10_400, 10, 10_200, 100);
        let signal = detector().check(&book, -5, future()).unwrap();
        assert_eq!(signal.volume, Volume::new(15));
        assert!(detector().check(&book, -20, future()).is_none());
    }

    #[test]
    fn test_no_signal_without_cross() {
        let book = etf(10_300, 10, 9_900, 10);
        assert!(!ArbitrageDetector::is_crossed(&book, future()));
        assert!(detector().check(&book, 0, future()).is_none());
    }

    #[test]
    fn test_touching_prices_are_not_crossed() {
        // ask == future bid and bid == future ask are not strict crosses
        let book = etf(10_000, 10, 10_100, 10);
        assert!(!ArbitrageDetector::is_crossed(&book, future()));
    }

    #[test]
    fn test_cheap_without_room_does_not_fall_through_to_sell() {
        // Both crossed: ask < future bid and bid > future ask.
        let book = etf(9_900, 10, 10_200, 10);
        assert!(detector().check(&book, 20, future()).is_none());
    }

    #[test]
    fn test_position_stays_within_limit_after_full_fill() {
        let det = detector();
        for position in -20..=20 {
            if let Some(s) = det.check(&etf(9_900, 100, 9_800, 10), position, future()) {
                assert!(position + s.volume.as_i64() <= 20);
            }
            if let Some(s) = det.check(&etf(10_400, 10, 10_200, 100), position, future()) {
                assert!(position - s.volume.as_i64() >= -20);
            }
        }
    }
}
