//! Position tracking.
//!
//! Two counters are kept:
//! - `position`: net ETF inventory, moved only by ETF fills. Order sizing
//!   in the detector and quoter is done against this figure.
//! - `delta`: ETF fills plus hedge fills. Zero once every hedge has
//!   filled; a persistent non-zero value means exposure is open.
//!
//! The tracker also caches the future's last touch, which the ETF side of
//! the strategy prices against.

use pairmm_core::{Price, Side, Touch, Volume};
use pairmm_telemetry::Metrics;
use tracing::{debug, warn};

/// Net position, delta and cached future touch.
#[derive(Debug, Default, Clone)]
pub struct PositionTracker {
    position: i64,
    delta: i64,
    future: Touch,
    etf_fills: u64,
    hedge_fills: u64,
}

impl PositionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an ETF fill: both position and delta move.
    pub fn on_fill(&mut self, side: Side, volume: Volume) {
        let signed = side.sign() * volume.as_i64();
        self.position += signed;
        self.delta += signed;
        self.etf_fills += 1;

        debug!(
            side = %side,
            volume = %volume,
            position = self.position,
            delta = self.delta,
            "ETF fill applied"
        );
        Metrics::inventory(self.position, self.delta);
    }

    /// Apply a hedge fill on the future: only delta moves.
    pub fn on_hedge_fill(&mut self, side: Side, volume: Volume) {
        self.delta += side.sign() * volume.as_i64();
        self.hedge_fills += 1;

        debug!(
            side = %side,
            volume = %volume,
            delta = self.delta,
            "Hedge fill applied"
        );
        Metrics::inventory(self.position, self.delta);
    }

    /// Cache the future's latest touch.
    pub fn update_future(&mut self, touch: Touch) {
        if touch.bid > touch.ask && touch.is_known() {
            warn!(bid = %touch.bid, ask = %touch.ask, "Future touch is crossed");
        }
        self.future = touch;
    }

    pub fn position(&self) -> i64 {
        self.position
    }

    pub fn delta(&self) -> i64 {
        self.delta
    }

    /// Last seen future touch; zeros until the first future snapshot.
    pub fn future(&self) -> Touch {
        self.future
    }

    pub fn future_bid(&self) -> Price {
        self.future.bid
    }

    pub fn future_ask(&self) -> Price {
        self.future.ask
    }

    /// Whether every ETF fill so far has been matched by hedge fills.
    pub fn is_hedged(&self) -> bool {
        self.delta == 0
    }

    /// Number of ETF fills applied.
    pub fn etf_fills(&self) -> u64 {
        self.etf_fills
    }

    /// Number of hedge fills applied.
    pub fn hedge_fills(&self) -> u64 {
        self.hedge_fills
    }
}
