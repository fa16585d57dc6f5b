//! Prometheus metrics for the pair market maker.
//!
//! Covers:
//! - Outbound command volume and throttling
//! - Snapshot rejection
//! - Inventory (position and delta)
//! - Hedge admission stalls
//!
//! # Panics
//!
//! Metric registration uses `unwrap()`. A registration failure means a
//! duplicate metric name, which is a programming error caught on first use.

use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec, register_histogram, register_int_gauge, CounterVec, Encoder, Histogram,
    IntGauge, TextEncoder,
};

use crate::error::{TelemetryError, TelemetryResult};

/// Commands handed to the host.
/// Labels: kind (insert/cancel/hedge)
pub static COMMANDS_SENT_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "pairmm_commands_sent_total",
        "Total commands handed to the exchange transport",
        &["kind"]
    )
    .unwrap()
});

/// Sends skipped because the rate window was full.
/// Labels: kind (insert/cancel)
pub static THROTTLED_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "pairmm_throttled_total",
        "Total sends skipped by the message rate limit",
        &["kind"]
    )
    .unwrap()
});

/// Snapshots dropped before reaching strategy logic.
/// Labels: instrument, reason (stale_sequence/empty_top)
pub static SNAPSHOTS_DISCARDED_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "pairmm_snapshots_discarded_total",
        "Total order book snapshots discarded",
        &["instrument", "reason"]
    )
    .unwrap()
});

/// Own fills by side.
pub static FILLS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "pairmm_fills_total",
        "Total lots filled on own ETF orders",
        &["side"]
    )
    .unwrap()
});

/// Net ETF position in lots.
pub static POSITION: Lazy<IntGauge> =
    Lazy::new(|| register_int_gauge!("pairmm_position", "Net ETF position in lots").unwrap());

/// Net delta (ETF plus hedged future) in lots.
pub static DELTA: Lazy<IntGauge> =
    Lazy::new(|| register_int_gauge!("pairmm_delta", "Net delta across both legs in lots").unwrap());

/// Sends currently inside the rate window.
pub static RATE_WINDOW_USAGE: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!(
        "pairmm_rate_window_usage",
        "Commands sent within the trailing rate window"
    )
    .unwrap()
});

/// Time a hedge waited for rate-limit admission.
pub static HEDGE_STALL_MS: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "pairmm_hedge_stall_ms",
        "Milliseconds a hedge waited for admission",
        vec![0.0, 100.0, 200.0, 500.0, 1000.0, 2000.0, 5000.0]
    )
    .unwrap()
});

/// Typed recording helpers.
pub struct Metrics;

impl Metrics {
    /// Record a command handed to the host.
    pub fn command_sent(kind: &str) {
        COMMANDS_SENT_TOTAL.with_label_values(&[kind]).inc();
    }

    /// Record a send skipped by the rate limit.
    pub fn throttled(kind: &str) {
        THROTTLED_TOTAL.with_label_values(&[kind]).inc();
    }

    /// Record a discarded snapshot.
    pub fn snapshot_discarded(instrument: &str, reason: &str) {
        SNAPSHOTS_DISCARDED_TOTAL
            .with_label_values(&[instrument, reason])
            .inc();
    }

    /// Record lots filled on an own order.
    pub fn fill(side: &str, volume: u32) {
        FILLS_TOTAL.with_label_values(&[side]).inc_by(f64::from(volume));
    }

    /// Update inventory gauges.
    pub fn inventory(position: i64, delta: i64) {
        POSITION.set(position);
        DELTA.set(delta);
    }

    /// Update rate window usage.
    pub fn rate_window(in_window: usize) {
        RATE_WINDOW_USAGE.set(in_window as i64);
    }

    /// Record how long a hedge waited for admission.
    pub fn hedge_stall(waited_ms: f64) {
        HEDGE_STALL_MS.observe(waited_ms);
    }

    /// Render every registered metric in the Prometheus text format.
    pub fn gather_text() -> TelemetryResult<String> {
        let encoder = TextEncoder::new();
        let mut buf = Vec::new();
        encoder
            .encode(&prometheus::gather(), &mut buf)
            .map_err(|e| TelemetryError::Metrics(e.to_string()))?;
        String::from_utf8(buf).map_err(|e| TelemetryError::Metrics(e.to_string()))
    }
}
