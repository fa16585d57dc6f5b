//! End-of-session summary.
//!
//! Collected by the trader when the host stops delivering events and
//! written to the log (and optionally as JSON) for post-session review.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::error::TelemetryResult;

/// Summary of one trading session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionStats {
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    /// Net ETF position at session end.
    pub position: i64,
    /// Net delta across both legs at session end.
    pub delta: i64,
    /// Every ETF fill has been offset by hedge fills.
    pub hedged: bool,
    pub etf_fills: u64,
    pub hedge_fills: u64,
    pub live_bids: usize,
    pub live_asks: usize,
    pub outstanding_hedges: usize,
    /// Client order ids allocated, orders and hedges alike.
    pub ids_issued: u64,
    pub inserts_sent: u64,
    pub cancels_sent: u64,
    pub hedges_sent: u64,
    pub sends_throttled: u64,
    pub snapshots_accepted: u64,
    pub snapshots_discarded: u64,
}

impl SessionStats {
    /// Session length in milliseconds.
    pub fn duration_ms(&self) -> i64 {
        (self.ended_at - self.started_at).num_milliseconds()
    }

    /// Write the summary to the log.
    pub fn report(&self) {
        info!(
            started_at = %self.started_at,
            duration_ms = self.duration_ms(),
            position = self.position,
            delta = self.delta,
            hedged = self.hedged,
            etf_fills = self.etf_fills,
            hedge_fills = self.hedge_fills,
            live_bids = self.live_bids,
            live_asks = self.live_asks,
            outstanding_hedges = self.outstanding_hedges,
            ids_issued = self.ids_issued,
            inserts = self.inserts_sent,
            cancels = self.cancels_sent,
            hedges = self.hedges_sent,
            throttled = self.sends_throttled,
            snapshots_accepted = self.snapshots_accepted,
            snapshots_discarded = self.snapshots_discarded,
            "Session summary"
        );
    }

    /// Serialize the summary as a single JSON object.
    pub fn to_json(&self) -> TelemetryResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}
