//! Snapshot gate.
//!
//! Each instrument keeps the highest sequence number seen so far. The
//! running maximum is raised before the comparison, so a snapshot passes
//! only if it carries that maximum; anything older is stale. A snapshot
//! with a zero best bid or best ask is dropped after the sequence check
//! (it still advances the maximum).

use pairmm_core::{BookSnapshot, BookState, Instrument};
use pairmm_telemetry::Metrics;
use tracing::debug;

/// Outcome of offering a snapshot to the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateVerdict {
    /// Fresh and two-sided; hand it to the strategy.
    Accepted,
    /// Older than a snapshot already seen for the instrument.
    StaleSequence,
    /// Best bid or best ask price is zero.
    EmptyTop(BookState),
}

impl GateVerdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    /// Metric label for discarded snapshots.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::StaleSequence => "stale_sequence",
            Self::EmptyTop(_) => "empty_top",
        }
    }
}

/// Gate counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GateStats {
    pub accepted: u64,
    pub stale: u64,
    pub empty: u64,
}

impl GateStats {
    pub fn discarded(&self) -> u64 {
        self.stale + self.empty
    }
}

/// Per-instrument sequence gate.
#[derive(Debug, Default)]
pub struct SnapshotGate {
    max_sequence: [u64; Instrument::ALL.len()],
    stats: GateStats,
}

impl SnapshotGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a snapshot.
    pub fn admit(&mut self, snapshot: &BookSnapshot) -> GateVerdict {
        let instrument = snapshot.instrument;
        let slot = &mut self.max_sequence[instrument.index()];
        *slot = (*slot).max(snapshot.sequence_number);
        let max_sequence = *slot;

        let verdict = if snapshot.sequence_number != max_sequence {
            GateVerdict::StaleSequence
        } else {
            match snapshot.state() {
                state if state.is_tradeable() => GateVerdict::Accepted,
                state => GateVerdict::EmptyTop(state),
            }
        };

        match verdict {
            GateVerdict::Accepted => self.stats.accepted += 1,
            GateVerdict::StaleSequence => {
                self.stats.stale += 1;
                debug!(
                    instrument = %instrument,
                    sequence = snapshot.sequence_number,
                    max_sequence,
                    "Stale snapshot discarded"
                );
                Metrics::snapshot_discarded(&instrument.to_string(), verdict.reason());
            }
            GateVerdict::EmptyTop(state) => {
                self.stats.empty += 1;
                debug!(
                    instrument = %instrument,
                    sequence = snapshot.sequence_number,
                    state = %state,
                    "Snapshot without two-sided touch discarded"
                );
                Metrics::snapshot_discarded(&instrument.to_string(), verdict.reason());
            }
        }
        verdict
    }

    /// Highest sequence number seen for an instrument.
    pub fn max_sequence(&self, instrument: Instrument) -> u64 {
        self.max_sequence[instrument.index()]
    }

    pub fn stats(&self) -> GateStats {
        self.stats
    }
}
