//! Book snapshot admission.
//!
//! Filters the host's book updates before they reach strategy logic:
//! reordered or duplicate deliveries and snapshots without a two-sided
//! touch are dropped here.

pub mod gate;

pub use gate::{GateStats, GateVerdict, SnapshotGate};
