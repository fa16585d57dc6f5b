//! Prometheus metrics and structured logging for the pair market maker.
//!
//! - Prometheus counters for commands sent, throttled sends and dropped
//!   snapshots, gauges for position and delta
//! - Structured JSON logging with tracing
//! - End-of-session summary

pub mod error;
pub mod logging;
pub mod metrics;
pub mod session_stats;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::init_logging;
pub use metrics::Metrics;
pub use session_stats::SessionStats;
