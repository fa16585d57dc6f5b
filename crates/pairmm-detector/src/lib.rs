//! ETF/future cross detection.
//!
//! Detects when the ETF's best price crosses the future's opposite touch,
//! i.e. the ETF can be bought below where the future bids or sold above
//! where the future offers, and sizes a fill-and-kill order to take it.

pub mod config;
pub mod detector;
pub mod signal;

pub use config::DetectorConfig;
pub use detector::ArbitrageDetector;
pub use signal::{ArbitrageSignal, Mispricing};
