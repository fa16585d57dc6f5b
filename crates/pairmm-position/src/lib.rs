//! Position and delta tracking.
//!
//! - [`PositionTracker`]: net ETF position (the inventory the strategy
//!   sizes against), delta across both legs, and the last future touch

pub mod tracker;

pub use tracker::PositionTracker;
