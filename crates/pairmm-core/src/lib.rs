//! Core domain types for the ETF/future pair market maker.
//!
//! This crate provides fundamental types used throughout the trading system:
//! - `Instrument`: the traded ETF and its underlying future
//! - `Price`, `Volume`: integer cents and lot counts
//! - `BookSnapshot`: five-level order book snapshot from the host
//! - `Side`, `Lifespan`, `ClientOrderId`: order enums and identifiers
//! - `limits`: the fixed contract constants of the strategy

pub mod book;
pub mod error;
pub mod execution;
pub mod instrument;
pub mod limits;
pub mod order;
pub mod price;

pub use book::{BookSnapshot, BookState, Touch, BOOK_DEPTH};
pub use error::{CoreError, Result};
pub use execution::{Command, OrderState, RestingOrder};
pub use instrument::Instrument;
pub use order::{ClientOrderId, Lifespan, Side};
pub use price::{Price, Volume};
