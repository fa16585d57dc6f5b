//! Market making on the ETF, priced off the future.
//!
//! - Ladder calculation: quotes start two ticks outside the future's
//!   touch and run up to the ETF's own touch, sized in lots and capped by
//!   remaining position room
//! - Book clearing: cancels own quotes sitting deeper than three lots of
//!   visible volume
//! - Future trim: cancels own quotes the latest future price would make
//!   arbitrageable
//!
//! # Architecture
//!
//! ```text
//! ETF snapshot    → QuoteManager::make_market()
//!                    ├─ clear_book(): cancel deep quotes
//!                    └─ QuoteEngine::plan(): ask ladder, then bid ladder
//!                         ↓
//!                    OrderLedger::place() (throttled, best effort)
//!
//! Future snapshot → trim_to_future(): cancel exposed quotes
//! ```

pub mod config;
pub mod quote_engine;
pub mod quote_manager;
pub mod trim;

pub use config::QuoterConfig;
pub use quote_engine::{ClearCutoffs, QuoteEngine, QuoteLadder};
pub use quote_manager::{QuoteManager, QuoteReport};
pub use trim::{exposed_to_future, trim_to_future};
