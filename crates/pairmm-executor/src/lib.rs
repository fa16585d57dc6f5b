//! Order submission for the pair market maker.
//!
//! Every command the agent sends passes through here:
//! - `MessageThrottle`: sliding-window admission against the exchange
//!   message limit (drop on throttle, or block for hedges)
//! - `OrderLedger`: the agent's own resting orders and outstanding hedges,
//!   plus the session's client order id counter
//! - `OrderSender`: the outbound seam implemented by the host transport
//!
//! # Architecture
//!
//! ```text
//! strategy ──► OrderLedger.place / cancel / hedge
//!                ├─ MessageThrottle.try_admit / admit_blocking
//!                ├─ OrderIdGenerator.next
//!                └─ OrderSender.insert_order / cancel_order / hedge_order
//! ```

pub mod clock;
pub mod ids;
pub mod ledger;
pub mod sender;
pub mod throttle;

pub use clock::{Clock, ManualClock, SystemClock};
pub use ids::OrderIdGenerator;
pub use ledger::{LedgerStats, OrderLedger};
pub use sender::{OrderSender, RecordingSender};
pub use throttle::{MessageThrottle, ThrottleConfig};
