//! ETF/future market making and arbitrage agent.
//!
//! Wires the strategy crates to a host transport:
//! - `AutoTrader`: the event coordinator (gate, detector, quoter, ledger,
//!   position tracker)
//! - `TraderHandler`: the inbound callback surface
//! - `HostEvent` / `JsonLinesSender`: JSON-lines replay transport
//! - `AppConfig`: TOML configuration

pub mod config;
pub mod error;
pub mod events;
pub mod handler;
pub mod host;
pub mod trader;

pub use config::{AppConfig, DEFAULT_CONFIG_PATH};
pub use error::{AppError, AppResult};
pub use events::{BookLevels, HostEvent};
pub use handler::TraderHandler;
pub use host::{run_replay, JsonLinesSender};
pub use trader::AutoTrader;
