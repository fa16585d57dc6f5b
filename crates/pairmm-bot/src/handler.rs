//! Inbound callback surface.
//!
//! The host transport delivers events one at a time and waits for each
//! handler to return before delivering the next.

use pairmm_core::{BookSnapshot, ClientOrderId, Price, Volume};

/// Event handlers a trading agent exposes to the host.
pub trait TraderHandler {
    /// Five-level book update for either instrument.
    fn on_order_book_update(&mut self, snapshot: &BookSnapshot);

    /// Recent trading activity. Informational.
    fn on_trade_ticks(&mut self, ticks: &BookSnapshot);

    /// One of the agent's ETF orders traded, partially or fully.
    fn on_order_filled(&mut self, id: ClientOrderId, price: Price, volume: Volume);

    /// Status change of an ETF order. `remaining == 0` means the order is
    /// finished (filled or cancelled). `fees` may be negative for maker
    /// rebates.
    fn on_order_status(&mut self, id: ClientOrderId, filled: Volume, remaining: Volume, fees: i64);

    /// A hedge order on the future traded.
    fn on_hedge_filled(&mut self, id: ClientOrderId, price: Price, volume: Volume);

    /// Exchange-reported error. Id zero is a session-level error.
    fn on_error(&mut self, id: ClientOrderId, message: &str);
}
