//! Outbound command seam.
//!
//! The agent never talks to the exchange itself: the host transport
//! implements [`OrderSender`] and the ledger calls it once a command has
//! been admitted by the throttle. This allows for:
//! - Dependency injection for testing
//! - Replaying sessions without a live connection

use pairmm_core::{ClientOrderId, Command, Lifespan, Price, Side, Volume};

/// Transport for the three commands the agent issues.
///
/// Calls are fire-and-forget: outcomes come back later through the host's
/// status, fill and error callbacks.
#[cfg_attr(test, mockall::automock)]
pub trait OrderSender {
    /// Insert an ETF order.
    fn insert_order(
        &mut self,
        id: ClientOrderId,
        side: Side,
        price: Price,
        volume: Volume,
        lifespan: Lifespan,
    );

    /// Cancel a resting ETF order.
    fn cancel_order(&mut self, id: ClientOrderId);

    /// Hedge on the future.
    fn hedge_order(&mut self, id: ClientOrderId, side: Side, price: Price, volume: Volume);
}

/// Sender that keeps every command in memory.
///
/// Used for replays that collect output in batches and for tests that
/// assert on the exact command stream.
#[derive(Debug, Default, Clone)]
pub struct RecordingSender {
    commands: Vec<Command>,
}

impl RecordingSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every command sent so far, in order.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Take the recorded commands, leaving the recorder empty.
    pub fn drain(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    /// Number of recorded commands of a kind (`insert`, `cancel`, `hedge`).
    pub fn count(&self, kind: &str) -> usize {
        self.commands.iter().filter(|c| c.kind() == kind).count()
    }
}

impl OrderSender for RecordingSender {
    fn insert_order(
        &mut self,
        id: ClientOrderId,
        side: Side,
        price: Price,
        volume: Volume,
        lifespan: Lifespan,
    ) {
        self.commands.push(Command::InsertOrder {
            id,
            side,
            price,
            volume,
            lifespan,
        });
    }

    fn cancel_order(&mut self, id: ClientOrderId) {
        self.commands.push(Command::CancelOrder { id });
    }

    fn hedge_order(&mut self, id: ClientOrderId, side: Side, price: Price, volume: Volume) {
        self.commands.push(Command::HedgeOrder {
            id,
            side,
            price,
            volume,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_sender_keeps_order() {
        let mut sender = RecordingSender::new();
        sender.insert_order(
            ClientOrderId::new(1),
            Side::Buy,
            Price::new(9_900),
            Volume::new(20),
            Lifespan::GoodForDay,
        );
        sender.cancel_order(ClientOrderId::new(1));

        assert_eq!(sender.commands().len(), 2);
        assert_eq!(sender.count("insert"), 1);
        assert_eq!(sender.count("cancel"), 1);
        assert_eq!(sender.drain().len(), 2);
        assert!(sender.commands().is_empty());
    }
}
