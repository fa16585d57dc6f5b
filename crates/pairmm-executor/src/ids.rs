//! Client order id allocation.

use pairmm_core::ClientOrderId;

/// Generator for client order ids.
///
/// Monotonically increasing from 1 and never repeats within a session.
/// Orders and hedges share the one counter.
#[derive(Debug)]
pub struct OrderIdGenerator {
    next: u64,
}

impl OrderIdGenerator {
    /// Create a new `OrderIdGenerator` starting at 1.
    #[must_use]
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Allocate the next id.
    pub fn next_id(&mut self) -> ClientOrderId {
        let id = ClientOrderId::new(self.next);
        self.next += 1;
        id
    }

    /// Number of ids handed out so far.
    pub fn issued(&self) -> u64 {
        self.next - 1
    }
}

impl Default for OrderIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
