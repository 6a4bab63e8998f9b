//! Ride id allocation.

use crate::ride::RideId;
use serde::{Deserialize, Serialize};

/// Hands out ride ids 1, 2, 3, ... in order.
///
/// The sequence only moves forward, so ids stay unique even if rides are
/// ever removed from a store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RideIdSequence {
    next: u64,
}

impl Default for RideIdSequence {
    fn default() -> Self {
        Self::new()
    }
}

impl RideIdSequence {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// The id the next call to [`allocate`](Self::allocate) returns.
    pub fn peek(&self) -> RideId {
        RideId::new(self.next)
    }

    /// Whether the sequence can still hand out a valid id.
    ///
    /// Ids start at 1, and the last `u64` is never handed out so the
    /// counter cannot wrap.
    pub fn is_usable(&self) -> bool {
        self.next != 0 && self.next != u64::MAX
    }

    pub fn allocate(&mut self) -> RideId {
        let id = RideId::new(self.next);
        self.next += 1;
        id
    }
}
