//! Rides, join requests and seat accounting.
//!
//! A [`Ride`] owns its [`Participant`] records in request order and is the
//! only place their statuses change. All operations are synchronous and
//! either apply completely or return a [`RideError`](crate::RideError)
//! leaving the ride untouched.

mod capacity;
mod machine;
mod participant;
mod status;

pub use capacity::SeatUsage;
pub use machine::{BoardingOutcome, Ride, RideDetails};
pub use participant::Participant;
pub use status::{ParticipantStatus, RideStatus};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a ride, assigned sequentially from 1 by the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RideId(u64);

impl RideId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RideId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
