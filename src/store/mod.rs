//! Keyed storage for users and rides.
//!
//! The engine only needs lookups by key, inserts and an id sequence, so
//! the store is a trait and any map-like backend can sit behind it.
//! [`InMemoryStore`] is the process-local implementation.

mod memory;
mod sequence;

pub use memory::InMemoryStore;
pub use sequence::RideIdSequence;

use crate::error::RideError;
use crate::ride::{Ride, RideId};
use crate::user::User;

/// Storage for users (keyed by alias) and rides (keyed by id).
///
/// Implementations are not expected to synchronize; callers that share a
/// store between threads serialize access themselves.
pub trait EntityStore: Send {
    fn user(&self, alias: &str) -> Option<&User>;

    fn user_mut(&mut self, alias: &str) -> Option<&mut User>;

    /// All users in registration order.
    fn users(&self) -> Vec<&User>;

    /// Insert or replace the user stored under `user.alias()`.
    fn put_user(&mut self, user: User);

    fn ride(&self, id: RideId) -> Option<&Ride>;

    fn ride_mut(&mut self, id: RideId) -> Option<&mut Ride>;

    /// Insert or replace the ride stored under `ride.id()`.
    fn put_ride(&mut self, ride: Ride);

    /// Allocate the id for a ride about to be created.
    fn next_ride_id(&mut self) -> RideId;

    /// Like [`user`](Self::user), with a `UserNotFound` error.
    fn find_user(&self, alias: &str) -> Result<&User, RideError> {
        self.user(alias).ok_or_else(|| RideError::UserNotFound {
            alias: alias.to_string(),
        })
    }

    /// Like [`ride`](Self::ride), with a `RideNotFound` error.
    fn find_ride(&self, id: RideId) -> Result<&Ride, RideError> {
        self.ride(id).ok_or(RideError::RideNotFound { id })
    }

    fn find_ride_mut(&mut self, id: RideId) -> Result<&mut Ride, RideError> {
        self.ride_mut(id).ok_or(RideError::RideNotFound { id })
    }
}
