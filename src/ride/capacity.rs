//! Seat accounting.
//!
//! Usage is always recomputed from the participant list; nothing is cached
//! on the ride, so it cannot drift from the records it summarizes.

use super::participant::Participant;
use super::status::ParticipantStatus;

/// Seats promised on a ride at a point in time.
///
/// Only `confirmed` requests count. Boarded, missing and finished
/// participants are past the point where capacity matters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeatUsage {
    pub available: u32,
    pub confirmed: u64,
}

impl SeatUsage {
    pub fn tally(available: u32, participants: &[Participant]) -> Self {
        let confirmed = participants
            .iter()
            .filter(|p| p.status() == ParticipantStatus::Confirmed)
            .map(|p| u64::from(p.occupied_spaces()))
            .sum();
        Self {
            available,
            confirmed,
        }
    }

    pub fn remaining(&self) -> u64 {
        u64::from(self.available).saturating_sub(self.confirmed)
    }

    /// Whether `requested` more seats fit next to the confirmed ones.
    pub fn admits(&self, requested: u32) -> bool {
        self.confirmed + u64::from(requested) <= u64::from(self.available)
    }
}
