//! A single user's request to join a ride.

use super::status::ParticipantStatus;
use super::RideId;
use crate::core::{Lifecycle, State};
use crate::error::RideError;
use serde::{Deserialize, Serialize};

/// Join record for one user on one ride.
///
/// `confirmation` is `None` while the driver has not decided, `Some(true)`
/// once accepted and `Some(false)` once rejected. It never changes after
/// the decision.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    alias: String,
    destination: String,
    occupied_spaces: u32,
    status: ParticipantStatus,
    confirmation: Option<bool>,
}

impl Participant {
    pub(crate) fn new(alias: &str, destination: &str, occupied_spaces: u32) -> Self {
        Self {
            alias: alias.to_string(),
            destination: destination.to_string(),
            occupied_spaces,
            status: ParticipantStatus::initial(),
            confirmation: None,
        }
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn occupied_spaces(&self) -> u32 {
        self.occupied_spaces
    }

    pub fn status(&self) -> ParticipantStatus {
        self.status
    }

    pub fn confirmation(&self) -> Option<bool> {
        self.confirmation
    }

    /// Fail unless `next` is a legal step from the current status.
    pub(crate) fn ensure_can(
        &self,
        ride: RideId,
        next: ParticipantStatus,
    ) -> Result<(), RideError> {
        if self.status.can_transition(&next) {
            Ok(())
        } else {
            Err(self.illegal(ride, next))
        }
    }

    pub(crate) fn confirm(&mut self, ride: RideId) -> Result<(), RideError> {
        self.move_to(ride, ParticipantStatus::Confirmed)?;
        self.confirmation = Some(true);
        Ok(())
    }

    pub(crate) fn reject(&mut self, ride: RideId) -> Result<(), RideError> {
        self.move_to(ride, ParticipantStatus::Rejected)?;
        self.confirmation = Some(false);
        Ok(())
    }

    /// Ride start: confirmed participants either board or go missing.
    pub(crate) fn board(&mut self, ride: RideId, present: bool) -> Result<(), RideError> {
        let next = if present {
            ParticipantStatus::InProgress
        } else {
            ParticipantStatus::Missing
        };
        self.move_to(ride, next)
    }

    pub(crate) fn unload(&mut self, ride: RideId) -> Result<(), RideError> {
        self.move_to(ride, ParticipantStatus::Done)
    }

    /// Ride end: still on board and never explicitly dropped off.
    pub(crate) fn leave_unmarked(&mut self, ride: RideId) -> Result<(), RideError> {
        self.move_to(ride, ParticipantStatus::NotMarked)
    }

    fn move_to(&mut self, ride: RideId, next: ParticipantStatus) -> Result<(), RideError> {
        self.status
            .advance(next)
            .map(|_| ())
            .map_err(|err| RideError::ParticipantTransition {
                ride,
                alias: self.alias.clone(),
                from: err.from,
                to: err.to,
            })
    }

    fn illegal(&self, ride: RideId, next: ParticipantStatus) -> RideError {
        RideError::ParticipantTransition {
            ride,
            alias: self.alias.clone(),
            from: self.status.name().to_string(),
            to: next.name().to_string(),
        }
    }

    /// Whether `confirmation` agrees with `status`.
    pub(crate) fn is_consistent(&self) -> bool {
        match self.status {
            ParticipantStatus::Waiting => self.confirmation.is_none(),
            ParticipantStatus::Rejected => self.confirmation == Some(false),
            _ => self.confirmation == Some(true),
        }
    }
}
