//! Ride state machine.

use super::capacity::SeatUsage;
use super::participant::Participant;
use super::status::{ParticipantStatus, RideStatus};
use super::RideId;
use crate::core::{Lifecycle, State};
use crate::error::RideError;
use crate::validation;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// What a driver supplies when publishing a ride.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RideDetails {
    /// Departure time. Opaque to the engine, shown back as given.
    pub ride_date_and_time: String,
    pub final_address: String,
    pub available_spaces: u32,
}

/// Result of starting a ride.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardingOutcome {
    pub boarded: Vec<String>,
    pub missing: Vec<String>,
}

/// A published ride and the join requests made against it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ride {
    id: RideId,
    ride_date_and_time: String,
    final_address: String,
    driver: String,
    available_spaces: u32,
    status: RideStatus,
    participants: Vec<Participant>,
}

impl Ride {
    /// Create a ride in `ready` status with no participants.
    ///
    /// # Errors
    ///
    /// `InvalidRequest` when the schedule or address is blank or the
    /// ride offers no seats.
    pub fn new(id: RideId, driver: &str, details: RideDetails) -> Result<Self, RideError> {
        validation::validate_ride(
            &details.ride_date_and_time,
            &details.final_address,
            details.available_spaces,
        )?;
        Ok(Self {
            id,
            ride_date_and_time: details.ride_date_and_time,
            final_address: details.final_address,
            driver: driver.to_string(),
            available_spaces: details.available_spaces,
            status: RideStatus::initial(),
            participants: Vec::new(),
        })
    }

    pub fn id(&self) -> RideId {
        self.id
    }

    pub fn ride_date_and_time(&self) -> &str {
        &self.ride_date_and_time
    }

    pub fn final_address(&self) -> &str {
        &self.final_address
    }

    pub fn driver(&self) -> &str {
        &self.driver
    }

    pub fn available_spaces(&self) -> u32 {
        self.available_spaces
    }

    pub fn status(&self) -> RideStatus {
        self.status
    }

    /// Join records in request order.
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn participant(&self, alias: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.alias() == alias)
    }

    pub fn seat_usage(&self) -> SeatUsage {
        SeatUsage::tally(self.available_spaces, &self.participants)
    }

    pub fn waiting_count(&self) -> usize {
        self.count(ParticipantStatus::Waiting)
    }

    fn count(&self, status: ParticipantStatus) -> usize {
        self.participants
            .iter()
            .filter(|p| p.status() == status)
            .count()
    }

    fn participant_mut(&mut self, alias: &str) -> Result<&mut Participant, RideError> {
        let ride = self.id;
        self.participants
            .iter_mut()
            .find(|p| p.alias() == alias)
            .ok_or_else(|| RideError::ParticipantNotFound {
                ride,
                alias: alias.to_string(),
            })
    }

    fn ensure_ready(&self) -> Result<(), RideError> {
        if self.status == RideStatus::Ready {
            Ok(())
        } else {
            Err(RideError::RideNotReady {
                ride: self.id,
                status: self.status.name().to_string(),
            })
        }
    }

    fn ensure_ride_can(&self, next: RideStatus) -> Result<(), RideError> {
        if self.status.can_transition(&next) {
            Ok(())
        } else {
            Err(RideError::RideTransition {
                ride: self.id,
                from: self.status.name().to_string(),
                to: next.name().to_string(),
            })
        }
    }

    fn advance(&mut self, next: RideStatus) -> Result<(), RideError> {
        let ride = self.id;
        self.status
            .advance(next)
            .map(|_| ())
            .map_err(|err| RideError::RideTransition {
                ride,
                from: err.from,
                to: err.to,
            })
    }

    /// Record a request by `alias` for `occupied_spaces` seats.
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` for a blank destination or zero seats
    /// - `RideNotReady` once the ride has departed
    /// - `DuplicateRequest` if `alias` already has a record on this ride
    pub fn request_to_join(
        &mut self,
        alias: &str,
        destination: &str,
        occupied_spaces: u32,
    ) -> Result<&Participant, RideError> {
        validation::validate_join(alias, destination, occupied_spaces)?;
        self.ensure_ready()?;
        if self.participant(alias).is_some() {
            return Err(RideError::DuplicateRequest {
                ride: self.id,
                alias: alias.to_string(),
            });
        }
        self.participants
            .push(Participant::new(alias, destination, occupied_spaces));
        let index = self.participants.len() - 1;
        Ok(&self.participants[index])
    }

    /// Confirm a waiting request if its seats still fit.
    ///
    /// # Errors
    ///
    /// - `RideNotReady` once the ride has departed
    /// - `ParticipantNotFound` if `alias` never asked to join
    /// - `ParticipantTransition` if the request was already decided
    /// - `CapacityExceeded` if confirmed seats plus the request exceed
    ///   the ride's seats
    pub fn accept_participant(&mut self, alias: &str) -> Result<(), RideError> {
        self.ensure_ready()?;
        let ride = self.id;
        let usage = self.seat_usage();
        let participant = self.participant_mut(alias)?;
        participant.ensure_can(ride, ParticipantStatus::Confirmed)?;
        if !usage.admits(participant.occupied_spaces()) {
            return Err(RideError::CapacityExceeded {
                ride,
                alias: alias.to_string(),
                requested: participant.occupied_spaces(),
                confirmed: usage.confirmed,
                available: usage.available,
            });
        }
        participant.confirm(ride)
    }

    /// Turn down a waiting request.
    ///
    /// # Errors
    ///
    /// Same state errors as [`Ride::accept_participant`]; capacity is not
    /// consulted.
    pub fn reject_participant(&mut self, alias: &str) -> Result<(), RideError> {
        self.ensure_ready()?;
        let ride = self.id;
        self.participant_mut(alias)?.reject(ride)
    }

    /// Depart with the participants the driver reports as present.
    ///
    /// Confirmed participants named in `present` board, the rest become
    /// `missing`. Names that match no confirmed participant are ignored.
    ///
    /// # Errors
    ///
    /// - `RideTransition` unless the ride is `ready`
    /// - `PendingRequests` while any request is still `waiting`
    pub fn start_ride<A: AsRef<str>>(
        &mut self,
        present: &[A],
    ) -> Result<BoardingOutcome, RideError> {
        self.ensure_ride_can(RideStatus::InProgress)?;
        let waiting = self.waiting_count();
        if waiting > 0 {
            return Err(RideError::PendingRequests {
                ride: self.id,
                waiting,
            });
        }

        let ride = self.id;
        let present: HashSet<&str> = present.iter().map(AsRef::as_ref).collect();
        let mut outcome = BoardingOutcome::default();
        for participant in self
            .participants
            .iter_mut()
            .filter(|p| p.status() == ParticipantStatus::Confirmed)
        {
            let on_board = present.contains(participant.alias());
            participant.board(ride, on_board)?;
            let alias = participant.alias().to_string();
            if on_board {
                outcome.boarded.push(alias);
            } else {
                outcome.missing.push(alias);
            }
        }
        self.advance(RideStatus::InProgress)?;
        Ok(outcome)
    }

    /// Drop off one boarded participant.
    ///
    /// # Errors
    ///
    /// - `ParticipantNotFound` if `alias` never asked to join
    /// - `ParticipantTransition` unless the participant is `inprogress`
    pub fn unload_participant(&mut self, alias: &str) -> Result<(), RideError> {
        let ride = self.id;
        self.participant_mut(alias)?.unload(ride)
    }

    /// Finish the ride. Anyone still on board becomes `notmarked`.
    ///
    /// Returns the aliases that were left unmarked.
    ///
    /// # Errors
    ///
    /// `RideTransition` unless the ride is `inprogress`.
    pub fn end_ride(&mut self) -> Result<Vec<String>, RideError> {
        self.ensure_ride_can(RideStatus::Done)?;
        let ride = self.id;
        let mut unmarked = Vec::new();
        for participant in self
            .participants
            .iter_mut()
            .filter(|p| p.status() == ParticipantStatus::InProgress)
        {
            participant.leave_unmarked(ride)?;
            unmarked.push(participant.alias().to_string());
        }
        self.advance(RideStatus::Done)?;
        Ok(unmarked)
    }
}
