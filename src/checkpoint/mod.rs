//! Checkpoint and restore for the in-memory store.
//!
//! A [`StoreSnapshot`] captures every user, every ride with its participant
//! records, and the ride id sequence. Snapshots serialize to JSON for
//! inspection or to bincode for compact storage. Restoring re-checks every
//! invariant the ride engine maintains, so a hand-edited or corrupted
//! snapshot is refused instead of loaded.

use crate::ride::{ParticipantStatus, Ride, RideId, RideStatus};
use crate::service::RideService;
use crate::store::{EntityStore, InMemoryStore, RideIdSequence};
use crate::user::User;
use crate::validation;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::info;
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable copy of an entire store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: Uuid,

    /// When the snapshot was taken
    pub taken_at: DateTime<Utc>,

    pub ids: RideIdSequence,

    /// Users in registration order
    pub users: Vec<User>,

    /// Rides in id order
    pub rides: Vec<Ride>,
}

impl StoreSnapshot {
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        serde_json::from_str(json)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))
    }

    /// Every invariant violation in the snapshot, empty when it is sound.
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        let users: HashMap<&str, &User> = self.users.iter().map(|u| (u.alias(), u)).collect();
        if users.len() != self.users.len() {
            problems.push("duplicate user aliases".to_string());
        }
        if !self.ids.is_usable() {
            problems.push(format!("next ride id {} cannot be allocated", self.ids.peek()));
        }
        for user in &self.users {
            if let Err(err) = validation::validate_user(user.alias(), user.name()) {
                problems.push(format!("user '{}': {err}", user.alias()));
            }
        }

        let mut ride_ids = HashSet::new();
        for ride in &self.rides {
            if !ride_ids.insert(ride.id()) {
                problems.push(format!("ride {} appears twice", ride.id()));
            }
            if ride.id().get() == 0 {
                problems.push("ride ids start at 1, found ride 0".to_string());
            }
            if ride.id() >= self.ids.peek() {
                problems.push(format!(
                    "ride {} is not below the next id {}",
                    ride.id(),
                    self.ids.peek()
                ));
            }
            check_ride(ride, &users, &mut problems);
        }

        let rides: HashMap<RideId, &Ride> = self.rides.iter().map(|r| (r.id(), r)).collect();
        for user in &self.users {
            for id in user.created_rides() {
                if rides.get(id).map(|r| r.driver()) != Some(user.alias()) {
                    problems.push(format!("{} lists ride {id} it did not create", user.alias()));
                }
            }
            for id in user.participations() {
                if rides.get(id).and_then(|r| r.participant(user.alias())).is_none() {
                    problems.push(format!(
                        "{} lists ride {id} it has no request on",
                        user.alias()
                    ));
                }
            }
        }
        problems
    }
}

fn check_ride(ride: &Ride, users: &HashMap<&str, &User>, problems: &mut Vec<String>) {
    let id = ride.id();
    match users.get(ride.driver()) {
        Some(driver) if driver.created_rides().contains(&id) => {}
        Some(_) => problems.push(format!("ride {id} missing from its driver's rides")),
        None => problems.push(format!("ride {id} has unknown driver {}", ride.driver())),
    }
    if let Err(err) = validation::validate_ride(
        ride.ride_date_and_time(),
        ride.final_address(),
        ride.available_spaces(),
    ) {
        problems.push(format!("ride {id}: {err}"));
    }

    let usage = ride.seat_usage();
    if usage.confirmed > u64::from(usage.available) {
        problems.push(format!(
            "ride {id} has {} seats confirmed out of {}",
            usage.confirmed, usage.available
        ));
    }

    let mut aliases = HashSet::new();
    for participant in ride.participants() {
        let alias = participant.alias();
        if !aliases.insert(alias) {
            problems.push(format!("ride {id} holds two requests from {alias}"));
        }
        if let Err(err) = validation::validate_join(
            alias,
            participant.destination(),
            participant.occupied_spaces(),
        ) {
            problems.push(format!("ride {id}, request from {alias}: {err}"));
        }
        if !participant.is_consistent() {
            problems.push(format!(
                "ride {id}: confirmation of {alias} disagrees with status {}",
                participant.status()
            ));
        }
        if !status_fits(ride.status(), participant.status()) {
            problems.push(format!(
                "ride {id} is {} but {alias} is {}",
                ride.status(),
                participant.status()
            ));
        }
        match users.get(alias) {
            Some(user) if user.participations().contains(&id) => {}
            Some(_) => problems.push(format!("ride {id} missing from {alias}'s participations")),
            None => problems.push(format!("ride {id} has unknown participant {alias}")),
        }
    }
}

/// Participant statuses reachable while the ride is in `ride`.
fn status_fits(ride: RideStatus, participant: ParticipantStatus) -> bool {
    use ParticipantStatus::*;
    match ride {
        RideStatus::Ready => matches!(participant, Waiting | Confirmed | Rejected),
        RideStatus::InProgress => matches!(participant, Rejected | InProgress | Missing | Done),
        RideStatus::Done => matches!(participant, Rejected | Missing | Done | NotMarked),
    }
}

impl InMemoryStore {
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4(),
            taken_at: Utc::now(),
            ids: self.id_sequence().clone(),
            users: self.users().into_iter().cloned().collect(),
            rides: self.rides().cloned().collect(),
        }
    }

    /// Rebuild a store from a snapshot.
    ///
    /// # Errors
    ///
    /// `UnsupportedVersion` for a snapshot from another format version,
    /// `ValidationFailed` if the snapshot breaks any store invariant.
    pub fn restore(snapshot: StoreSnapshot) -> Result<Self, CheckpointError> {
        if snapshot.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: snapshot.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        let problems = snapshot.problems();
        if !problems.is_empty() {
            return Err(CheckpointError::ValidationFailed { problems });
        }
        info!(
            checkpoint = %snapshot.id,
            users = snapshot.users.len(),
            rides = snapshot.rides.len(),
            "Store restored from checkpoint"
        );
        Ok(Self::from_parts(snapshot.users, snapshot.rides, snapshot.ids))
    }
}

impl RideService<InMemoryStore> {
    /// Snapshot the store under the service lock.
    pub fn snapshot(&self) -> StoreSnapshot {
        self.with_store(InMemoryStore::snapshot)
    }

    /// # Errors
    ///
    /// Anything [`InMemoryStore::restore`] returns.
    pub fn restore(snapshot: StoreSnapshot) -> Result<Self, CheckpointError> {
        InMemoryStore::restore(snapshot).map(Self::new)
    }
}
