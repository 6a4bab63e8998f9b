//! Read-side projections of users and rides.
//!
//! These are the shapes a request layer serializes. Field names are fixed
//! and camelCased on the wire.

use crate::ride::{Participant, ParticipantStatus, Ride, RideId, RideStatus};
use crate::stats::RideStatistics;
use crate::store::EntityStore;
use crate::user::User;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub alias: String,
    pub name: String,
    pub car_plate: Option<String>,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            alias: user.alias().to_string(),
            name: user.name().to_string(),
            car_plate: user.car_plate().map(str::to_string),
        }
    }
}

/// Who asked to join, with their track record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantSummary {
    pub alias: String,
    #[serde(flatten)]
    pub statistics: RideStatistics,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantView {
    pub confirmation: Option<bool>,
    pub destination: String,
    pub occupied_spaces: u32,
    pub status: ParticipantStatus,
    pub participant: ParticipantSummary,
}

impl ParticipantView {
    pub fn project<S: EntityStore + ?Sized>(store: &S, participant: &Participant) -> Self {
        let statistics = store
            .user(participant.alias())
            .map(|user| RideStatistics::for_user(store, user))
            .unwrap_or_default();
        Self {
            confirmation: participant.confirmation(),
            destination: participant.destination().to_string(),
            occupied_spaces: participant.occupied_spaces(),
            status: participant.status(),
            participant: ParticipantSummary {
                alias: participant.alias().to_string(),
                statistics,
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RideView {
    pub id: RideId,
    pub ride_date_and_time: String,
    pub final_address: String,
    pub driver: String,
    pub status: RideStatus,
    pub participants: Vec<ParticipantView>,
}

impl RideView {
    pub fn project<S: EntityStore + ?Sized>(store: &S, ride: &Ride) -> Self {
        Self {
            id: ride.id(),
            ride_date_and_time: ride.ride_date_and_time().to_string(),
            final_address: ride.final_address().to_string(),
            driver: ride.driver().to_string(),
            status: ride.status(),
            participants: ride
                .participants()
                .iter()
                .map(|p| ParticipantView::project(store, p))
                .collect(),
        }
    }
}
