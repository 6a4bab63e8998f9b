//! Per-user ride statistics.
//!
//! Always computed from the live participant records, never cached.

use crate::ride::ParticipantStatus;
use crate::store::EntityStore;
use crate::user::User;
use serde::{Deserialize, Serialize};

/// Outcome counts over every join request a user has made.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RideStatistics {
    pub previous_rides_total: usize,
    pub previous_rides_completed: usize,
    pub previous_rides_missing: usize,
    pub previous_rides_not_marked: usize,
    pub previous_rides_rejected: usize,
}

impl RideStatistics {
    pub fn tally<I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = ParticipantStatus>,
    {
        statuses
            .into_iter()
            .fold(Self::default(), |mut stats, status| {
                stats.previous_rides_total += 1;
                match status {
                    ParticipantStatus::Done => stats.previous_rides_completed += 1,
                    ParticipantStatus::Missing => stats.previous_rides_missing += 1,
                    ParticipantStatus::NotMarked => stats.previous_rides_not_marked += 1,
                    ParticipantStatus::Rejected => stats.previous_rides_rejected += 1,
                    ParticipantStatus::Waiting
                    | ParticipantStatus::Confirmed
                    | ParticipantStatus::InProgress => {}
                }
                stats
            })
    }

    /// Read the user's join records off the rides that hold them.
    pub fn for_user<S: EntityStore + ?Sized>(store: &S, user: &User) -> Self {
        let alias = user.alias();
        Self::tally(user.participations().iter().filter_map(|&id| {
            store
                .ride(id)
                .and_then(|ride| ride.participant(alias))
                .map(|p| p.status())
        }))
    }
}
