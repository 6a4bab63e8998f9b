//! Process-local entity store.

use super::sequence::RideIdSequence;
use super::EntityStore;
use crate::ride::{Ride, RideId};
use crate::user::User;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Map-backed store kept entirely in memory.
///
/// Users are listed in registration order and rides in id order, which
/// is also creation order.
#[derive(Clone, Debug, Default)]
pub struct InMemoryStore {
    users: HashMap<String, User>,
    user_order: Vec<String>,
    rides: BTreeMap<RideId, Ride>,
    ids: RideIdSequence,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All rides in id order.
    pub fn rides(&self) -> impl Iterator<Item = &Ride> {
        self.rides.values()
    }

    pub(crate) fn id_sequence(&self) -> &RideIdSequence {
        &self.ids
    }

    pub(crate) fn from_parts(users: Vec<User>, rides: Vec<Ride>, ids: RideIdSequence) -> Self {
        let mut store = Self {
            ids,
            ..Self::default()
        };
        for user in users {
            store.put_user(user);
        }
        for ride in rides {
            store.put_ride(ride);
        }
        store
    }
}

impl EntityStore for InMemoryStore {
    fn user(&self, alias: &str) -> Option<&User> {
        self.users.get(alias)
    }

    fn user_mut(&mut self, alias: &str) -> Option<&mut User> {
        self.users.get_mut(alias)
    }

    fn users(&self) -> Vec<&User> {
        self.user_order
            .iter()
            .filter_map(|alias| self.users.get(alias))
            .collect()
    }

    fn put_user(&mut self, user: User) {
        let alias = user.alias().to_string();
        if self.users.insert(alias.clone(), user).is_none() {
            self.user_order.push(alias);
        }
    }

    fn ride(&self, id: RideId) -> Option<&Ride> {
        self.rides.get(&id)
    }

    fn ride_mut(&mut self, id: RideId) -> Option<&mut Ride> {
        self.rides.get_mut(&id)
    }

    fn put_ride(&mut self, ride: Ride) {
        self.rides.insert(ride.id(), ride);
    }

    fn next_ride_id(&mut self) -> RideId {
        let id = self.ids.allocate();
        debug!(ride_id = %id, "Allocated ride id");
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RideError;
    use crate::ride::RideDetails;

    fn user(alias: &str) -> User {
        User::new(alias, "Someone", None).unwrap()
    }

    fn ride(store: &mut InMemoryStore, driver: &str) -> Ride {
        let id = store.next_ride_id();
        Ride::new(
            id,
            driver,
            RideDetails {
                ride_date_and_time: "2025/07/15 22:00".to_string(),
                final_address: "San Borja".to_string(),
                available_spaces: 2,
            },
        )
        .unwrap()
    }

    #[test]
    fn users_are_listed_in_registration_order() {
        let mut store = InMemoryStore::new();
        for alias in ["zeta", "alpha", "mid"] {
            store.put_user(user(alias));
        }
        let aliases: Vec<&str> = store.users().into_iter().map(User::alias).collect();
        assert_eq!(aliases, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn replacing_a_user_keeps_its_position() {
        let mut store = InMemoryStore::new();
        store.put_user(user("a"));
        store.put_user(user("b"));
        store.put_user(User::new("a", "Renamed", None).unwrap());

        let users = store.users();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].name(), "Renamed");
    }

    #[test]
    fn ride_ids_follow_creation_order() {
        let mut store = InMemoryStore::new();
        let first = ride(&mut store, "jperez");
        let second = ride(&mut store, "jperez");
        assert_eq!(first.id(), RideId::new(1));
        assert_eq!(second.id(), RideId::new(2));

        store.put_ride(second);
        store.put_ride(first);
        let ids: Vec<RideId> = store.rides().map(Ride::id).collect();
        assert_eq!(ids, vec![RideId::new(1), RideId::new(2)]);
    }

    #[test]
    fn find_helpers_report_not_found() {
        let store = InMemoryStore::new();
        assert_eq!(
            store.find_user("ghost").unwrap_err(),
            RideError::UserNotFound {
                alias: "ghost".to_string()
            }
        );
        assert_eq!(
            store.find_ride(RideId::new(7)).unwrap_err(),
            RideError::RideNotFound { id: RideId::new(7) }
        );
    }
}
