//! Operation facade for a request layer.
//!
//! [`RideService`] is the imperative shell around the ride engine: it looks
//! entities up in the store, calls the pure ride operations, keeps the
//! user-side references in step and logs the outcome. Each call holds the
//! store lock for its whole duration, so concurrent callers can never both
//! pass the same capacity check.

mod requests;

pub use requests::{JoinRequest, NewUser, StartRide, UnloadRequest};

use crate::config::SeedData;
use crate::error::RideError;
use crate::ride::{BoardingOutcome, Ride, RideDetails, RideId};
use crate::stats::RideStatistics;
use crate::store::{EntityStore, InMemoryStore};
use crate::user::User;
use crate::validation;
use crate::view::{RideView, UserView};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{info, warn};

/// Thread-safe entry point for every user and ride operation.
pub struct RideService<S: EntityStore = InMemoryStore> {
    store: Mutex<S>,
}

impl Default for RideService<InMemoryStore> {
    fn default() -> Self {
        Self::new(InMemoryStore::new())
    }
}

impl<S: EntityStore> RideService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Mutex::new(store),
        }
    }

    /// Build a service over `store` and load `seed` into it.
    ///
    /// # Errors
    ///
    /// The first error any seeded operation returns.
    pub fn seeded(store: S, seed: &SeedData) -> Result<Self, RideError> {
        let service = Self::new(store);
        service.apply_seed(seed)?;
        Ok(service)
    }

    pub fn into_inner(self) -> S {
        self.store
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `read` against the store under the service lock.
    pub fn with_store<R>(&self, read: impl FnOnce(&S) -> R) -> R {
        read(&self.lock())
    }

    // Every operation completes or leaves the store untouched, so a
    // poisoned lock still guards a consistent store.
    fn lock(&self) -> MutexGuard<'_, S> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Load users, rides and pending requests through the normal operations.
    ///
    /// # Errors
    ///
    /// The first error any seeded operation returns.
    pub fn apply_seed(&self, seed: &SeedData) -> Result<(), RideError> {
        for user in &seed.users {
            self.register_user(user.clone())?;
        }
        for ride in &seed.rides {
            let created = self.create_ride(&ride.driver, ride.details.clone())?;
            for request in &ride.requests {
                self.request_to_join(
                    &ride.driver,
                    created.id,
                    &request.participant,
                    JoinRequest {
                        destination: request.destination.clone(),
                        occupied_spaces: request.occupied_spaces,
                    },
                )?;
                if request.accepted {
                    self.accept_participant(&ride.driver, created.id, &request.participant)?;
                }
            }
        }
        info!(
            users = seed.users.len(),
            rides = seed.rides.len(),
            "Seed data loaded"
        );
        Ok(())
    }

    /// # Errors
    ///
    /// `InvalidRequest` for a malformed alias or name, `DuplicateUser` if
    /// the alias is taken.
    pub fn register_user(&self, request: NewUser) -> Result<UserView, RideError> {
        let mut store = self.lock();
        let result = register(&mut *store, &request);
        match &result {
            Ok(_) => info!(alias = %request.alias, "User registered"),
            Err(err) => warn!(
                alias = %request.alias,
                kind = ?err.kind(),
                error = %err,
                "User registration refused"
            ),
        }
        result
    }

    /// Every user in registration order.
    pub fn list_users(&self) -> Vec<UserView> {
        self.lock()
            .users()
            .into_iter()
            .map(UserView::from)
            .collect()
    }

    /// # Errors
    ///
    /// `UserNotFound` for an unknown alias.
    pub fn get_user(&self, alias: &str) -> Result<UserView, RideError> {
        self.lock().find_user(alias).map(UserView::from)
    }

    /// # Errors
    ///
    /// `UserNotFound` for an unknown alias.
    pub fn statistics(&self, alias: &str) -> Result<RideStatistics, RideError> {
        let store = self.lock();
        let user = store.find_user(alias)?;
        Ok(RideStatistics::for_user(&*store, user))
    }

    /// Rides published by `alias`, oldest first.
    ///
    /// # Errors
    ///
    /// `UserNotFound` for an unknown alias.
    pub fn list_user_rides(&self, alias: &str) -> Result<Vec<RideView>, RideError> {
        let store = self.lock();
        let user = store.find_user(alias)?;
        Ok(user
            .created_rides()
            .iter()
            .filter_map(|&id| store.ride(id))
            .map(|ride| RideView::project(&*store, ride))
            .collect())
    }

    /// # Errors
    ///
    /// `UserNotFound` for an unknown driver, `InvalidRequest` for bad
    /// details.
    pub fn create_ride(&self, driver: &str, details: RideDetails) -> Result<RideView, RideError> {
        let mut store = self.lock();
        let result = publish(&mut *store, driver, details);
        match &result {
            Ok(view) => info!(ride_id = %view.id, driver, "Ride created"),
            Err(err) => warn!(driver, kind = ?err.kind(), error = %err, "Ride creation refused"),
        }
        result
    }

    /// A ride as seen by its driver.
    ///
    /// # Errors
    ///
    /// `RideNotFound` if the ride does not exist or `driver` is not its
    /// driver.
    pub fn get_ride(&self, driver: &str, id: RideId) -> Result<RideView, RideError> {
        let store = self.lock();
        let ride = driven_ride(&*store, driver, id)?;
        Ok(RideView::project(&*store, ride))
    }

    /// # Errors
    ///
    /// `UserNotFound` for an unknown participant, `RideNotFound` for an
    /// unknown ride, and anything [`Ride::request_to_join`] returns.
    pub fn request_to_join(
        &self,
        driver: &str,
        id: RideId,
        participant: &str,
        request: JoinRequest,
    ) -> Result<(), RideError> {
        let mut store = self.lock();
        let result = join(&mut *store, driver, id, participant, &request);
        log_outcome("request_to_join", driver, id, Some(participant), &result);
        result
    }

    /// # Errors
    ///
    /// `RideNotFound` for an unknown ride, and anything
    /// [`Ride::accept_participant`] returns.
    pub fn accept_participant(
        &self,
        driver: &str,
        id: RideId,
        participant: &str,
    ) -> Result<(), RideError> {
        let mut store = self.lock();
        let result = driven_ride_mut(&mut *store, driver, id)
            .and_then(|ride| ride.accept_participant(participant));
        log_outcome("accept_participant", driver, id, Some(participant), &result);
        result
    }

    /// # Errors
    ///
    /// `RideNotFound` for an unknown ride, and anything
    /// [`Ride::reject_participant`] returns.
    pub fn reject_participant(
        &self,
        driver: &str,
        id: RideId,
        participant: &str,
    ) -> Result<(), RideError> {
        let mut store = self.lock();
        let result = driven_ride_mut(&mut *store, driver, id)
            .and_then(|ride| ride.reject_participant(participant));
        log_outcome("reject_participant", driver, id, Some(participant), &result);
        result
    }

    /// # Errors
    ///
    /// `RideNotFound` for an unknown ride, and anything
    /// [`Ride::start_ride`] returns.
    pub fn start_ride(
        &self,
        driver: &str,
        id: RideId,
        request: StartRide,
    ) -> Result<BoardingOutcome, RideError> {
        let mut store = self.lock();
        let result = driven_ride_mut(&mut *store, driver, id)
            .and_then(|ride| ride.start_ride(request.present_participants.as_slice()));
        match &result {
            Ok(outcome) => info!(
                ride_id = %id,
                driver,
                boarded = outcome.boarded.len(),
                missing = outcome.missing.len(),
                "Ride started"
            ),
            Err(_) => log_outcome("start_ride", driver, id, None, &result),
        }
        result
    }

    /// # Errors
    ///
    /// `RideNotFound` for an unknown ride, and anything
    /// [`Ride::unload_participant`] returns.
    pub fn unload_participant(
        &self,
        driver: &str,
        id: RideId,
        request: UnloadRequest,
    ) -> Result<(), RideError> {
        let participant = request.participant_alias.as_str();
        let mut store = self.lock();
        let result = driven_ride_mut(&mut *store, driver, id)
            .and_then(|ride| ride.unload_participant(participant));
        log_outcome("unload_participant", driver, id, Some(participant), &result);
        result
    }

    /// Returns the aliases left `notmarked`.
    ///
    /// # Errors
    ///
    /// `RideNotFound` for an unknown ride, and anything [`Ride::end_ride`]
    /// returns.
    pub fn end_ride(&self, driver: &str, id: RideId) -> Result<Vec<String>, RideError> {
        let mut store = self.lock();
        let result = driven_ride_mut(&mut *store, driver, id).and_then(Ride::end_ride);
        match &result {
            Ok(unmarked) => info!(ride_id = %id, driver, unmarked = unmarked.len(), "Ride ended"),
            Err(_) => log_outcome("end_ride", driver, id, None, &result),
        }
        result
    }
}

impl RideService<InMemoryStore> {
    /// In-memory service preloaded with `seed`.
    ///
    /// # Errors
    ///
    /// The first error any seeded operation returns.
    pub fn in_memory(seed: &SeedData) -> Result<Self, RideError> {
        Self::seeded(InMemoryStore::new(), seed)
    }
}

fn log_outcome<T>(
    operation: &'static str,
    driver: &str,
    id: RideId,
    participant: Option<&str>,
    result: &Result<T, RideError>,
) {
    match result {
        Ok(_) => info!(operation, ride_id = %id, driver, participant, "Ride operation applied"),
        Err(err) => warn!(
            operation,
            ride_id = %id,
            driver,
            participant,
            kind = ?err.kind(),
            error = %err,
            "Ride operation refused"
        ),
    }
}

fn register<S: EntityStore + ?Sized>(
    store: &mut S,
    request: &NewUser,
) -> Result<UserView, RideError> {
    let user = User::new(&request.alias, &request.name, request.car_plate.as_deref())?;
    if store.user(user.alias()).is_some() {
        return Err(RideError::DuplicateUser {
            alias: request.alias.clone(),
        });
    }
    let view = UserView::from(&user);
    store.put_user(user);
    Ok(view)
}

fn publish<S: EntityStore + ?Sized>(
    store: &mut S,
    driver: &str,
    details: RideDetails,
) -> Result<RideView, RideError> {
    store.find_user(driver)?;
    // Checked before allocating so a bad request never burns an id.
    validation::validate_ride(
        &details.ride_date_and_time,
        &details.final_address,
        details.available_spaces,
    )?;
    let id = store.next_ride_id();
    let ride = Ride::new(id, driver, details)?;
    let view = RideView::project(&*store, &ride);
    store.put_ride(ride);
    if let Some(user) = store.user_mut(driver) {
        user.record_created(id);
    }
    Ok(view)
}

fn join<S: EntityStore + ?Sized>(
    store: &mut S,
    driver: &str,
    id: RideId,
    participant: &str,
    request: &JoinRequest,
) -> Result<(), RideError> {
    store.find_user(participant)?;
    driven_ride_mut(store, driver, id)?.request_to_join(
        participant,
        &request.destination,
        request.occupied_spaces,
    )?;
    if let Some(user) = store.user_mut(participant) {
        user.record_participation(id);
    }
    Ok(())
}

fn driven_ride<'a, S: EntityStore + ?Sized>(
    store: &'a S,
    driver: &str,
    id: RideId,
) -> Result<&'a Ride, RideError> {
    let ride = store.find_ride(id)?;
    if ride.driver() == driver {
        Ok(ride)
    } else {
        Err(RideError::RideNotFound { id })
    }
}

fn driven_ride_mut<'a, S: EntityStore + ?Sized>(
    store: &'a mut S,
    driver: &str,
    id: RideId,
) -> Result<&'a mut Ride, RideError> {
    let ride = store.find_ride_mut(id)?;
    if ride.driver() == driver {
        Ok(ride)
    } else {
        Err(RideError::RideNotFound { id })
    }
}
