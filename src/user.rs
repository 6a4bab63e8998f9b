//! Registered users.

use crate::error::RideError;
use crate::ride::RideId;
use crate::validation;
use serde::{Deserialize, Serialize};

/// A registered user, driver and passenger alike.
///
/// Rides are referenced by id only. The join records themselves live on
/// the rides; `participations` lists which rides hold one for this user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    alias: String,
    name: String,
    car_plate: Option<String>,
    created_rides: Vec<RideId>,
    participations: Vec<RideId>,
}

impl User {
    /// # Errors
    ///
    /// `InvalidRequest` for a blank or whitespace-containing alias, or a
    /// blank name.
    pub fn new(alias: &str, name: &str, car_plate: Option<&str>) -> Result<Self, RideError> {
        validation::validate_user(alias, name)?;
        Ok(Self {
            alias: alias.to_string(),
            name: name.to_string(),
            car_plate: car_plate.map(str::to_string),
            created_rides: Vec::new(),
            participations: Vec::new(),
        })
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn car_plate(&self) -> Option<&str> {
        self.car_plate.as_deref()
    }

    /// Rides this user published, oldest first.
    pub fn created_rides(&self) -> &[RideId] {
        &self.created_rides
    }

    /// Rides this user asked to join, oldest first.
    pub fn participations(&self) -> &[RideId] {
        &self.participations
    }

    pub(crate) fn record_created(&mut self, ride: RideId) {
        self.created_rides.push(ride);
    }

    pub(crate) fn record_participation(&mut self, ride: RideId) {
        self.participations.push(ride);
    }
}
