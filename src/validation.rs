//! Input validation for user, ride and join requests.
//!
//! Checks use Stillwater's `Validation` so that every problem with a request
//! is reported at once instead of one per round trip.

use crate::error::RideError;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// A single problem found in a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    #[error("alias '{alias}' must not contain whitespace")]
    AliasWhitespace { alias: String },

    #[error("{field} must be at least 1")]
    NoSeats { field: &'static str },
}

type Check = Validation<(), NonEmptyVec<Violation>>;

fn non_empty(field: &'static str, value: &str) -> Check {
    if value.trim().is_empty() {
        Validation::fail(Violation::EmptyField { field })
    } else {
        Validation::success(())
    }
}

fn at_least_one_seat(field: &'static str, seats: u32) -> Check {
    if seats == 0 {
        Validation::fail(Violation::NoSeats { field })
    } else {
        Validation::success(())
    }
}

fn alias_shape(alias: &str) -> Check {
    if alias.chars().any(char::is_whitespace) {
        Validation::fail(Violation::AliasWhitespace {
            alias: alias.to_string(),
        })
    } else {
        Validation::success(())
    }
}

fn finish(checks: Vec<Check>) -> Result<(), RideError> {
    match Validation::all_vec(checks) {
        Validation::Success(_) => Ok(()),
        Validation::Failure(errors) => Err(RideError::InvalidRequest {
            violations: errors.iter().cloned().collect(),
        }),
    }
}

pub fn validate_user(alias: &str, name: &str) -> Result<(), RideError> {
    finish(vec![
        non_empty("alias", alias),
        alias_shape(alias),
        non_empty("name", name),
    ])
}

pub fn validate_ride(
    ride_date_and_time: &str,
    final_address: &str,
    available_spaces: u32,
) -> Result<(), RideError> {
    finish(vec![
        non_empty("rideDateAndTime", ride_date_and_time),
        non_empty("finalAddress", final_address),
        at_least_one_seat("availableSpaces", available_spaces),
    ])
}

pub fn validate_join(
    alias: &str,
    destination: &str,
    occupied_spaces: u32,
) -> Result<(), RideError> {
    finish(vec![
        non_empty("participant", alias),
        non_empty("destination", destination),
        at_least_one_seat("occupiedSpaces", occupied_spaces),
    ])
}
