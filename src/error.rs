//! Error types for ride and user operations.
//!
//! Every failure carries a human-readable message and maps to exactly one
//! [`ErrorKind`], so a request layer can pick a status code by matching on
//! the kind instead of parsing strings.

use crate::ride::RideId;
use crate::validation::Violation;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Coarse classification of a [`RideError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A referenced user or ride does not exist.
    NotFound,
    /// The ride or participant is not in the status the operation needs.
    InvalidState,
    /// Accepting would push confirmed seats above the ride's capacity.
    CapacityExceeded,
    /// The request itself is malformed.
    InvalidInput,
}

impl ErrorKind {
    /// HTTP status a request layer should answer with.
    pub fn status_code(self) -> u16 {
        match self {
            Self::NotFound => 404,
            Self::InvalidState | Self::CapacityExceeded | Self::InvalidInput => 422,
        }
    }
}

/// Errors returned by ride and user operations.
///
/// No operation applies a partial mutation: when one of these is returned
/// the store is exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RideError {
    #[error("User '{alias}' not found")]
    UserNotFound { alias: String },

    #[error("Ride {id} not found")]
    RideNotFound { id: RideId },

    #[error("User '{alias}' is already registered")]
    DuplicateUser { alias: String },

    #[error("'{alias}' has not requested to join ride {ride}")]
    ParticipantNotFound { ride: RideId, alias: String },

    #[error("'{alias}' already requested to join ride {ride}")]
    DuplicateRequest { ride: RideId, alias: String },

    #[error("Ride {ride} is {status}, not ready")]
    RideNotReady { ride: RideId, status: String },

    #[error("Ride {ride} cannot move from {from} to {to}")]
    RideTransition {
        ride: RideId,
        from: String,
        to: String,
    },

    #[error("Participant '{alias}' on ride {ride} is {from}, cannot become {to}")]
    ParticipantTransition {
        ride: RideId,
        alias: String,
        from: String,
        to: String,
    },

    #[error("Ride {ride} still has {waiting} request(s) waiting for a decision")]
    PendingRequests { ride: RideId, waiting: usize },

    #[error(
        "Ride {ride} has {confirmed} of {available} seat(s) confirmed, \
         '{alias}' needs {requested}"
    )]
    CapacityExceeded {
        ride: RideId,
        alias: String,
        requested: u32,
        confirmed: u64,
        available: u32,
    },

    #[error("Invalid request: {}", join_violations(.violations))]
    InvalidRequest { violations: Vec<Violation> },
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl RideError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UserNotFound { .. } | Self::RideNotFound { .. } => ErrorKind::NotFound,
            Self::DuplicateUser { .. }
            | Self::ParticipantNotFound { .. }
            | Self::DuplicateRequest { .. }
            | Self::RideNotReady { .. }
            | Self::RideTransition { .. }
            | Self::ParticipantTransition { .. }
            | Self::PendingRequests { .. } => ErrorKind::InvalidState,
            Self::CapacityExceeded { .. } => ErrorKind::CapacityExceeded,
            Self::InvalidRequest { .. } => ErrorKind::InvalidInput,
        }
    }

    pub fn status_code(&self) -> u16 {
        self.kind().status_code()
    }
}

/// Serializable error payload for a request layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: ErrorKind,
    pub message: String,
}

impl From<&RideError> for ErrorResponse {
    fn from(err: &RideError) -> Self {
        Self {
            code: err.kind(),
            message: err.to_string(),
        }
    }
}
