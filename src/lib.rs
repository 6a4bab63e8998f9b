//! Carpool: ride and participant state machines with a capacity engine.
//!
//! Drivers publish rides with a fixed number of seats. Passengers ask to
//! join, the driver accepts or rejects each request, starts the ride with
//! whoever showed up, unloads passengers and ends the ride. Every status
//! change goes through a declared transition table, and accepting a
//! request never confirms more seats than the ride offers.
//!
//! The engine follows a "pure core, imperative shell" split. [`Ride`] and
//! its participants are plain values whose operations either succeed
//! completely or return a [`RideError`] and leave the value untouched.
//! [`RideService`] is the shell: it owns the store behind a lock, keeps
//! user-side references in step and logs every outcome.
//!
//! # Example
//!
//! ```rust
//! use carpool::{JoinRequest, NewUser, RideDetails, RideService, StartRide};
//! use carpool::ride::ParticipantStatus;
//!
//! let service: RideService = RideService::default();
//! for (alias, name) in [("jperez", "Juan Perez"), ("lgomez", "Luis Gomez")] {
//!     service
//!         .register_user(NewUser {
//!             alias: alias.to_string(),
//!             name: name.to_string(),
//!             car_plate: None,
//!         })
//!         .unwrap();
//! }
//!
//! let ride = service
//!     .create_ride(
//!         "jperez",
//!         RideDetails {
//!             ride_date_and_time: "2025/07/15 22:00".to_string(),
//!             final_address: "Av Javier Prado 456, San Borja".to_string(),
//!             available_spaces: 2,
//!         },
//!     )
//!     .unwrap();
//!
//! let request = JoinRequest {
//!     destination: "Av Aramburú 245, Surquillo".to_string(),
//!     occupied_spaces: 1,
//! };
//! service.request_to_join("jperez", ride.id, "lgomez", request).unwrap();
//! service.accept_participant("jperez", ride.id, "lgomez").unwrap();
//!
//! let outcome = service
//!     .start_ride("jperez", ride.id, StartRide::default())
//!     .unwrap();
//! assert_eq!(outcome.missing, vec!["lgomez".to_string()]);
//!
//! let view = service.get_ride("jperez", ride.id).unwrap();
//! assert_eq!(view.participants[0].status, ParticipantStatus::Missing);
//! ```

pub mod checkpoint;
pub mod config;
pub mod core;
pub mod error;
pub mod ride;
pub mod service;
pub mod stats;
pub mod store;
pub mod telemetry;
pub mod user;
pub mod validation;
pub mod view;

// Re-export commonly used types
pub use checkpoint::{CheckpointError, StoreSnapshot};
pub use config::{Config, ConfigError, SeedData};
pub use error::{ErrorKind, ErrorResponse, RideError};
pub use ride::{Ride, RideDetails, RideId};
pub use service::{JoinRequest, NewUser, RideService, StartRide, UnloadRequest};
pub use stats::RideStatistics;
pub use store::{EntityStore, InMemoryStore};
pub use user::User;
pub use view::{RideView, UserView};
