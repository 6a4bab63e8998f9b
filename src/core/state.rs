//! Core State trait for ride and participant statuses.
//!
//! All status enums implement this trait, which provides pure methods
//! for inspecting a status without side effects.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for lifecycle statuses.
///
/// All methods are pure. A status is a small immutable value describing
/// where a ride or a join request currently sits in its lifecycle.
///
/// # Required Traits
///
/// - `Copy`: statuses are plain tags and are passed by value
/// - `PartialEq`: statuses must be comparable for transition logic
/// - `Debug`: statuses must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: statuses appear in views and snapshots
///
/// # Example
///
/// ```rust
/// use carpool::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
/// enum Booking {
///     Open,
///     Closed,
///     Cancelled,
/// }
///
/// impl State for Booking {
///     fn name(&self) -> &str {
///         match self {
///             Self::Open => "open",
///             Self::Closed => "closed",
///             Self::Cancelled => "cancelled",
///         }
///     }
///
///     fn is_final(&self) -> bool {
///         matches!(self, Self::Closed | Self::Cancelled)
///     }
///
///     fn is_error(&self) -> bool {
///         matches!(self, Self::Cancelled)
///     }
/// }
///
/// assert_eq!(Booking::Open.name(), "open");
/// assert!(Booking::Cancelled.is_error());
/// ```
pub trait State:
    Copy + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// The status name as it appears on the wire.
    fn name(&self) -> &str;

    /// Check if this is a terminal status.
    ///
    /// No transition leaves a terminal status.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }

    /// Check if this status records an unsuccessful outcome.
    ///
    /// Default implementation returns `false`.
    fn is_error(&self) -> bool {
        false
    }
}
