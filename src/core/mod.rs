//! Core lifecycle types.
//!
//! This module contains the pure part of the state machines:
//! - Status definitions via the `State` trait
//! - The legal transition relation via the `Lifecycle` trait
//! - The `state_enum!` macro that declares both in one place
//!
//! Nothing in this module touches the entity store or performs I/O.

mod lifecycle;
mod macros;
mod state;

pub use lifecycle::{Lifecycle, TransitionError};
pub use state::State;
