//! Legal transition relation for lifecycle statuses.
//!
//! A [`Lifecycle`] knows its initial status and which single-step moves
//! are legal. Everything that mutates a status goes through
//! [`Lifecycle::advance`], so an illegal move can never be applied.

use super::state::State;
use thiserror::Error;

/// Error returned when a move is not part of the transition relation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("No transition from '{from}' to '{to}'")]
pub struct TransitionError {
    pub from: String,
    pub to: String,
}

/// A status with a fixed initial value and a fixed successor relation.
///
/// # Example
///
/// ```rust
/// use carpool::core::{Lifecycle, State};
/// use carpool::state_enum;
///
/// state_enum! {
///     enum Door {
///         Shut => "shut",
///         Open => "open",
///         Broken => "broken",
///     }
///     initial: Shut
///     terminal: [Broken]
///     error: [Broken]
///     transitions: [Shut => Open, Open => Shut, Open => Broken]
/// }
///
/// let mut door = Door::initial();
/// assert_eq!(door.advance(Door::Open), Ok(Door::Shut));
/// assert!(door.advance(Door::Open).is_err());
/// assert_eq!(door, Door::Open);
/// ```
pub trait Lifecycle: State {
    /// Status every new instance starts in.
    fn initial() -> Self;

    /// Whether `next` is a legal single step from `self`.
    fn can_transition(&self, next: &Self) -> bool;

    /// Move to `next`, returning the previous status.
    ///
    /// Leaves `self` untouched when the move is illegal.
    fn advance(&mut self, next: Self) -> Result<Self, TransitionError> {
        if !self.can_transition(&next) {
            return Err(TransitionError {
                from: self.name().to_string(),
                to: next.name().to_string(),
            });
        }
        let previous = *self;
        *self = next;
        Ok(previous)
    }
}
