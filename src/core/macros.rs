//! Macro for declaring lifecycle status enums.

/// Declare a status enum together with its [`State`](crate::core::State)
/// and [`Lifecycle`](crate::core::Lifecycle) implementations.
///
/// Each variant carries its wire name, which is used both by
/// `State::name` and by serde. Terminal and error sets are optional;
/// a missing `transitions` list means no move is legal.
///
/// # Example
///
/// ```
/// use carpool::core::{Lifecycle, State};
/// use carpool::state_enum;
///
/// state_enum! {
///     pub enum Signal {
///         Red => "red",
///         Green => "green",
///         Off => "off",
///     }
///     initial: Red
///     terminal: [Off]
///     transitions: [Red => Green, Green => Red, Red => Off]
/// }
///
/// assert_eq!(Signal::Green.name(), "green");
/// assert_eq!(serde_json::to_string(&Signal::Off).unwrap(), "\"off\"");
/// assert!(Signal::Red.can_transition(&Signal::Off));
/// assert!(!Signal::Green.can_transition(&Signal::Off));
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $wire:literal
            ),* $(,)?
        }

        initial: $initial:ident
        $(terminal: [$($terminal:ident),* $(,)?])?
        $(error: [$($error:ident),* $(,)?])?
        $(transitions: [$($from:ident => $to:ident),* $(,)?])?
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, ::serde::Serialize, ::serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                #[serde(rename = $wire)]
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => $wire),*
                }
            }

            fn is_final(&self) -> bool {
                match self {
                    $($(Self::$terminal => true,)*)?
                    _ => false,
                }
            }

            fn is_error(&self) -> bool {
                match self {
                    $($(Self::$error => true,)*)?
                    _ => false,
                }
            }
        }

        impl $crate::core::Lifecycle for $name {
            fn initial() -> Self {
                Self::$initial
            }

            fn can_transition(&self, next: &Self) -> bool {
                match (self, next) {
                    $($((Self::$from, Self::$to) => true,)*)?
                    _ => false,
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::core::State::name(self))
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{Lifecycle, State};

    state_enum! {
        enum TestState {
            Initial => "initial",
            Processing => "processing",
            Complete => "complete",
            Failed => "failed",
        }
        initial: Initial
        terminal: [Complete, Failed]
        error: [Failed]
        transitions: [
            Initial => Processing,
            Processing => Complete,
            Processing => Failed,
        ]
    }

    #[test]
    fn state_enum_macro_generates_traits() {
        let state = TestState::Initial;
        assert_eq!(state.name(), "initial");
        assert!(!state.is_final());
        assert!(!state.is_error());

        let complete = TestState::Complete;
        assert!(complete.is_final());
        assert!(!complete.is_error());

        let failed = TestState::Failed;
        assert!(failed.is_final());
        assert!(failed.is_error());
    }

    #[test]
    fn wire_names_drive_serde_and_display() {
        let json = serde_json::to_string(&TestState::Processing).unwrap();
        assert_eq!(json, "\"processing\"");

        let parsed: TestState = serde_json::from_str("\"failed\"").unwrap();
        assert_eq!(parsed, TestState::Failed);

        assert_eq!(TestState::Complete.to_string(), "complete");
    }

    #[test]
    fn declared_transitions_are_the_only_legal_ones() {
        assert!(TestState::Initial.can_transition(&TestState::Processing));
        assert!(TestState::Processing.can_transition(&TestState::Failed));
        assert!(!TestState::Initial.can_transition(&TestState::Complete));
        assert!(!TestState::Complete.can_transition(&TestState::Initial));
    }

    #[test]
    fn state_enum_supports_visibility() {
        state_enum! {
            pub enum PublicState {
                A => "a",
                B => "b",
            }
            initial: A
            terminal: [B]
            transitions: [A => B]
        }

        assert_eq!(PublicState::initial(), PublicState::A);
        assert!(PublicState::B.is_final());
    }

    #[test]
    fn state_enum_works_without_optional_sections() {
        state_enum! {
            enum MinimalState {
                One => "one",
                Two => "two",
            }
            initial: One
        }

        let state = MinimalState::initial();
        assert!(!state.is_final());
        assert!(!state.is_error());
        assert!(!state.can_transition(&MinimalState::Two));
        assert_eq!(MinimalState::Two.name(), "two");
    }
}
