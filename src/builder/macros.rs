//! Macros for ergonomic machine construction.

/// Generate a `Symbol` implementation for simple enums.
///
/// The generated enum derives everything a symbol needs, is `Copy`, and
/// displays as its variant name.
///
/// # Example
///
/// ```
/// use fsmlite::core::Symbol;
/// use fsmlite::symbol_enum;
///
/// symbol_enum! {
///     pub enum PromiseState {
///         Pending,
///         Resolved,
///         Rejected,
///     }
/// }
///
/// assert_eq!(PromiseState::Resolved.name(), "Resolved");
/// assert_eq!(PromiseState::Pending.to_string(), "Pending");
/// ```
#[macro_export]
macro_rules! symbol_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            Debug,
            serde::Serialize,
            serde::Deserialize
        )]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::Symbol for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::core::Symbol::name(self))
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::Symbol;

    symbol_enum! {
        enum TestState {
            Initial,
            Processing,
            Complete,
        }
    }

    #[test]
    fn symbol_enum_macro_generates_trait() {
        assert_eq!(TestState::Initial.name(), "Initial");
        assert_eq!(TestState::Processing.name(), "Processing");
        assert_eq!(TestState::Complete.name(), "Complete");
    }

    #[test]
    fn symbol_enum_displays_variant_name() {
        assert_eq!(TestState::Complete.to_string(), "Complete");
    }

    #[test]
    fn symbol_enum_supports_visibility_and_attributes() {
        symbol_enum! {
            /// Public symbols
            pub enum PublicEvent {
                #[serde(rename = "GO")]
                Go,
                Stop,
            }
        }

        assert_eq!(PublicEvent::Go.name(), "Go");
        assert_eq!(serde_json::to_string(&PublicEvent::Go).unwrap(), "\"GO\"");
        assert_eq!(PublicEvent::Stop, PublicEvent::Stop);
    }
}
