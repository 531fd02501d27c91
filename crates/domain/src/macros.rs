//! String conversions for the small enums the backend sends as text
//!
//! The backend stores statuses, roles and payment types as plain strings.
//! Entities keep the raw string so nothing is lost; typed access goes
//! through the enums generated here.
//!
//! # Example
//!
//! ```rust
//! use mizan_domain::impl_wire_enum;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Shift {
//!     Morning,
//!     Evening,
//! }
//!
//! impl_wire_enum!(Shift {
//!     Morning => "morning",
//!     Evening => "evening",
//! });
//!
//! assert_eq!("EVENING".parse::<Shift>(), Ok(Shift::Evening));
//! assert_eq!(Shift::Morning.as_str(), "morning");
//! ```

/// Implements `as_str`, `Display` and case-insensitive `FromStr`.
///
/// Parsing trims surrounding whitespace. The error names the enum so a bad
/// value is easy to trace back to its field.
#[macro_export]
macro_rules! impl_wire_enum {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Wire representation of the variant.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Tier {
        Gold,
        Silver,
    }

    impl_wire_enum!(Tier {
        Gold => "gold",
        Silver => "silver",
    });

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(Tier::from_str("GOLD"), Ok(Tier::Gold));
        assert_eq!(Tier::from_str(" silver "), Ok(Tier::Silver));
    }

    #[test]
    fn rejects_unknown_values_with_enum_name() {
        let err = Tier::from_str("bronze").unwrap_err();
        assert!(err.contains("Tier"));
        assert!(err.contains("bronze"));
    }

    #[test]
    fn display_matches_wire_value() {
        assert_eq!(Tier::Gold.to_string(), "gold");
        assert_eq!(Tier::Silver.as_str(), "silver");
    }
}
