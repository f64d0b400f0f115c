//! Macro for implementing Display and FromStr for wire-label enums
//!
//! Several enums travel over the wire as lowercase labels (grant types, task
//! states). This macro derives both directions from one mapping table.
//!
//! # Example
//!
//! ```rust
//! use fanella_domain::impl_wire_label_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Visibility {
//!     Private,
//!     Shared,
//! }
//!
//! impl_wire_label_conversions!(Visibility {
//!     Private => "private",
//!     Shared => "shared",
//! });
//!
//! assert_eq!(Visibility::Shared.to_string(), "shared");
//! assert_eq!("PRIVATE".parse::<Visibility>(), Ok(Visibility::Private));
//! ```

/// Implements Display and FromStr traits for wire-label enums
///
/// Parsing is case-insensitive; display always emits the label exactly as
/// written in the mapping.
#[macro_export]
macro_rules! impl_wire_label_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => write!(f, $str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
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
    enum Channel {
        Upload,
        Crawl,
        ManualEntry,
    }

    impl_wire_label_conversions!(Channel {
        Upload => "upload",
        Crawl => "crawl",
        ManualEntry => "manual_entry",
    });

    #[test]
    fn test_display_uses_label() {
        assert_eq!(Channel::Upload.to_string(), "upload");
        assert_eq!(Channel::ManualEntry.to_string(), "manual_entry");
    }

    #[test]
    fn test_fromstr_ignores_case() {
        assert_eq!(Channel::from_str("crawl").unwrap(), Channel::Crawl);
        assert_eq!(Channel::from_str("CRAWL").unwrap(), Channel::Crawl);
        assert_eq!(Channel::from_str("Manual_Entry").unwrap(), Channel::ManualEntry);
    }

    #[test]
    fn test_fromstr_rejects_unknown() {
        let result = Channel::from_str("carrier_pigeon");
        assert!(result.unwrap_err().contains("Invalid Channel: carrier_pigeon"));
        assert!(Channel::from_str("").is_err());
    }
}
