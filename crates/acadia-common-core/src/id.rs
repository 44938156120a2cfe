//! Strongly-typed identifiers.
//!
//! Identifiers are sequential integers handed out by the owning store,
//! never derived from collection size.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A strongly-typed numeric ID wrapper.
macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[doc = concat!("A unique identifier with prefix '", $prefix, "_'.")]
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wrap a raw numeric value.
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            /// Parse from string (with or without prefix).
            pub fn parse(s: &str) -> Result<Self, IdParseError> {
                let s = s.strip_prefix(concat!($prefix, "_")).unwrap_or(s);
                s.parse::<u64>()
                    .map(Self)
                    .map_err(|_| IdParseError::InvalidFormat)
            }

            /// Get the inner numeric value.
            pub const fn value(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}_{}", $prefix, self.0)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl std::str::FromStr for $name {
            type Err = IdParseError;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }
    };
}

/// Error parsing an ID.
#[derive(Debug, Clone, thiserror::Error)]
pub enum IdParseError {
    /// The ID format is invalid.
    #[error("invalid ID format")]
    InvalidFormat,
}

// Define all ID types
define_id!(UserId, "usr");
define_id!(RecordId, "rec");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_roundtrip() {
        let id = RecordId::new(42);
        let s = id.to_string();
        let parsed = RecordId::parse(&s).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_id_prefix() {
        assert_eq!(RecordId::new(7).to_string(), "rec_7");
        assert_eq!(UserId::new(3).to_string(), "usr_3");
    }

    #[test]
    fn test_id_serialization_is_transparent() {
        let id = UserId::new(11);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "11");
        let deserialized: UserId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn test_id_parse_without_prefix() {
        let parsed = RecordId::parse("19").unwrap();
        assert_eq!(parsed, RecordId::new(19));
    }

    #[test]
    fn test_id_parse_rejects_garbage() {
        assert!(RecordId::parse("rec_abc").is_err());
        assert!(UserId::parse("").is_err());
    }

    #[test]
    fn test_id_ordering() {
        assert!(RecordId::new(1) < RecordId::new(2));
    }
}
