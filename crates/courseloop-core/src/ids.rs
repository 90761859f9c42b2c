//! Strongly Typed Identifiers
//!
//! Canonical ids are internally generated, opaque and immutable once
//! assigned. The newtype pattern prevents mixing id kinds at compile time.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Error type for id parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    /// The type of id that failed to parse.
    pub id_type: &'static str,
    /// The underlying UUID parse error message.
    pub message: String,
}

impl Display for ParseIdError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "failed to parse {}: {}", self.id_type, self.message)
    }
}

impl std::error::Error for ParseIdError {}

/// Macro to define a strongly-typed canonical id.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generates a new random id.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wraps an existing UUID.
            #[must_use]
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns a reference to the underlying UUID.
            #[must_use]
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                Uuid::parse_str(s)
                    .map(Self)
                    .map_err(|e| ParseIdError {
                        id_type: stringify!($name),
                        message: e.to_string(),
                    })
            }
        }
    };
}

define_id!(
    /// Canonical identifier for a course.
    CourseId
);

define_id!(
    /// Canonical identifier for a participant.
    ParticipantId
);

define_id!(
    /// Canonical identifier for a member.
    MemberId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_creates_distinct_ids() {
        assert_ne!(CourseId::new(), CourseId::new());
    }

    #[test]
    fn test_from_uuid_preserves_value() {
        let uuid = Uuid::new_v4();
        let id = ParticipantId::from_uuid(uuid);
        assert_eq!(id.as_uuid(), &uuid);
    }

    #[test]
    fn test_display_and_parse_roundtrip() {
        let id = MemberId::new();
        let parsed: MemberId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_parse_invalid_returns_error() {
        let result: std::result::Result<CourseId, _> = "not-a-uuid".parse();
        let err = result.unwrap_err();
        assert_eq!(err.id_type, "CourseId");
        assert!(!err.message.is_empty());
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let uuid = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap();
        let id = CourseId::from_uuid(uuid);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"550e8400-e29b-41d4-a716-446655440000\"");
    }
}
