use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Declares an opaque, string-backed document identifier.
///
/// The remote service issues ids, so they are never generated client-side.
macro_rules! document_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new id from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the id as issued by the service.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(ParseIdError {
                        kind: stringify!($name),
                    });
                }
                Ok(Self::new(trimmed))
            }
        }
    };
}

document_id!(
    /// Identifier of a top-level test group.
    GroupId
);
document_id!(
    /// Identifier of a subgroup nested under a group.
    SubGroupId
);
document_id!(
    /// Identifier of a single test case.
    TestId
);
document_id!(
    /// Identifier of a user (technician).
    UserId
);
document_id!(
    /// Identifier of a started test session.
    SessionId
);

// ─── Parse errors ──────────────────────────────────────────────────────────────

/// Error type for parsing an id from a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    kind: &'static str,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {} from an empty string", self.kind)
    }
}

impl std::error::Error for ParseIdError {}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_id_display() {
        let id = GroupId::new("65f1c0ffee");
        assert_eq!(id.to_string(), "65f1c0ffee");
    }

    #[test]
    fn test_id_from_str_trims() {
        let id: TestId = "  t1 ".parse().unwrap();
        assert_eq!(id, TestId::new("t1"));
    }

    #[test]
    fn test_id_from_str_rejects_empty() {
        let result = "   ".parse::<SubGroupId>();
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().to_string(),
            "failed to parse SubGroupId from an empty string"
        );
    }

    #[test]
    fn test_id_debug_names_kind() {
        assert_eq!(format!("{:?}", UserId::new("u1")), "UserId(u1)");
    }

    #[test]
    fn test_id_serializes_as_bare_string() {
        let json = serde_json::to_string(&SessionId::new("s9")).unwrap();
        assert_eq!(json, "\"s9\"");
    }
}
