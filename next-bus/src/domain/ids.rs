//! NexTrip identifier types.
//!
//! The API is inconsistent about whether identifiers are JSON strings or
//! numbers (`"Route": "901"` on one deployment, `"Route": 901` on another).
//! Each identifier is normalised to its string form on decode, so equality
//! and URL formatting never depend on which representation was sent.

use std::fmt;

use serde::{Deserialize, Deserializer};

/// Error returned when an identifier is empty or blank.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} identifier: must not be empty")]
pub struct InvalidId {
    kind: &'static str,
}

/// Wire representation of an identifier before normalisation.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Unsigned(u64),
    Signed(i64),
}

impl RawId {
    fn into_string(self) -> String {
        match self {
            RawId::Text(s) => s.trim().to_string(),
            RawId::Unsigned(n) => n.to_string(),
            RawId::Signed(n) => n.to_string(),
        }
    }
}

macro_rules! identifier {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash)]
        pub struct $name(String);

        impl $name {
            /// Parse an identifier, rejecting empty or whitespace-only input.
            pub fn parse(s: &str) -> Result<Self, InvalidId> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(InvalidId { kind: $kind });
                }
                Ok(Self(trimmed.to_string()))
            }

            /// Returns the identifier exactly as it goes into a request path.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = RawId::deserialize(deserializer)?.into_string();
                Self::parse(&raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

identifier!(
    /// A transit route identifier, e.g. `901` for the METRO Blue Line.
    ///
    /// # Examples
    ///
    /// ```
    /// use next_bus::domain::RouteId;
    ///
    /// let route = RouteId::parse("901").unwrap();
    /// assert_eq!(route.as_str(), "901");
    /// assert!(RouteId::parse("  ").is_err());
    /// ```
    RouteId,
    "route"
);

identifier!(
    /// A direction identifier. Only meaningful together with its [`RouteId`].
    DirectionId,
    "direction"
);

identifier!(
    /// A stop identifier (NexTrip "place code"), scoped to a route and direction.
    StopId,
    "stop"
);
