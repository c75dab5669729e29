//! Identifiers used across the domain.
//!
//! # External identifiers
//! - [`GroupId`] - a travel group, owned by the caller
//! - [`MemberId`] - a member of a group
//! - [`InventoryId`] - a flight, hotel or activity from an inventory source
//!
//! # Engine identifiers
//! - [`ConsensusId`] - one voting round
//! - [`OptionId`] - one candidate itinerary

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates the identifier from an existing string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generates a new random identifier.
            pub fn generate() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }
    };
}

string_id!(
    /// Identifier of a travel group.
    GroupId
);

string_id!(
    /// Identifier of a group member. Unique per group.
    MemberId
);

string_id!(
    /// Provider identifier of a flight, hotel or activity.
    InventoryId
);

uuid_id!(
    /// Identifier of one voting round.
    ConsensusId
);

uuid_id!(
    /// Identifier of one candidate itinerary.
    OptionId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_id_display_and_eq() {
        let id = MemberId::new("alice");
        assert_eq!(id.as_str(), "alice");
        assert_eq!(id.to_string(), "alice");
        assert_eq!(id, MemberId::from("alice"));
    }

    #[test]
    fn test_generated_ids_are_unique() {
        assert_ne!(OptionId::generate(), OptionId::generate());
    }

    #[test]
    fn test_uuid_id_parses_its_display() {
        let id = ConsensusId::generate();
        let parsed: ConsensusId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
        assert!("not-a-uuid".parse::<ConsensusId>().is_err());
    }

    #[test]
    fn test_ids_serialize_transparently() {
        let json = serde_json::to_string(&GroupId::new("g-1")).unwrap();
        assert_eq!(json, "\"g-1\"");
    }
}
