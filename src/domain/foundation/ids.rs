//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! uuid_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an identifier from an existing UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

uuid_id!(
    /// Unique identifier for a recruitment cycle.
    CycleId
);

uuid_id!(
    /// Unique identifier for a screening stage within a cycle.
    StageId
);

uuid_id!(
    /// Identity of a person under consideration in a cycle.
    ///
    /// This is the stable user identifier provided by the identity
    /// service; an applicant row exists per (cycle, person).
    ApplicantId
);

uuid_id!(
    /// Identity of a privileged employee (screener, administrator).
    EmployeeId
);

uuid_id!(
    /// Unique identifier for a screening record.
    ScreeningId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        assert_ne!(CycleId::new(), CycleId::new());
        assert_ne!(StageId::new(), StageId::new());
        assert_ne!(ApplicantId::new(), ApplicantId::new());
    }

    #[test]
    fn id_round_trips_through_display() {
        let id = CycleId::new();
        let parsed: CycleId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn invalid_uuid_string_is_rejected() {
        assert!("not-a-uuid".parse::<ScreeningId>().is_err());
    }
}
