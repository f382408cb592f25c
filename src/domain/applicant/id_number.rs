//! Cycle-scoped human-readable applicant numbers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Sequential applicant number within one cycle, rendered zero-padded
/// to three digits ("001", "002", ...). Numbers past 999 simply grow
/// wider.
///
/// Allocation is serialized by the storage layer (a locked per-cycle
/// counter row); this type only carries and formats the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdNumber(u32);

impl IdNumber {
    /// First number handed out in a fresh cycle.
    pub fn first() -> Self {
        Self(1)
    }

    pub fn new(value: u32) -> Result<Self, DomainError> {
        if value == 0 {
            return Err(DomainError::new(
                ErrorCode::ValidationFailed,
                "Applicant numbers start at 1",
            ));
        }
        Ok(Self(value))
    }

    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for IdNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}", self.0)
    }
}

impl FromStr for IdNumber {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u32 = s.parse().map_err(|_| {
            DomainError::new(
                ErrorCode::ValidationFailed,
                format!("Invalid applicant number: {}", s),
            )
        })?;
        IdNumber::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn first_formats_zero_padded() {
        assert_eq!(IdNumber::first().to_string(), "001");
        assert_eq!(IdNumber::first().next().to_string(), "002");
    }

    #[test]
    fn wide_numbers_keep_all_digits() {
        assert_eq!(IdNumber::new(1042).unwrap().to_string(), "1042");
    }

    #[test]
    fn zero_is_rejected() {
        assert!(IdNumber::new(0).is_err());
        assert!("000".parse::<IdNumber>().is_err());
    }

    #[test]
    fn parses_padded_form() {
        let n: IdNumber = "007".parse().unwrap();
        assert_eq!(n.as_u32(), 7);
    }

    proptest! {
        #[test]
        fn display_round_trips(value in 1u32..100_000) {
            let n = IdNumber::new(value).unwrap();
            let parsed: IdNumber = n.to_string().parse().unwrap();
            prop_assert_eq!(n, parsed);
            prop_assert!(n.to_string().len() >= 3);
        }
    }
}
