//! Applicant status state machine.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Screening status of an applicant within its cycle.
///
/// Transitions are one-directional per processing round:
/// `UnderReview` and `Pending` accept any screening decision;
/// `Unsuccessful` is a sink; `Successful` only re-affirms itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicantStatus {
    UnderReview,
    Pending,
    Unsuccessful,
    Successful,
}

impl ApplicantStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicantStatus::UnderReview => "under_review",
            ApplicantStatus::Pending => "pending",
            ApplicantStatus::Unsuccessful => "unsuccessful",
            ApplicantStatus::Successful => "successful",
        }
    }

    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "under_review" => Ok(ApplicantStatus::UnderReview),
            "pending" => Ok(ApplicantStatus::Pending),
            "unsuccessful" => Ok(ApplicantStatus::Unsuccessful),
            "successful" => Ok(ApplicantStatus::Successful),
            _ => Err(DomainError::new(
                ErrorCode::ValidationFailed,
                format!("Invalid applicant status: {}", s),
            )),
        }
    }

    /// Whether a screening decision may move this status to `next`.
    pub fn can_transition_to(&self, next: ApplicantStatus) -> bool {
        match self {
            ApplicantStatus::UnderReview | ApplicantStatus::Pending => {
                next != ApplicantStatus::UnderReview
            }
            ApplicantStatus::Unsuccessful => false,
            ApplicantStatus::Successful => next == ApplicantStatus::Successful,
        }
    }

    /// Whether the applicant survives into the next stage roster.
    ///
    /// Anyone not explicitly rejected and not still sitting un-reviewed
    /// continues.
    pub fn carries_forward(&self) -> bool {
        matches!(self, ApplicantStatus::Pending | ApplicantStatus::Successful)
    }
}

impl Default for ApplicantStatus {
    fn default() -> Self {
        ApplicantStatus::UnderReview
    }
}

impl fmt::Display for ApplicantStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ApplicantStatus::UnderReview => "Under review",
            ApplicantStatus::Pending => "Pending",
            ApplicantStatus::Unsuccessful => "Unsuccessful",
            ApplicantStatus::Successful => "Successful",
        };
        write!(f, "{}", s)
    }
}
