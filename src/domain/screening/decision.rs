//! Screening decisions submitted by an employee for one batch.

use serde::{Deserialize, Serialize};

use crate::domain::applicant::ApplicantStatus;
use crate::domain::foundation::{ApplicantId, DomainError, ErrorCode};

/// Reason an applicant was screened out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    PoliceClearance,
    NationalId,
    Diploma,
    Transcript,
    WrittenExams,
    Interview,
    JobReadiness,
    Absent,
    Document,
    DisorderlyConduct,
    Other,
}

impl RejectionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectionReason::PoliceClearance => "police_clearance",
            RejectionReason::NationalId => "national_id",
            RejectionReason::Diploma => "diploma",
            RejectionReason::Transcript => "transcript",
            RejectionReason::WrittenExams => "written_exams",
            RejectionReason::Interview => "interview",
            RejectionReason::JobReadiness => "job_readiness",
            RejectionReason::Absent => "absent",
            RejectionReason::Document => "document",
            RejectionReason::DisorderlyConduct => "disorderly_conduct",
            RejectionReason::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "police_clearance" => Ok(RejectionReason::PoliceClearance),
            "national_id" => Ok(RejectionReason::NationalId),
            "diploma" => Ok(RejectionReason::Diploma),
            "transcript" => Ok(RejectionReason::Transcript),
            "written_exams" => Ok(RejectionReason::WrittenExams),
            "interview" => Ok(RejectionReason::Interview),
            "job_readiness" => Ok(RejectionReason::JobReadiness),
            "absent" => Ok(RejectionReason::Absent),
            "document" => Ok(RejectionReason::Document),
            "disorderly_conduct" => Ok(RejectionReason::DisorderlyConduct),
            "other" => Ok(RejectionReason::Other),
            _ => Err(DomainError::new(
                ErrorCode::ValidationFailed,
                format!("Invalid rejection reason: {}", s),
            )),
        }
    }
}

/// One per-applicant decision within a screening batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreeningDecision {
    pub applicant_id: ApplicantId,
    pub status: ApplicantStatus,
    pub rejection_reason: Option<RejectionReason>,
    pub rejection_note: Option<String>,
}

impl ScreeningDecision {
    pub fn new(applicant_id: ApplicantId, status: ApplicantStatus) -> Self {
        Self {
            applicant_id,
            status,
            rejection_reason: None,
            rejection_note: None,
        }
    }

    pub fn with_reason(mut self, reason: RejectionReason) -> Self {
        self.rejection_reason = Some(reason);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.rejection_note = Some(note.into());
        self
    }

    /// Checks the reason/note shape rules.
    ///
    /// A rejection reason only accompanies an `Unsuccessful` decision;
    /// a free-text note only accompanies the `Other` reason, which in
    /// turn requires one.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.rejection_reason.is_some() && self.status != ApplicantStatus::Unsuccessful {
            return Err(DomainError::validation(
                "rejection_reason",
                "Rejection reason is only valid for unsuccessful decisions",
            ));
        }
        match self.rejection_reason {
            Some(RejectionReason::Other) => {
                if self.rejection_note.as_deref().map_or(true, str::is_empty) {
                    return Err(DomainError::validation(
                        "rejection_note",
                        "Rejection reason 'other' requires a note",
                    ));
                }
            }
            _ => {
                if self.rejection_note.is_some() {
                    return Err(DomainError::validation(
                        "rejection_note",
                        "A note is only valid with rejection reason 'other'",
                    ));
                }
            }
        }
        Ok(())
    }
}
