//! HTTP DTOs (Data Transfer Objects) for recruitment endpoints.
//!
//! These types define the JSON request/response structure for the
//! recruitment API. They serve as the boundary between HTTP and the
//! application layer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::applicant::{Applicant, ApplicantStatus};
use crate::domain::cycle::{Cycle, Stage, StageName};
use crate::domain::foundation::{County, Gender, Religion};
use crate::domain::screening::{RejectionReason, RoundOutcome, ScreeningRecord};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to open a new recruitment cycle.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenCycleRequest {
    /// First day applications are accepted (ISO 8601 date).
    pub open_date: NaiveDate,
    /// Last day applications are accepted (ISO 8601 date).
    pub close_date: NaiveDate,
}

/// Request to enroll the calling user into the current cycle.
#[derive(Debug, Clone, Deserialize)]
pub struct EnrollApplicantRequest {
    pub birth_date: NaiveDate,
    pub gender: Gender,
    pub religion: Religion,
    pub county: County,
}

/// One decision inside a screening batch.
#[derive(Debug, Clone, Deserialize)]
pub struct ScreeningDecisionRequest {
    /// Applicant the decision applies to.
    pub applicant_id: String,
    /// Resulting status.
    pub status: ApplicantStatus,
    /// Required when status is `unsuccessful` and a reason was given.
    #[serde(default)]
    pub rejection_reason: Option<RejectionReason>,
    /// Free-text note, only with reason `other`.
    #[serde(default)]
    pub rejection_note: Option<String>,
}

/// Request to process a batch of screening decisions.
#[derive(Debug, Clone, Deserialize)]
pub struct ScreeningBatchRequest {
    pub decisions: Vec<ScreeningDecisionRequest>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Response for cycle details.
#[derive(Debug, Clone, Serialize)]
pub struct CycleResponse {
    /// Cycle ID.
    pub id: String,
    /// First day of the application window (ISO 8601 date).
    pub open_date: String,
    /// Last day of the application window (ISO 8601 date).
    pub close_date: String,
    /// Whether this is the current cycle.
    pub is_current: bool,
    /// Whether all stages have been processed.
    pub is_closed: bool,
    /// The stage currently accepting screenings, if any.
    pub current_stage: Option<StageResponse>,
}

impl From<&Cycle> for CycleResponse {
    fn from(cycle: &Cycle) -> Self {
        Self {
            id: cycle.id().to_string(),
            open_date: cycle.open_date().to_string(),
            close_date: cycle.close_date().to_string(),
            is_current: cycle.is_current(),
            is_closed: cycle.is_closed(),
            current_stage: cycle.current_stage().ok().map(StageResponse::from),
        }
    }
}

/// One stage of a cycle's pipeline.
#[derive(Debug, Clone, Serialize)]
pub struct StageResponse {
    /// Stage ID.
    pub id: String,
    /// Machine-readable stage name.
    pub name: StageName,
    /// Human-readable stage title.
    pub title: String,
    /// 1-based position in the pipeline.
    pub seq: u32,
    /// Whether this stage is currently accepting screenings.
    pub is_current: bool,
    /// Number of applicants who reached this stage.
    pub applicant_count: usize,
}

impl From<&Stage> for StageResponse {
    fn from(stage: &Stage) -> Self {
        Self {
            id: stage.id().to_string(),
            name: stage.name(),
            title: stage.name().to_string(),
            seq: stage.seq(),
            is_current: stage.is_current(),
            applicant_count: stage.member_count(),
        }
    }
}

/// Response for an enrolled applicant.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicantResponse {
    /// Applicant (user) ID.
    pub id: String,
    /// Cycle the applicant is enrolled in.
    pub cycle_id: String,
    /// Cycle-scoped number, zero-padded ("001").
    pub id_number: String,
    /// Current screening status.
    pub status: ApplicantStatus,
    pub birth_date: String,
    pub gender: Gender,
    pub religion: Religion,
    pub county: County,
    /// When the application was submitted (ISO 8601).
    pub apply_at: String,
}

impl From<&Applicant> for ApplicantResponse {
    fn from(applicant: &Applicant) -> Self {
        Self {
            id: applicant.id().to_string(),
            cycle_id: applicant.cycle_id().to_string(),
            id_number: applicant.id_number().to_string(),
            status: applicant.status(),
            birth_date: applicant.personal().birth_date.to_string(),
            gender: applicant.personal().gender,
            religion: applicant.personal().religion,
            county: applicant.personal().county,
            apply_at: applicant.apply_at().as_datetime().to_rfc3339(),
        }
    }
}

/// One recorded screening decision.
#[derive(Debug, Clone, Serialize)]
pub struct ScreeningRecordResponse {
    pub id: String,
    pub applicant_id: String,
    pub stage_id: String,
    pub status: ApplicantStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<RejectionReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_note: Option<String>,
    pub process_at: String,
}

impl From<&ScreeningRecord> for ScreeningRecordResponse {
    fn from(record: &ScreeningRecord) -> Self {
        Self {
            id: record.id().to_string(),
            applicant_id: record.applicant_id().to_string(),
            stage_id: record.stage_id().to_string(),
            status: record.status(),
            rejection_reason: record.rejection_reason(),
            rejection_note: record.rejection_note().map(str::to_owned),
            process_at: record.process_at().as_datetime().to_rfc3339(),
        }
    }
}

/// Response for a processed screening round.
#[derive(Debug, Clone, Serialize)]
pub struct ScreeningRoundResponse {
    /// Records written this round, in submission order.
    pub records: Vec<ScreeningRecordResponse>,
    /// Whether this round closed the cycle.
    pub cycle_closed: bool,
    /// The stage that became current, if the pipeline advanced.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_stage_id: Option<String>,
    /// Applicants carried into the next stage's roster.
    pub carried_forward: Vec<String>,
}

impl From<&RoundOutcome> for ScreeningRoundResponse {
    fn from(outcome: &RoundOutcome) -> Self {
        use crate::domain::cycle::StageAdvance;

        let (cycle_closed, next_stage_id) = match outcome.transition {
            StageAdvance::Advanced { to, .. } => (false, Some(to.to_string())),
            StageAdvance::Closed { .. } => (true, None),
        };

        Self {
            records: outcome.records.iter().map(ScreeningRecordResponse::from).collect(),
            cycle_closed,
            next_stage_id,
            carried_forward: outcome
                .carried_forward
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

/// Standard error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional error details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            code: "NOT_FOUND".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            code: "UNAUTHORIZED".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            code: "CONFLICT".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self {
            code: "FORBIDDEN".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
            details: None,
        }
    }
}
