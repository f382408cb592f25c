//! Append-only audit records of screening decisions.

use crate::domain::applicant::ApplicantStatus;
use crate::domain::foundation::{ApplicantId, EmployeeId, ScreeningId, StageId, Timestamp};

use super::RejectionReason;

/// One screening decision as recorded: at most one per
/// (applicant, stage) pair, never updated or deleted.
#[derive(Debug, Clone)]
pub struct ScreeningRecord {
    id: ScreeningId,
    applicant_id: ApplicantId,
    stage_id: StageId,
    status: ApplicantStatus,
    rejection_reason: Option<RejectionReason>,
    rejection_note: Option<String>,
    process_by: EmployeeId,
    process_at: Timestamp,
}

impl ScreeningRecord {
    pub fn new(
        applicant_id: ApplicantId,
        stage_id: StageId,
        status: ApplicantStatus,
        rejection_reason: Option<RejectionReason>,
        rejection_note: Option<String>,
        process_by: EmployeeId,
        process_at: Timestamp,
    ) -> Self {
        Self {
            id: ScreeningId::new(),
            applicant_id,
            stage_id,
            status,
            rejection_reason,
            rejection_note,
            process_by,
            process_at,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: ScreeningId,
        applicant_id: ApplicantId,
        stage_id: StageId,
        status: ApplicantStatus,
        rejection_reason: Option<RejectionReason>,
        rejection_note: Option<String>,
        process_by: EmployeeId,
        process_at: Timestamp,
    ) -> Self {
        Self {
            id,
            applicant_id,
            stage_id,
            status,
            rejection_reason,
            rejection_note,
            process_by,
            process_at,
        }
    }

    pub fn id(&self) -> ScreeningId {
        self.id
    }

    pub fn applicant_id(&self) -> ApplicantId {
        self.applicant_id
    }

    pub fn stage_id(&self) -> StageId {
        self.stage_id
    }

    pub fn status(&self) -> ApplicantStatus {
        self.status
    }

    pub fn rejection_reason(&self) -> Option<RejectionReason> {
        self.rejection_reason
    }

    pub fn rejection_note(&self) -> Option<&str> {
        self.rejection_note.as_deref()
    }

    pub fn process_by(&self) -> EmployeeId {
        self.process_by
    }

    pub fn process_at(&self) -> Timestamp {
        self.process_at
    }
}
