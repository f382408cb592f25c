//! EnrollApplicantHandler - Command handler for applicant enrollment.

use std::sync::Arc;

use crate::domain::applicant::Applicant;
use crate::domain::foundation::{ApplicantId, DomainError, PersonalInfo, Timestamp};
use crate::ports::{ApplicantRepository, CycleRepository, NewEnrollment};

/// Command to enroll an applicant into the current cycle.
#[derive(Debug, Clone)]
pub struct EnrollApplicantCommand {
    /// Identity of the person applying.
    pub applicant_id: ApplicantId,
    /// Profile captured at enrollment time.
    pub personal: PersonalInfo,
}

/// Error type for enrollment.
#[derive(Debug, Clone)]
pub enum EnrollApplicantError {
    /// No cycle has ever been opened.
    NoCurrentCycle,
    /// Domain error (closed cycle, duplicate enrollment, persistence).
    Domain(DomainError),
}

impl std::fmt::Display for EnrollApplicantError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnrollApplicantError::NoCurrentCycle => {
                write!(f, "No current recruitment cycle to enroll into")
            }
            EnrollApplicantError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for EnrollApplicantError {}

impl From<DomainError> for EnrollApplicantError {
    fn from(err: DomainError) -> Self {
        EnrollApplicantError::Domain(err)
    }
}

/// Handler for enrolling applicants.
///
/// Enrollment targets the current cycle's first stage. The ID number
/// is allocated by the repository inside the enrollment transaction,
/// so two concurrent enrollments never share one.
pub struct EnrollApplicantHandler {
    cycle_repository: Arc<dyn CycleRepository>,
    applicant_repository: Arc<dyn ApplicantRepository>,
}

impl EnrollApplicantHandler {
    pub fn new(
        cycle_repository: Arc<dyn CycleRepository>,
        applicant_repository: Arc<dyn ApplicantRepository>,
    ) -> Self {
        Self {
            cycle_repository,
            applicant_repository,
        }
    }

    pub async fn handle(
        &self,
        cmd: EnrollApplicantCommand,
    ) -> Result<Applicant, EnrollApplicantError> {
        // 1. Load the current cycle
        let mut cycle = self
            .cycle_repository
            .find_current()
            .await?
            .ok_or(EnrollApplicantError::NoCurrentCycle)?;

        // 2. Validate against the aggregate: cycle still running, not
        //    already on the first stage roster
        let first_stage_id = cycle.register_applicant(cmd.applicant_id)?;

        // 3. Persist: ID number allocation, applicant row, and roster
        //    membership happen in one transaction
        let applicant = self
            .applicant_repository
            .enroll(NewEnrollment {
                applicant_id: cmd.applicant_id,
                cycle_id: cycle.id(),
                first_stage_id,
                personal: cmd.personal,
                apply_at: Timestamp::now(),
            })
            .await?;

        Ok(applicant)
    }
}
