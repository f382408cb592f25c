//! ProcessBatchHandler - Command handler for one screening round.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, EmployeeId, Timestamp};
use crate::domain::screening::{RoundOutcome, ScreeningDecision, ScreeningProcessor};
use crate::ports::{
    AccessChecker, AccessResult, ApplicantRepository, CycleRepository, ScreeningRepository,
};

/// Command to process a batch of screening decisions at the current
/// stage of the current cycle.
#[derive(Debug, Clone)]
pub struct ProcessBatchCommand {
    /// Decisions in submission order, one per applicant.
    pub decisions: Vec<ScreeningDecision>,
    /// Employee performing the screening.
    pub processed_by: EmployeeId,
}

/// Error type for batch processing.
#[derive(Debug, Clone)]
pub enum ProcessBatchError {
    /// No cycle has ever been opened.
    NoCurrentCycle,
    /// Access denied by the employee check.
    AccessDenied(crate::ports::AccessDeniedReason),
    /// Domain error (roster, duplicate, transition, persistence).
    Domain(DomainError),
}

impl std::fmt::Display for ProcessBatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessBatchError::NoCurrentCycle => {
                write!(f, "No current recruitment cycle to screen")
            }
            ProcessBatchError::AccessDenied(reason) => write!(f, "Access denied: {}", reason),
            ProcessBatchError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ProcessBatchError {}

impl From<DomainError> for ProcessBatchError {
    fn from(err: DomainError) -> Self {
        ProcessBatchError::Domain(err)
    }
}

/// Handler for screening rounds.
///
/// Loads the round's working set, runs the domain processor, and hands
/// the outcome to the repository for atomic persistence. Nothing is
/// written unless the entire batch passes.
pub struct ProcessBatchHandler {
    cycle_repository: Arc<dyn CycleRepository>,
    applicant_repository: Arc<dyn ApplicantRepository>,
    screening_repository: Arc<dyn ScreeningRepository>,
    access_checker: Arc<dyn AccessChecker>,
}

impl ProcessBatchHandler {
    pub fn new(
        cycle_repository: Arc<dyn CycleRepository>,
        applicant_repository: Arc<dyn ApplicantRepository>,
        screening_repository: Arc<dyn ScreeningRepository>,
        access_checker: Arc<dyn AccessChecker>,
    ) -> Self {
        Self {
            cycle_repository,
            applicant_repository,
            screening_repository,
            access_checker,
        }
    }

    pub async fn handle(&self, cmd: ProcessBatchCommand) -> Result<RoundOutcome, ProcessBatchError> {
        // 1. Check access (staff operation)
        match self
            .access_checker
            .can_process_screenings(&cmd.processed_by)
            .await?
        {
            AccessResult::Allowed => {}
            AccessResult::Denied(reason) => {
                return Err(ProcessBatchError::AccessDenied(reason));
            }
        }

        // 2. Load the round's working set
        let mut cycle = self
            .cycle_repository
            .find_current()
            .await?
            .ok_or(ProcessBatchError::NoCurrentCycle)?;

        let stage_id = cycle.current_stage()?.id();
        let already_screened = self
            .screening_repository
            .screened_applicants(&stage_id)
            .await?;
        let mut applicants = self.applicant_repository.find_by_cycle(&cycle.id()).await?;

        // 3. Run the domain processor
        let outcome = ScreeningProcessor::process_batch(
            &mut cycle,
            &mut applicants,
            &already_screened,
            &cmd.decisions,
            cmd.processed_by,
            Timestamp::now(),
        )?;

        // 4. Persist the whole round in one transaction
        self.screening_repository
            .commit_round(&cycle, &outcome)
            .await?;

        Ok(outcome)
    }
}
