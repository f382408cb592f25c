//! Screening repository port.
//!
//! A screening round touches four tables at once: the append-only
//! records, the applicants' statuses, the cycle's stage flags, and the
//! next stage's roster. `commit_round` persists all of them in a
//! single transaction so a crashed round never leaves a half-advanced
//! cycle behind.

use std::collections::HashSet;

use crate::domain::cycle::Cycle;
use crate::domain::foundation::{ApplicantId, DomainError, StageId};
use crate::domain::screening::{RoundOutcome, ScreeningRecord};
use async_trait::async_trait;

/// Repository port for screening records and round persistence.
#[async_trait]
pub trait ScreeningRepository: Send + Sync {
    /// IDs of applicants that already have a record for this stage.
    ///
    /// Used to reject duplicate screenings before any write happens.
    async fn screened_applicants(
        &self,
        stage_id: &StageId,
    ) -> Result<HashSet<ApplicantId>, DomainError>;

    /// All records for one stage, in processing order.
    async fn find_by_stage(&self, stage_id: &StageId)
        -> Result<Vec<ScreeningRecord>, DomainError>;

    /// Persist a completed screening round.
    ///
    /// Must, in one transaction: insert every record in the outcome,
    /// update the status of every screened applicant, update the
    /// `is_current` flags of the cycle's stages, and add every
    /// carried-forward applicant to the new current stage's roster.
    ///
    /// # Errors
    ///
    /// - `DuplicateScreening` if a record for an (applicant, stage)
    ///   pair already exists (lost race against a concurrent round)
    /// - `DatabaseError` on persistence failure
    async fn commit_round(&self, cycle: &Cycle, outcome: &RoundOutcome)
        -> Result<(), DomainError>;
}
