//! The screening processor - one atomic round of decide-and-advance.
//!
//! A round records one decision per applicant at the current stage,
//! mutates applicant statuses, advances the stage sequencer, and
//! carries surviving applicants into the next stage's roster. The
//! whole round is computed here as one unit and persisted by the
//! repository in a single transaction.

use std::collections::HashSet;

use crate::domain::applicant::Applicant;
use crate::domain::cycle::{Cycle, StageAdvance};
use crate::domain::foundation::{ApplicantId, DomainError, EmployeeId, ErrorCode, Timestamp};

use super::{ScreeningDecision, ScreeningRecord};

/// Everything a completed round produced, ready to persist atomically.
#[derive(Debug, Clone)]
pub struct RoundOutcome {
    /// Records in the caller-supplied decision order.
    pub records: Vec<ScreeningRecord>,
    /// What the sequencer did after the decisions were applied.
    pub transition: StageAdvance,
    /// Applicants added to the new current stage's roster. Empty when
    /// the round closed the cycle.
    pub carried_forward: Vec<ApplicantId>,
}

/// Stateless domain service that runs one screening round.
pub struct ScreeningProcessor;

impl ScreeningProcessor {
    /// Applies a batch of decisions to the cycle's current stage.
    ///
    /// `applicants` is the cycle's full roster (carry-forward spans the
    /// whole cycle); `already_screened` holds the applicants that have
    /// a record at the current stage from an earlier batch.
    ///
    /// Fails fast on the first violation; the caller persists nothing
    /// unless the entire round succeeds.
    pub fn process_batch(
        cycle: &mut Cycle,
        applicants: &mut [Applicant],
        already_screened: &HashSet<ApplicantId>,
        decisions: &[ScreeningDecision],
        processed_by: EmployeeId,
        now: Timestamp,
    ) -> Result<RoundOutcome, DomainError> {
        if decisions.is_empty() {
            return Err(DomainError::validation(
                "decisions",
                "A screening batch must contain at least one decision",
            ));
        }

        let stage = cycle.current_stage()?;
        let stage_id = stage.id();
        let roster: HashSet<ApplicantId> = stage.applicants().iter().copied().collect();

        let mut seen_in_batch: HashSet<ApplicantId> = HashSet::new();
        let mut records = Vec::with_capacity(decisions.len());

        for decision in decisions {
            decision.validate()?;

            if !roster.contains(&decision.applicant_id) {
                return Err(DomainError::new(
                    ErrorCode::NotInRoster,
                    format!(
                        "Applicant {} is not in the current stage roster",
                        decision.applicant_id
                    ),
                )
                .with_detail("applicant_id", decision.applicant_id.to_string()));
            }

            if already_screened.contains(&decision.applicant_id)
                || !seen_in_batch.insert(decision.applicant_id)
            {
                return Err(DomainError::new(
                    ErrorCode::DuplicateScreening,
                    format!(
                        "Applicant {} already screened at this stage",
                        decision.applicant_id
                    ),
                )
                .with_detail("applicant_id", decision.applicant_id.to_string()));
            }

            let applicant = applicants
                .iter_mut()
                .find(|a| a.id() == decision.applicant_id)
                .ok_or_else(|| {
                    // Roster membership without an applicant row means
                    // the storage layer lost an invariant.
                    DomainError::inconsistency(format!(
                        "Applicant {} is in the stage roster but has no roster entry",
                        decision.applicant_id
                    ))
                })?;

            applicant.set_status(decision.status)?;

            records.push(ScreeningRecord::new(
                decision.applicant_id,
                stage_id,
                decision.status,
                decision.rejection_reason,
                decision.rejection_note.clone(),
                processed_by,
                now,
            ));
        }

        let transition = cycle.advance()?;

        let carried_forward = match transition {
            StageAdvance::Advanced { to, .. } => {
                let survivors: Vec<ApplicantId> = applicants
                    .iter()
                    .filter(|a| a.status().carries_forward())
                    .map(Applicant::id)
                    .collect();
                cycle.carry_forward(to, &survivors)?;
                survivors
            }
            StageAdvance::Closed { .. } => Vec::new(),
        };

        Ok(RoundOutcome {
            records,
            transition,
            carried_forward,
        })
    }
}
