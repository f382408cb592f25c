//! Cycle aggregate - one recruitment round and its stage pipeline.
//!
//! A Cycle owns its six screening stages and is the single writer of
//! stage `is_current` flags. Stage progression is strictly monotonic by
//! `seq`; exactly one stage is current while the cycle is open, none
//! once it has closed.

use chrono::NaiveDate;

use crate::domain::foundation::{ApplicantId, CycleId, DomainError, ErrorCode, StageId};

use super::{Stage, StageName};

/// Outcome of advancing the stage sequencer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageAdvance {
    /// The pipeline moved to the next stage.
    Advanced { from: StageId, to: StageId },
    /// The last stage was already processed; the round is closed.
    Closed { last: StageId },
}

/// The Cycle aggregate root.
#[derive(Debug, Clone)]
pub struct Cycle {
    id: CycleId,
    open_date: NaiveDate,
    close_date: NaiveDate,
    is_current: bool,
    /// Stages sorted ascending by `seq`.
    stages: Vec<Stage>,
}

impl Cycle {
    /// Opens a new recruitment cycle.
    ///
    /// Seeds the six fixed stages with Publicity current. The caller
    /// (repository) demotes any previously current cycle in the same
    /// transaction that persists this one.
    pub fn open(open_date: NaiveDate, close_date: NaiveDate) -> Result<Self, DomainError> {
        if close_date < open_date {
            return Err(DomainError::new(
                ErrorCode::InvalidDates,
                "close_date must not precede open_date",
            )
            .with_detail("open_date", open_date.to_string())
            .with_detail("close_date", close_date.to_string()));
        }

        let stages = StageName::all()
            .iter()
            .map(|name| Stage::seed(*name, name.seq() == 1))
            .collect();

        Ok(Self {
            id: CycleId::new(),
            open_date,
            close_date,
            is_current: true,
            stages,
        })
    }

    /// Reconstitutes a cycle from persisted rows.
    ///
    /// Validates the structural invariants the storage layer is
    /// supposed to hold; a violation is a fatal inconsistency, not a
    /// recoverable input error.
    pub fn reconstitute(
        id: CycleId,
        open_date: NaiveDate,
        close_date: NaiveDate,
        is_current: bool,
        mut stages: Vec<Stage>,
    ) -> Result<Self, DomainError> {
        stages.sort_by_key(Stage::seq);

        for (i, stage) in stages.iter().enumerate() {
            let expected = i as u32 + 1;
            if stage.seq() != expected {
                return Err(DomainError::inconsistency(format!(
                    "Cycle {} stage sequence corrupt: expected seq {}, found {}",
                    id,
                    expected,
                    stage.seq()
                )));
            }
        }

        let current_count = stages.iter().filter(|s| s.is_current()).count();
        if current_count > 1 {
            return Err(DomainError::inconsistency(format!(
                "Cycle {} has {} current stages",
                id, current_count
            )));
        }

        Ok(Self {
            id,
            open_date,
            close_date,
            is_current,
            stages,
        })
    }

    pub fn id(&self) -> CycleId {
        self.id
    }

    pub fn open_date(&self) -> NaiveDate {
        self.open_date
    }

    pub fn close_date(&self) -> NaiveDate {
        self.close_date
    }

    pub fn is_current(&self) -> bool {
        self.is_current
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn stage(&self, id: StageId) -> Option<&Stage> {
        self.stages.iter().find(|s| s.id() == id)
    }

    /// True once the terminal stage has been processed: stages are
    /// seeded but none is current.
    pub fn is_closed(&self) -> bool {
        !self.stages.is_empty() && !self.stages.iter().any(Stage::is_current)
    }

    /// Returns the stage currently accepting screenings.
    pub fn current_stage(&self) -> Result<&Stage, DomainError> {
        if self.stages.is_empty() {
            return Err(DomainError::new(
                ErrorCode::StageNotFound,
                format!("Cycle {} has no seeded stages", self.id),
            ));
        }
        self.stages
            .iter()
            .find(|s| s.is_current())
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::CycleClosed,
                    format!("Cycle {} has completed all stages", self.id),
                )
            })
    }

    /// Returns the first stage of the pipeline (seq 1).
    pub fn first_stage(&self) -> Result<&Stage, DomainError> {
        self.stages.first().ok_or_else(|| {
            DomainError::new(
                ErrorCode::StageNotFound,
                format!("Cycle {} has no seeded stages", self.id),
            )
        })
    }

    /// Enrolls a new applicant into the roster of the first stage.
    ///
    /// Enrollment is only accepted while the cycle is still running.
    pub fn register_applicant(&mut self, applicant: ApplicantId) -> Result<StageId, DomainError> {
        // Reject once the round is over, even though the roster itself
        // is historical and never pruned.
        self.current_stage()?;

        let first = self.first_stage()?.id();
        let stage = self
            .stages
            .first_mut()
            .expect("first_stage verified stages are non-empty");
        if stage.contains(applicant) {
            return Err(DomainError::new(
                ErrorCode::AlreadyEnrolled,
                format!("Applicant {} already enrolled in cycle {}", applicant, self.id),
            ));
        }
        stage.add_applicant(applicant);
        Ok(first)
    }

    /// Moves the stage pointer to the next stage.
    ///
    /// From the last stage this returns `Closed` and is idempotent:
    /// further calls keep returning `Closed` without creating a new
    /// current stage. A truncated stage list (current stage is the
    /// highest row but its seq is below the pipeline length) is a
    /// fatal inconsistency.
    pub fn advance(&mut self) -> Result<StageAdvance, DomainError> {
        if self.stages.is_empty() {
            return Err(DomainError::new(
                ErrorCode::StageNotFound,
                format!("Cycle {} has no seeded stages", self.id),
            ));
        }

        let Some(idx) = self.stages.iter().position(Stage::is_current) else {
            let last = self.stages.last().expect("stages non-empty").id();
            return Ok(StageAdvance::Closed { last });
        };

        let current_seq = self.stages[idx].seq();
        match self.stages.get(idx + 1) {
            Some(next) => {
                if next.seq() != current_seq + 1 {
                    return Err(DomainError::inconsistency(format!(
                        "Cycle {} missing stage with seq {}",
                        self.id,
                        current_seq + 1
                    )));
                }
                let from = self.stages[idx].id();
                let to = next.id();
                self.stages[idx].set_current(false);
                self.stages[idx + 1].set_current(true);
                Ok(StageAdvance::Advanced { from, to })
            }
            None => {
                if current_seq != StageName::all().len() as u32 {
                    return Err(DomainError::inconsistency(format!(
                        "Cycle {} missing stage with seq {}",
                        self.id,
                        current_seq + 1
                    )));
                }
                let last = self.stages[idx].id();
                self.stages[idx].set_current(false);
                Ok(StageAdvance::Closed { last })
            }
        }
    }

    /// Adds surviving applicants to the roster of the given stage.
    pub fn carry_forward(
        &mut self,
        to: StageId,
        survivors: &[ApplicantId],
    ) -> Result<(), DomainError> {
        let stage = self
            .stages
            .iter_mut()
            .find(|s| s.id() == to)
            .ok_or_else(|| {
                DomainError::new(ErrorCode::StageNotFound, format!("Stage not found: {}", to))
            })?;
        for applicant in survivors {
            stage.add_applicant(*applicant);
        }
        Ok(())
    }
}
