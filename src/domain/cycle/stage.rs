//! Screening stages and the fixed stage sequence.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{ApplicantId, DomainError, ErrorCode, StageId};

/// The fixed, ordered screening pipeline.
///
/// Every cycle is seeded with exactly these six stages. Sequencing is
/// driven by the numeric `seq` column; the names are descriptive only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageName {
    Publicity,
    CredentialVerification,
    WrittenExams,
    Interview,
    JobReadinessOrientation,
    Placement,
}

impl StageName {
    /// All stages in pipeline order.
    pub fn all() -> &'static [StageName; 6] {
        &[
            StageName::Publicity,
            StageName::CredentialVerification,
            StageName::WrittenExams,
            StageName::Interview,
            StageName::JobReadinessOrientation,
            StageName::Placement,
        ]
    }

    /// 1-based position in the pipeline.
    pub fn seq(&self) -> u32 {
        match self {
            StageName::Publicity => 1,
            StageName::CredentialVerification => 2,
            StageName::WrittenExams => 3,
            StageName::Interview => 4,
            StageName::JobReadinessOrientation => 5,
            StageName::Placement => 6,
        }
    }

    pub fn from_seq(seq: u32) -> Option<StageName> {
        StageName::all().iter().copied().find(|n| n.seq() == seq)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StageName::Publicity => "publicity",
            StageName::CredentialVerification => "credential_verification",
            StageName::WrittenExams => "written_exams",
            StageName::Interview => "interview",
            StageName::JobReadinessOrientation => "job_readiness_orientation",
            StageName::Placement => "placement",
        }
    }

    pub fn parse(s: &str) -> Result<StageName, DomainError> {
        match s {
            "publicity" => Ok(StageName::Publicity),
            "credential_verification" => Ok(StageName::CredentialVerification),
            "written_exams" => Ok(StageName::WrittenExams),
            "interview" => Ok(StageName::Interview),
            "job_readiness_orientation" => Ok(StageName::JobReadinessOrientation),
            "placement" => Ok(StageName::Placement),
            _ => Err(DomainError::new(
                ErrorCode::ValidationFailed,
                format!("Invalid stage name: {}", s),
            )),
        }
    }
}

impl fmt::Display for StageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StageName::Publicity => "Publicity",
            StageName::CredentialVerification => "Credential Verification",
            StageName::WrittenExams => "Written Exams",
            StageName::Interview => "Interview",
            StageName::JobReadinessOrientation => "Job Readiness Orientation",
            StageName::Placement => "Placement",
        };
        write!(f, "{}", s)
    }
}

/// One screening stage of a cycle.
///
/// Membership is the historical roster of applicants who reached this
/// stage. It only ever grows; "still active" is derived from applicant
/// status, never by pruning membership.
#[derive(Debug, Clone)]
pub struct Stage {
    id: StageId,
    name: StageName,
    seq: u32,
    is_current: bool,
    applicants: Vec<ApplicantId>,
}

impl Stage {
    /// Creates a freshly seeded stage with an empty roster.
    pub fn seed(name: StageName, is_current: bool) -> Self {
        Self {
            id: StageId::new(),
            name,
            seq: name.seq(),
            is_current,
            applicants: Vec::new(),
        }
    }

    /// Reconstitutes a stage from persisted data.
    pub fn reconstitute(
        id: StageId,
        name: StageName,
        seq: u32,
        is_current: bool,
        applicants: Vec<ApplicantId>,
    ) -> Self {
        Self {
            id,
            name,
            seq,
            is_current,
            applicants,
        }
    }

    pub fn id(&self) -> StageId {
        self.id
    }

    pub fn name(&self) -> StageName {
        self.name
    }

    pub fn seq(&self) -> u32 {
        self.seq
    }

    pub fn is_current(&self) -> bool {
        self.is_current
    }

    pub fn applicants(&self) -> &[ApplicantId] {
        &self.applicants
    }

    pub fn member_count(&self) -> usize {
        self.applicants.len()
    }

    pub fn contains(&self, applicant: ApplicantId) -> bool {
        self.applicants.contains(&applicant)
    }

    pub(super) fn set_current(&mut self, current: bool) {
        self.is_current = current;
    }

    /// Adds an applicant to the roster. Idempotent.
    pub(super) fn add_applicant(&mut self, applicant: ApplicantId) {
        if !self.contains(applicant) {
            self.applicants.push(applicant);
        }
    }
}
