//! Applicant entity - one person under consideration in one cycle.

use crate::domain::foundation::{
    ApplicantId, CycleId, DomainError, ErrorCode, PersonalInfo, Timestamp,
};

use super::{ApplicantStatus, IdNumber};

/// A person enrolled in a recruitment cycle.
///
/// The cycle binding is fixed at enrollment; only `status` mutates
/// afterwards, and only through screening.
#[derive(Debug, Clone)]
pub struct Applicant {
    id: ApplicantId,
    cycle_id: CycleId,
    id_number: IdNumber,
    status: ApplicantStatus,
    personal: PersonalInfo,
    apply_at: Timestamp,
}

impl Applicant {
    /// Creates a new applicant in the `Under review` state.
    pub fn enroll(
        id: ApplicantId,
        cycle_id: CycleId,
        id_number: IdNumber,
        personal: PersonalInfo,
        apply_at: Timestamp,
    ) -> Self {
        Self {
            id,
            cycle_id,
            id_number,
            status: ApplicantStatus::UnderReview,
            personal,
            apply_at,
        }
    }

    /// Reconstitutes an applicant from persisted data.
    pub fn reconstitute(
        id: ApplicantId,
        cycle_id: CycleId,
        id_number: IdNumber,
        status: ApplicantStatus,
        personal: PersonalInfo,
        apply_at: Timestamp,
    ) -> Self {
        Self {
            id,
            cycle_id,
            id_number,
            status,
            personal,
            apply_at,
        }
    }

    pub fn id(&self) -> ApplicantId {
        self.id
    }

    pub fn cycle_id(&self) -> CycleId {
        self.cycle_id
    }

    pub fn id_number(&self) -> IdNumber {
        self.id_number
    }

    pub fn status(&self) -> ApplicantStatus {
        self.status
    }

    pub fn personal(&self) -> &PersonalInfo {
        &self.personal
    }

    pub fn apply_at(&self) -> Timestamp {
        self.apply_at
    }

    /// Applies a screening decision to the status.
    ///
    /// Only the screening processor calls this; transitions obey the
    /// sink rules of [`ApplicantStatus`].
    pub(crate) fn set_status(&mut self, next: ApplicantStatus) -> Result<(), DomainError> {
        if !self.status.can_transition_to(next) {
            return Err(DomainError::new(
                ErrorCode::InvalidStatusTransition,
                format!(
                    "Applicant {} cannot move from {} to {}",
                    self.id, self.status, next
                ),
            ));
        }
        self.status = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{County, Gender, Religion};
    use chrono::NaiveDate;

    fn test_applicant() -> Applicant {
        Applicant::enroll(
            ApplicantId::new(),
            CycleId::new(),
            IdNumber::first(),
            PersonalInfo {
                birth_date: NaiveDate::from_ymd_opt(1999, 4, 2).unwrap(),
                gender: Gender::Male,
                religion: Religion::Muslim,
                county: County::Nimba,
            },
            Timestamp::now(),
        )
    }

    #[test]
    fn new_applicant_starts_under_review() {
        let applicant = test_applicant();
        assert_eq!(applicant.status(), ApplicantStatus::UnderReview);
        assert_eq!(applicant.id_number().to_string(), "001");
    }

    #[test]
    fn screening_decision_updates_status() {
        let mut applicant = test_applicant();
        applicant.set_status(ApplicantStatus::Pending).unwrap();
        assert_eq!(applicant.status(), ApplicantStatus::Pending);
    }

    #[test]
    fn rejected_applicant_cannot_be_revived() {
        let mut applicant = test_applicant();
        applicant.set_status(ApplicantStatus::Unsuccessful).unwrap();

        let err = applicant.set_status(ApplicantStatus::Pending).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStatusTransition);
        assert_eq!(applicant.status(), ApplicantStatus::Unsuccessful);
    }
}
