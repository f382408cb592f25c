//! Applicant repository port.
//!
//! Enrollment is the one write path that needs a serialized ID number
//! allocation, so the port owns the whole enrollment transaction rather
//! than exposing a separate counter.

use crate::domain::applicant::Applicant;
use crate::domain::foundation::{ApplicantId, CycleId, DomainError, PersonalInfo, StageId, Timestamp};
use async_trait::async_trait;

/// Everything needed to enroll one applicant into a cycle.
///
/// The ID number is deliberately absent: the adapter allocates it from
/// the cycle's counter inside the enrollment transaction.
#[derive(Debug, Clone)]
pub struct NewEnrollment {
    pub applicant_id: ApplicantId,
    pub cycle_id: CycleId,
    pub first_stage_id: StageId,
    pub personal: PersonalInfo,
    pub apply_at: Timestamp,
}

/// Repository port for applicant persistence.
#[async_trait]
pub trait ApplicantRepository: Send + Sync {
    /// Enroll an applicant into a cycle.
    ///
    /// Must, in one transaction: allocate the next cycle-scoped ID
    /// number under a lock, insert the applicant row with status
    /// `Under review`, and add the applicant to the first stage's
    /// roster. Returns the fully populated applicant.
    ///
    /// # Errors
    ///
    /// - `AlreadyEnrolled` if the applicant already has a row in this cycle
    /// - `DatabaseError` on persistence failure
    async fn enroll(&self, enrollment: NewEnrollment) -> Result<Applicant, DomainError>;

    /// Find one applicant within a cycle. Returns `None` if not enrolled.
    async fn find(
        &self,
        cycle_id: &CycleId,
        applicant_id: &ApplicantId,
    ) -> Result<Option<Applicant>, DomainError>;

    /// All applicants enrolled in a cycle, in enrollment order.
    async fn find_by_cycle(&self, cycle_id: &CycleId) -> Result<Vec<Applicant>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applicant_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn ApplicantRepository) {}
    }
}
