//! Applicant command handlers.

mod enroll_applicant;

pub use enroll_applicant::{EnrollApplicantCommand, EnrollApplicantError, EnrollApplicantHandler};
