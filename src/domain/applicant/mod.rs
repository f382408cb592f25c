//! Applicant domain - roster entries and the status state machine.

mod applicant;
mod id_number;
mod status;

pub use applicant::Applicant;
pub use id_number::IdNumber;
pub use status::ApplicantStatus;
