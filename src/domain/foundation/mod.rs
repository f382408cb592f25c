//! Foundation types shared across the domain.
//!
//! Identifier newtypes, the domain error taxonomy, timestamps, and the
//! shared personal-profile value object.

mod errors;
mod ids;
mod personal_info;
mod timestamp;

pub use errors::{DomainError, ErrorCode};
pub use ids::{ApplicantId, CycleId, EmployeeId, ScreeningId, StageId};
pub use personal_info::{County, Gender, PersonalInfo, Religion};
pub use timestamp::Timestamp;
