//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Repository Ports
//!
//! - `CycleRepository` - Cycle aggregate persistence
//! - `ApplicantRepository` - Applicant enrollment and lookup
//! - `ScreeningRepository` - Screening records and round persistence
//!
//! ## Access Ports
//!
//! - `AccessChecker` - Employee gating for staff operations

mod access_checker;
mod applicant_repository;
mod cycle_repository;
mod screening_repository;

pub use access_checker::{AccessChecker, AccessDeniedReason, AccessResult};
pub use applicant_repository::{ApplicantRepository, NewEnrollment};
pub use cycle_repository::CycleRepository;
pub use screening_repository::ScreeningRepository;
