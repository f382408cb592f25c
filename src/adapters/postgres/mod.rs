//! PostgreSQL adapters implementing the repository and access ports.

mod access_checker;
mod applicant_repository;
mod cycle_repository;
mod screening_repository;

pub use access_checker::PostgresAccessChecker;
pub use applicant_repository::PostgresApplicantRepository;
pub use cycle_repository::PostgresCycleRepository;
pub use screening_repository::PostgresScreeningRepository;
