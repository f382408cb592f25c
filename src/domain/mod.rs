//! Domain layer - aggregates, value objects, and domain services.
//!
//! Pure business logic with no I/O. Persistence and transport live in
//! the adapters; the contracts between them are the ports.

pub mod applicant;
pub mod cycle;
pub mod foundation;
pub mod screening;
