//! Command and query handlers, grouped by domain.

pub mod applicant;
pub mod cycle;
pub mod screening;
