//! Access control port for employee-gated operations.
//!
//! Opening a cycle and processing screenings are staff actions; this
//! port defines the contract for checking that the caller is allowed
//! to perform them.
//!
//! # Design
//!
//! The AccessChecker follows a **fail-secure** design: on ANY error,
//! access is denied. Callers without an employee record get nothing.

use crate::domain::foundation::{DomainError, EmployeeId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Port for checking employee access to recruitment operations.
#[async_trait]
pub trait AccessChecker: Send + Sync {
    /// Check if the caller can open a new recruitment cycle.
    async fn can_open_cycle(&self, employee_id: &EmployeeId)
        -> Result<AccessResult, DomainError>;

    /// Check if the caller can process screening decisions.
    async fn can_process_screenings(
        &self,
        employee_id: &EmployeeId,
    ) -> Result<AccessResult, DomainError>;
}

/// Result of an access check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessResult {
    /// Access is granted.
    Allowed,
    /// Access is denied with a specific reason.
    Denied(AccessDeniedReason),
}

impl AccessResult {
    /// Returns true if access is allowed.
    pub fn is_allowed(&self) -> bool {
        matches!(self, AccessResult::Allowed)
    }

    /// Returns true if access is denied.
    pub fn is_denied(&self) -> bool {
        matches!(self, AccessResult::Denied(_))
    }

    /// Converts the result to a Result type, with denied becoming an error.
    pub fn into_result(self) -> Result<(), AccessDeniedReason> {
        match self {
            AccessResult::Allowed => Ok(()),
            AccessResult::Denied(reason) => Err(reason),
        }
    }
}

/// Reason why access was denied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AccessDeniedReason {
    /// Caller has no employee record.
    NotAnEmployee,

    /// Caller is an employee but lacks the required role.
    RoleRequired {
        /// Role required for this operation.
        role: String,
    },
}

impl AccessDeniedReason {
    /// Get a user-facing message for the denial reason.
    pub fn user_message(&self) -> String {
        match self {
            AccessDeniedReason::NotAnEmployee => {
                "An employee account is required for this operation.".to_string()
            }
            AccessDeniedReason::RoleRequired { role } => {
                format!("This operation requires the {} role.", role)
            }
        }
    }
}

impl std::fmt::Display for AccessDeniedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.user_message())
    }
}
