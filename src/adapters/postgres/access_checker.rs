//! PostgreSQL implementation of AccessChecker.
//!
//! Staff operations are gated on an employee row existing for the
//! caller. Fail-secure: a query error denies nothing implicitly, it
//! surfaces as an error the handler refuses on.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, EmployeeId, ErrorCode};
use crate::ports::{AccessChecker, AccessDeniedReason, AccessResult};

/// PostgreSQL implementation of AccessChecker.
#[derive(Clone)]
pub struct PostgresAccessChecker {
    pool: PgPool,
}

impl PostgresAccessChecker {
    /// Creates a new PostgresAccessChecker.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn is_employee(&self, employee_id: &EmployeeId) -> Result<bool, DomainError> {
        let row: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM employees WHERE id = $1)")
            .bind(employee_id.as_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to check employee record: {}", e),
                )
            })?;

        Ok(row.0)
    }

    async fn check(&self, employee_id: &EmployeeId) -> Result<AccessResult, DomainError> {
        if self.is_employee(employee_id).await? {
            Ok(AccessResult::Allowed)
        } else {
            Ok(AccessResult::Denied(AccessDeniedReason::NotAnEmployee))
        }
    }
}

#[async_trait]
impl AccessChecker for PostgresAccessChecker {
    async fn can_open_cycle(
        &self,
        employee_id: &EmployeeId,
    ) -> Result<AccessResult, DomainError> {
        self.check(employee_id).await
    }

    async fn can_process_screenings(
        &self,
        employee_id: &EmployeeId,
    ) -> Result<AccessResult, DomainError> {
        self.check(employee_id).await
    }
}
