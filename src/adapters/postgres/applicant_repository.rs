//! PostgreSQL implementation of ApplicantRepository.
//!
//! Enrollment allocates the cycle-scoped ID number from a per-cycle
//! counter row. The `UPDATE .. RETURNING` takes a row lock, so two
//! concurrent enrollments in the same cycle serialize on it and never
//! see the same number.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::applicant::{Applicant, ApplicantStatus, IdNumber};
use crate::domain::foundation::{
    ApplicantId, County, CycleId, DomainError, ErrorCode, Gender, PersonalInfo, Religion,
    Timestamp,
};
use crate::ports::{ApplicantRepository, NewEnrollment};

/// PostgreSQL implementation of ApplicantRepository.
#[derive(Clone)]
pub struct PostgresApplicantRepository {
    pool: PgPool,
}

impl PostgresApplicantRepository {
    /// Creates a new PostgresApplicantRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApplicantRepository for PostgresApplicantRepository {
    async fn enroll(&self, enrollment: NewEnrollment) -> Result<Applicant, DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to begin transaction: {}", e),
            )
        })?;

        // Allocate the next number under the counter's row lock
        let counter_row = sqlx::query(
            r#"
            UPDATE applicant_counters
            SET last_number = last_number + 1
            WHERE cycle_id = $1
            RETURNING last_number
            "#,
        )
        .bind(enrollment.cycle_id.as_uuid())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to allocate applicant number: {}", e),
            )
        })?
        .ok_or_else(|| {
            DomainError::inconsistency(format!(
                "Cycle {} has no applicant counter",
                enrollment.cycle_id
            ))
        })?;

        let number: i32 = counter_row.get("last_number");
        let id_number = IdNumber::new(number as u32)?;

        let applicant = Applicant::enroll(
            enrollment.applicant_id,
            enrollment.cycle_id,
            id_number,
            enrollment.personal,
            enrollment.apply_at,
        );

        let insert = sqlx::query(
            r#"
            INSERT INTO applicants (
                cycle_id, id, id_number, status,
                birth_date, gender, religion, county, apply_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(applicant.cycle_id().as_uuid())
        .bind(applicant.id().as_uuid())
        .bind(applicant.id_number().as_u32() as i32)
        .bind(applicant.status().as_str())
        .bind(applicant.personal().birth_date)
        .bind(applicant.personal().gender.as_str())
        .bind(applicant.personal().religion.as_str())
        .bind(applicant.personal().county.as_str())
        .bind(applicant.apply_at().as_datetime())
        .execute(&mut *tx)
        .await;

        if let Err(e) = insert {
            if is_unique_violation(&e) {
                return Err(DomainError::new(
                    ErrorCode::AlreadyEnrolled,
                    format!(
                        "Applicant {} already enrolled in cycle {}",
                        enrollment.applicant_id, enrollment.cycle_id
                    ),
                ));
            }
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert applicant: {}", e),
            ));
        }

        // The handler read the current cycle in its own transaction.
        // Insert the first-stage membership only while that cycle is
        // still current, so an enrollment raced by a new cycle opening
        // rolls back instead of landing in a superseded pipeline.
        let membership = sqlx::query(
            r#"
            INSERT INTO stage_applicants (stage_id, applicant_id)
            SELECT s.id, $2
            FROM stages s
            JOIN cycles c ON c.id = s.cycle_id
            WHERE s.id = $1 AND c.is_current
            "#,
        )
        .bind(enrollment.first_stage_id.as_uuid())
        .bind(enrollment.applicant_id.as_uuid())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert roster membership: {}", e),
            )
        })?;

        if membership.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ConcurrentModification,
                format!(
                    "Cycle {} was superseded while the enrollment was in flight",
                    enrollment.cycle_id
                ),
            ));
        }

        tx.commit().await.map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to commit transaction: {}", e),
            )
        })?;

        Ok(applicant)
    }

    async fn find(
        &self,
        cycle_id: &CycleId,
        applicant_id: &ApplicantId,
    ) -> Result<Option<Applicant>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT cycle_id, id, id_number, status,
                   birth_date, gender, religion, county, apply_at
            FROM applicants
            WHERE cycle_id = $1 AND id = $2
            "#,
        )
        .bind(cycle_id.as_uuid())
        .bind(applicant_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch applicant: {}", e),
            )
        })?;

        row.map(row_to_applicant).transpose()
    }

    async fn find_by_cycle(&self, cycle_id: &CycleId) -> Result<Vec<Applicant>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT cycle_id, id, id_number, status,
                   birth_date, gender, religion, county, apply_at
            FROM applicants
            WHERE cycle_id = $1
            ORDER BY id_number
            "#,
        )
        .bind(cycle_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch applicants: {}", e),
            )
        })?;

        rows.into_iter().map(row_to_applicant).collect()
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Helper Functions
// ════════════════════════════════════════════════════════════════════════════════

fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}

fn row_to_applicant(row: sqlx::postgres::PgRow) -> Result<Applicant, DomainError> {
    let status: String = row.get("status");
    let gender: String = row.get("gender");
    let religion: String = row.get("religion");
    let county: String = row.get("county");
    let id_number: i32 = row.get("id_number");
    let apply_at: chrono::DateTime<chrono::Utc> = row.get("apply_at");

    Ok(Applicant::reconstitute(
        ApplicantId::from_uuid(row.get("id")),
        CycleId::from_uuid(row.get("cycle_id")),
        IdNumber::new(id_number as u32)?,
        ApplicantStatus::parse(&status)?,
        PersonalInfo {
            birth_date: row.get("birth_date"),
            gender: Gender::parse(&gender)?,
            religion: Religion::parse(&religion)?,
            county: County::parse(&county)?,
        },
        Timestamp::from_datetime(apply_at),
    ))
}
