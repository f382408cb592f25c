//! PostgreSQL implementation of ScreeningRepository.
//!
//! `commit_round` writes the records, the status changes, the stage
//! flag flip, and the next stage's roster in one transaction. The
//! UNIQUE (applicant_id, stage_id) constraint backstops the duplicate
//! check against concurrent rounds, and the stage demotion is guarded
//! so a round computed on a stale aggregate cannot drag the stage
//! pointer backwards.

use std::collections::HashSet;

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::applicant::ApplicantStatus;
use crate::domain::cycle::{Cycle, StageAdvance};
use crate::domain::foundation::{
    ApplicantId, DomainError, EmployeeId, ErrorCode, ScreeningId, StageId, Timestamp,
};
use crate::domain::screening::{RejectionReason, RoundOutcome, ScreeningRecord};
use crate::ports::ScreeningRepository;

/// PostgreSQL implementation of ScreeningRepository.
#[derive(Clone)]
pub struct PostgresScreeningRepository {
    pool: PgPool,
}

impl PostgresScreeningRepository {
    /// Creates a new PostgresScreeningRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScreeningRepository for PostgresScreeningRepository {
    async fn screened_applicants(
        &self,
        stage_id: &StageId,
    ) -> Result<HashSet<ApplicantId>, DomainError> {
        let rows = sqlx::query("SELECT applicant_id FROM screenings WHERE stage_id = $1")
            .bind(stage_id.as_uuid())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to fetch screened applicants: {}", e),
                )
            })?;

        Ok(rows
            .into_iter()
            .map(|row| ApplicantId::from_uuid(row.get("applicant_id")))
            .collect())
    }

    async fn find_by_stage(
        &self,
        stage_id: &StageId,
    ) -> Result<Vec<ScreeningRecord>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, applicant_id, stage_id, status,
                   rejection_reason, rejection_note, process_by, process_at
            FROM screenings
            WHERE stage_id = $1
            ORDER BY process_at, id
            "#,
        )
        .bind(stage_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch screenings: {}", e),
            )
        })?;

        rows.into_iter().map(row_to_record).collect()
    }

    async fn commit_round(
        &self,
        cycle: &Cycle,
        outcome: &RoundOutcome,
    ) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to begin transaction: {}", e),
            )
        })?;

        // Demote the screened stage only while it is still flagged
        // current. Zero rows means another round advanced the pointer
        // after this one loaded the cycle, so the whole round rolls
        // back instead of regressing the pipeline.
        let screened_stage = match outcome.transition {
            StageAdvance::Advanced { from, .. } => from,
            StageAdvance::Closed { last } => last,
        };
        let demoted =
            sqlx::query("UPDATE stages SET is_current = FALSE WHERE id = $1 AND is_current")
                .bind(screened_stage.as_uuid())
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Failed to demote stage: {}", e),
                    )
                })?;

        if demoted.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ConcurrentModification,
                format!(
                    "Stage {} is no longer current; a concurrent round advanced the cycle",
                    screened_stage
                ),
            ));
        }

        for record in &outcome.records {
            let insert = sqlx::query(
                r#"
                INSERT INTO screenings (
                    id, applicant_id, stage_id, status,
                    rejection_reason, rejection_note, process_by, process_at
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(record.id().as_uuid())
            .bind(record.applicant_id().as_uuid())
            .bind(record.stage_id().as_uuid())
            .bind(record.status().as_str())
            .bind(record.rejection_reason().map(|r| r.as_str()))
            .bind(record.rejection_note())
            .bind(record.process_by().as_uuid())
            .bind(record.process_at().as_datetime())
            .execute(&mut *tx)
            .await;

            if let Err(e) = insert {
                if is_unique_violation(&e) {
                    return Err(DomainError::new(
                        ErrorCode::DuplicateScreening,
                        format!(
                            "Applicant {} already screened at stage {}",
                            record.applicant_id(),
                            record.stage_id()
                        ),
                    ));
                }
                return Err(DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to insert screening record: {}", e),
                ));
            }

            sqlx::query("UPDATE applicants SET status = $3 WHERE cycle_id = $1 AND id = $2")
                .bind(cycle.id().as_uuid())
                .bind(record.applicant_id().as_uuid())
                .bind(record.status().as_str())
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Failed to update applicant status: {}", e),
                    )
                })?;
        }

        if let StageAdvance::Advanced { to, .. } = outcome.transition {
            sqlx::query("UPDATE stages SET is_current = TRUE WHERE id = $1")
                .bind(to.as_uuid())
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Failed to promote stage: {}", e),
                    )
                })?;

            for applicant in &outcome.carried_forward {
                sqlx::query(
                    r#"
                    INSERT INTO stage_applicants (stage_id, applicant_id)
                    VALUES ($1, $2)
                    ON CONFLICT DO NOTHING
                    "#,
                )
                .bind(to.as_uuid())
                .bind(applicant.as_uuid())
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Failed to insert roster membership: {}", e),
                    )
                })?;
            }
        }

        tx.commit().await.map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to commit transaction: {}", e),
            )
        })?;

        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Helper Functions
// ════════════════════════════════════════════════════════════════════════════════

fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}

fn row_to_record(row: sqlx::postgres::PgRow) -> Result<ScreeningRecord, DomainError> {
    let status: String = row.get("status");
    let rejection_reason: Option<String> = row.get("rejection_reason");
    let process_at: chrono::DateTime<chrono::Utc> = row.get("process_at");

    Ok(ScreeningRecord::reconstitute(
        ScreeningId::from_uuid(row.get("id")),
        ApplicantId::from_uuid(row.get("applicant_id")),
        StageId::from_uuid(row.get("stage_id")),
        ApplicantStatus::parse(&status)?,
        rejection_reason
            .as_deref()
            .map(RejectionReason::parse)
            .transpose()?,
        row.get("rejection_note"),
        EmployeeId::from_uuid(row.get("process_by")),
        Timestamp::from_datetime(process_at),
    ))
}
