//! PostgreSQL implementation of CycleRepository.
//!
//! A cycle row plus six stage rows plus roster membership rows form one
//! aggregate; loads always hydrate all of them.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::cycle::{Cycle, Stage, StageName};
use crate::domain::foundation::{ApplicantId, CycleId, DomainError, ErrorCode, StageId};
use crate::ports::CycleRepository;

/// PostgreSQL implementation of CycleRepository.
#[derive(Clone)]
pub struct PostgresCycleRepository {
    pool: PgPool,
}

impl PostgresCycleRepository {
    /// Creates a new PostgresCycleRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CycleRepository for PostgresCycleRepository {
    async fn save(&self, cycle: &Cycle) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to begin transaction: {}", e),
            )
        })?;

        // Demote whichever cycle was current before this one
        sqlx::query("UPDATE cycles SET is_current = FALSE WHERE is_current")
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to demote previous cycle: {}", e),
                )
            })?;

        sqlx::query(
            r#"
            INSERT INTO cycles (id, open_date, close_date, is_current)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(cycle.id().as_uuid())
        .bind(cycle.open_date())
        .bind(cycle.close_date())
        .bind(cycle.is_current())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert cycle: {}", e),
            )
        })?;

        for stage in cycle.stages() {
            sqlx::query(
                r#"
                INSERT INTO stages (id, cycle_id, name, seq, is_current)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(stage.id().as_uuid())
            .bind(cycle.id().as_uuid())
            .bind(stage.name().as_str())
            .bind(stage.seq() as i32)
            .bind(stage.is_current())
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to insert stage: {}", e),
                )
            })?;
        }

        // Seed the ID number counter for this cycle
        sqlx::query("INSERT INTO applicant_counters (cycle_id, last_number) VALUES ($1, 0)")
            .bind(cycle.id().as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to seed applicant counter: {}", e),
                )
            })?;

        tx.commit().await.map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to commit transaction: {}", e),
            )
        })?;

        Ok(())
    }

    async fn find_current(&self) -> Result<Option<Cycle>, DomainError> {
        let row = sqlx::query(
            "SELECT id, open_date, close_date, is_current FROM cycles WHERE is_current LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch current cycle: {}", e),
            )
        })?;

        match row {
            Some(row) => {
                let id = CycleId::from_uuid(row.get("id"));
                let stages = load_stages(&self.pool, &id).await?;
                Ok(Some(row_to_cycle(row, stages)?))
            }
            None => Ok(None),
        }
    }

    async fn find_by_id(&self, id: &CycleId) -> Result<Option<Cycle>, DomainError> {
        let row =
            sqlx::query("SELECT id, open_date, close_date, is_current FROM cycles WHERE id = $1")
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Failed to fetch cycle: {}", e),
                    )
                })?;

        match row {
            Some(row) => {
                let stages = load_stages(&self.pool, id).await?;
                Ok(Some(row_to_cycle(row, stages)?))
            }
            None => Ok(None),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Helper Functions
// ════════════════════════════════════════════════════════════════════════════════

async fn load_stages(pool: &PgPool, cycle_id: &CycleId) -> Result<Vec<Stage>, DomainError> {
    let stage_rows = sqlx::query(
        r#"
        SELECT id, name, seq, is_current
        FROM stages
        WHERE cycle_id = $1
        ORDER BY seq
        "#,
    )
    .bind(cycle_id.as_uuid())
    .fetch_all(pool)
    .await
    .map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to load stages: {}", e),
        )
    })?;

    let member_rows = sqlx::query(
        r#"
        SELECT sa.stage_id, sa.applicant_id
        FROM stage_applicants sa
        JOIN stages s ON s.id = sa.stage_id
        WHERE s.cycle_id = $1
        ORDER BY sa.joined_at
        "#,
    )
    .bind(cycle_id.as_uuid())
    .fetch_all(pool)
    .await
    .map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to load stage rosters: {}", e),
        )
    })?;

    let mut stages = Vec::with_capacity(stage_rows.len());
    for row in stage_rows {
        let stage_id: Uuid = row.get("id");
        let name: String = row.get("name");
        let seq: i32 = row.get("seq");
        let is_current: bool = row.get("is_current");

        let applicants: Vec<ApplicantId> = member_rows
            .iter()
            .filter(|m| m.get::<Uuid, _>("stage_id") == stage_id)
            .map(|m| ApplicantId::from_uuid(m.get("applicant_id")))
            .collect();

        stages.push(Stage::reconstitute(
            StageId::from_uuid(stage_id),
            StageName::parse(&name)?,
            seq as u32,
            is_current,
            applicants,
        ));
    }

    Ok(stages)
}

fn row_to_cycle(row: sqlx::postgres::PgRow, stages: Vec<Stage>) -> Result<Cycle, DomainError> {
    Cycle::reconstitute(
        CycleId::from_uuid(row.get("id")),
        row.get("open_date"),
        row.get("close_date"),
        row.get("is_current"),
        stages,
    )
}
