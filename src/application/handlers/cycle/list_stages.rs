//! ListStagesHandler - Query handler for a cycle's stage pipeline.

use std::sync::Arc;

use crate::domain::cycle::Stage;
use crate::domain::foundation::{CycleId, DomainError};
use crate::ports::CycleRepository;

/// Query for the ordered stages of one cycle.
#[derive(Debug, Clone)]
pub struct ListStagesQuery {
    pub cycle_id: CycleId,
}

/// Error type for the stage listing query.
#[derive(Debug, Clone)]
pub enum ListStagesError {
    /// Cycle not found.
    CycleNotFound(CycleId),
    /// Domain error.
    Domain(DomainError),
}

impl std::fmt::Display for ListStagesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListStagesError::CycleNotFound(id) => write!(f, "Cycle not found: {}", id),
            ListStagesError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ListStagesError {}

impl From<DomainError> for ListStagesError {
    fn from(err: DomainError) -> Self {
        ListStagesError::Domain(err)
    }
}

/// Handler for listing a cycle's stages in pipeline order.
pub struct ListStagesHandler {
    cycle_repository: Arc<dyn CycleRepository>,
}

impl ListStagesHandler {
    pub fn new(cycle_repository: Arc<dyn CycleRepository>) -> Self {
        Self { cycle_repository }
    }

    pub async fn handle(&self, query: ListStagesQuery) -> Result<Vec<Stage>, ListStagesError> {
        let cycle = self
            .cycle_repository
            .find_by_id(&query.cycle_id)
            .await?
            .ok_or(ListStagesError::CycleNotFound(query.cycle_id))?;

        Ok(cycle.stages().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cycle::Cycle;
    use async_trait::async_trait;
    use chrono::NaiveDate;

    struct MockCycleRepository {
        cycle: Option<Cycle>,
    }

    #[async_trait]
    impl CycleRepository for MockCycleRepository {
        async fn save(&self, _cycle: &Cycle) -> Result<(), DomainError> {
            Ok(())
        }

        async fn find_current(&self) -> Result<Option<Cycle>, DomainError> {
            Ok(self.cycle.clone())
        }

        async fn find_by_id(&self, id: &CycleId) -> Result<Option<Cycle>, DomainError> {
            Ok(self.cycle.clone().filter(|c| c.id() == *id))
        }
    }

    fn test_cycle() -> Cycle {
        Cycle::open(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn returns_stages_in_pipeline_order() {
        let cycle = test_cycle();
        let cycle_id = cycle.id();
        let handler = ListStagesHandler::new(Arc::new(MockCycleRepository {
            cycle: Some(cycle),
        }));

        let stages = handler.handle(ListStagesQuery { cycle_id }).await.unwrap();

        assert_eq!(stages.len(), 6);
        let seqs: Vec<u32> = stages.iter().map(Stage::seq).collect();
        assert_eq!(seqs, vec![1, 2, 3, 4, 5, 6]);
    }

    #[tokio::test]
    async fn fails_for_unknown_cycle() {
        let handler = ListStagesHandler::new(Arc::new(MockCycleRepository { cycle: None }));

        let result = handler
            .handle(ListStagesQuery {
                cycle_id: CycleId::new(),
            })
            .await;
        assert!(matches!(result, Err(ListStagesError::CycleNotFound(_))));
    }
}
