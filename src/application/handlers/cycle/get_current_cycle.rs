//! GetCurrentCycleHandler - Query handler for the active cycle.

use std::sync::Arc;

use crate::domain::cycle::Cycle;
use crate::domain::foundation::DomainError;
use crate::ports::CycleRepository;

/// Error type for the current-cycle query.
#[derive(Debug, Clone)]
pub enum GetCurrentCycleError {
    /// No cycle has ever been opened.
    NoCurrentCycle,
    /// Domain error.
    Domain(DomainError),
}

impl std::fmt::Display for GetCurrentCycleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GetCurrentCycleError::NoCurrentCycle => write!(f, "No current recruitment cycle"),
            GetCurrentCycleError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for GetCurrentCycleError {}

impl From<DomainError> for GetCurrentCycleError {
    fn from(err: DomainError) -> Self {
        GetCurrentCycleError::Domain(err)
    }
}

/// Handler for fetching the single current cycle.
pub struct GetCurrentCycleHandler {
    cycle_repository: Arc<dyn CycleRepository>,
}

impl GetCurrentCycleHandler {
    pub fn new(cycle_repository: Arc<dyn CycleRepository>) -> Self {
        Self { cycle_repository }
    }

    pub async fn handle(&self) -> Result<Cycle, GetCurrentCycleError> {
        self.cycle_repository
            .find_current()
            .await?
            .ok_or(GetCurrentCycleError::NoCurrentCycle)
    }
}
