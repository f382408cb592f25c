//! OpenCycleHandler - Command handler for opening a recruitment cycle.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::cycle::Cycle;
use crate::domain::foundation::{DomainError, EmployeeId};
use crate::ports::{AccessChecker, AccessResult, CycleRepository};

/// Command to open a new recruitment cycle.
#[derive(Debug, Clone)]
pub struct OpenCycleCommand {
    /// First day applications are accepted.
    pub open_date: NaiveDate,
    /// Last day applications are accepted.
    pub close_date: NaiveDate,
    /// Employee performing the operation.
    pub requested_by: EmployeeId,
}

/// Error type for cycle opening.
#[derive(Debug, Clone)]
pub enum OpenCycleError {
    /// Access denied by the employee check.
    AccessDenied(crate::ports::AccessDeniedReason),
    /// Domain error.
    Domain(DomainError),
}

impl std::fmt::Display for OpenCycleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OpenCycleError::AccessDenied(reason) => write!(f, "Access denied: {}", reason),
            OpenCycleError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for OpenCycleError {}

impl From<DomainError> for OpenCycleError {
    fn from(err: DomainError) -> Self {
        OpenCycleError::Domain(err)
    }
}

/// Handler for opening cycles.
///
/// Opening a cycle demotes the previously current one; the repository
/// performs the swap in one transaction.
pub struct OpenCycleHandler {
    cycle_repository: Arc<dyn CycleRepository>,
    access_checker: Arc<dyn AccessChecker>,
}

impl OpenCycleHandler {
    pub fn new(
        cycle_repository: Arc<dyn CycleRepository>,
        access_checker: Arc<dyn AccessChecker>,
    ) -> Self {
        Self {
            cycle_repository,
            access_checker,
        }
    }

    pub async fn handle(&self, cmd: OpenCycleCommand) -> Result<Cycle, OpenCycleError> {
        // 1. Check access (staff operation)
        match self
            .access_checker
            .can_open_cycle(&cmd.requested_by)
            .await?
        {
            AccessResult::Allowed => {}
            AccessResult::Denied(reason) => {
                return Err(OpenCycleError::AccessDenied(reason));
            }
        }

        // 2. Open the aggregate (validates the date window, seeds stages)
        let cycle = Cycle::open(cmd.open_date, cmd.close_date)?;

        // 3. Persist; the repository demotes the old current cycle
        self.cycle_repository.save(&cycle).await?;

        Ok(cycle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{CycleId, ErrorCode};
    use crate::ports::AccessDeniedReason;
    use async_trait::async_trait;
    use std::sync::Mutex;

    // ─────────────────────────────────────────────────────────────────────
    // Mock implementations
    // ─────────────────────────────────────────────────────────────────────

    struct MockCycleRepository {
        saved_cycles: Mutex<Vec<Cycle>>,
        fail_save: bool,
    }

    impl MockCycleRepository {
        fn new() -> Self {
            Self {
                saved_cycles: Mutex::new(Vec::new()),
                fail_save: false,
            }
        }

        fn failing() -> Self {
            Self {
                saved_cycles: Mutex::new(Vec::new()),
                fail_save: true,
            }
        }

        fn saved_cycles(&self) -> Vec<Cycle> {
            self.saved_cycles.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CycleRepository for MockCycleRepository {
        async fn save(&self, cycle: &Cycle) -> Result<(), DomainError> {
            if self.fail_save {
                return Err(DomainError::new(
                    ErrorCode::DatabaseError,
                    "Simulated save failure",
                ));
            }
            self.saved_cycles.lock().unwrap().push(cycle.clone());
            Ok(())
        }

        async fn find_current(&self) -> Result<Option<Cycle>, DomainError> {
            Ok(self.saved_cycles.lock().unwrap().last().cloned())
        }

        async fn find_by_id(&self, _id: &CycleId) -> Result<Option<Cycle>, DomainError> {
            Ok(None)
        }
    }

    struct MockAccessChecker {
        result: AccessResult,
    }

    impl MockAccessChecker {
        fn allowed() -> Self {
            Self {
                result: AccessResult::Allowed,
            }
        }

        fn denied(reason: AccessDeniedReason) -> Self {
            Self {
                result: AccessResult::Denied(reason),
            }
        }
    }

    #[async_trait]
    impl AccessChecker for MockAccessChecker {
        async fn can_open_cycle(
            &self,
            _employee_id: &EmployeeId,
        ) -> Result<AccessResult, DomainError> {
            Ok(self.result.clone())
        }

        async fn can_process_screenings(
            &self,
            _employee_id: &EmployeeId,
        ) -> Result<AccessResult, DomainError> {
            Ok(self.result.clone())
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Tests
    // ─────────────────────────────────────────────────────────────────────

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn open_cmd() -> OpenCycleCommand {
        OpenCycleCommand {
            open_date: date(2024, 1, 1),
            close_date: date(2024, 6, 1),
            requested_by: EmployeeId::new(),
        }
    }

    #[tokio::test]
    async fn opens_cycle_with_six_stages() {
        let repo = Arc::new(MockCycleRepository::new());
        let access = Arc::new(MockAccessChecker::allowed());
        let handler = OpenCycleHandler::new(repo.clone(), access);

        let cycle = handler.handle(open_cmd()).await.unwrap();

        assert!(cycle.is_current());
        assert_eq!(cycle.stages().len(), 6);
        assert_eq!(cycle.current_stage().unwrap().seq(), 1);
    }

    #[tokio::test]
    async fn saves_cycle_to_repository() {
        let repo = Arc::new(MockCycleRepository::new());
        let access = Arc::new(MockAccessChecker::allowed());
        let handler = OpenCycleHandler::new(repo.clone(), access);

        let cycle = handler.handle(open_cmd()).await.unwrap();

        let saved = repo.saved_cycles();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].id(), cycle.id());
    }

    #[tokio::test]
    async fn rejects_inverted_date_window() {
        let repo = Arc::new(MockCycleRepository::new());
        let access = Arc::new(MockAccessChecker::allowed());
        let handler = OpenCycleHandler::new(repo.clone(), access);

        let cmd = OpenCycleCommand {
            open_date: date(2024, 6, 1),
            close_date: date(2024, 1, 1),
            requested_by: EmployeeId::new(),
        };
        let result = handler.handle(cmd).await;

        assert!(matches!(
            result,
            Err(OpenCycleError::Domain(ref err)) if err.code == ErrorCode::InvalidDates
        ));
        assert!(repo.saved_cycles().is_empty());
    }

    #[tokio::test]
    async fn fails_when_access_denied() {
        let repo = Arc::new(MockCycleRepository::new());
        let access = Arc::new(MockAccessChecker::denied(AccessDeniedReason::NotAnEmployee));
        let handler = OpenCycleHandler::new(repo.clone(), access);

        let result = handler.handle(open_cmd()).await;

        assert!(matches!(
            result,
            Err(OpenCycleError::AccessDenied(AccessDeniedReason::NotAnEmployee))
        ));
        assert!(repo.saved_cycles().is_empty());
    }

    #[tokio::test]
    async fn propagates_save_failure() {
        let repo = Arc::new(MockCycleRepository::failing());
        let access = Arc::new(MockAccessChecker::allowed());
        let handler = OpenCycleHandler::new(repo, access);

        let result = handler.handle(open_cmd()).await;

        assert!(matches!(
            result,
            Err(OpenCycleError::Domain(ref err)) if err.code == ErrorCode::DatabaseError
        ));
    }
}
