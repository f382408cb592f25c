//! HTTP handlers for recruitment endpoints.
//!
//! These handlers connect Axum routes to application layer command and
//! query handlers.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use uuid::Uuid;

use crate::application::handlers::applicant::{
    EnrollApplicantCommand, EnrollApplicantError, EnrollApplicantHandler,
};
use crate::application::handlers::cycle::{
    GetCurrentCycleError, GetCurrentCycleHandler, ListStagesError, ListStagesHandler,
    ListStagesQuery, OpenCycleCommand, OpenCycleError, OpenCycleHandler,
};
use crate::application::handlers::screening::{
    ProcessBatchCommand, ProcessBatchError, ProcessBatchHandler,
};
use crate::domain::foundation::{
    ApplicantId, CycleId, DomainError, EmployeeId, ErrorCode, PersonalInfo,
};
use crate::domain::screening::ScreeningDecision;
use crate::ports::{AccessChecker, ApplicantRepository, CycleRepository, ScreeningRepository};

use super::dto::{
    ApplicantResponse, CycleResponse, EnrollApplicantRequest, ErrorResponse, OpenCycleRequest,
    ScreeningBatchRequest, ScreeningRoundResponse, StageResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
#[derive(Clone)]
pub struct RecruitmentAppState {
    pub cycle_repository: Arc<dyn CycleRepository>,
    pub applicant_repository: Arc<dyn ApplicantRepository>,
    pub screening_repository: Arc<dyn ScreeningRepository>,
    pub access_checker: Arc<dyn AccessChecker>,
}

impl RecruitmentAppState {
    pub fn open_cycle_handler(&self) -> OpenCycleHandler {
        OpenCycleHandler::new(self.cycle_repository.clone(), self.access_checker.clone())
    }

    pub fn get_current_cycle_handler(&self) -> GetCurrentCycleHandler {
        GetCurrentCycleHandler::new(self.cycle_repository.clone())
    }

    pub fn list_stages_handler(&self) -> ListStagesHandler {
        ListStagesHandler::new(self.cycle_repository.clone())
    }

    pub fn enroll_applicant_handler(&self) -> EnrollApplicantHandler {
        EnrollApplicantHandler::new(
            self.cycle_repository.clone(),
            self.applicant_repository.clone(),
        )
    }

    pub fn process_batch_handler(&self) -> ProcessBatchHandler {
        ProcessBatchHandler::new(
            self.cycle_repository.clone(),
            self.applicant_repository.clone(),
            self.screening_repository.clone(),
            self.access_checker.clone(),
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// User Context
// ════════════════════════════════════════════════════════════════════════════════

/// Authenticated user context extracted from the request.
///
/// The gateway in front of this service resolves the session and
/// forwards the stable user ID in the `X-User-Id` header.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
}

impl AuthenticatedUser {
    fn as_applicant(&self) -> ApplicantId {
        ApplicantId::from_uuid(self.user_id)
    }

    fn as_employee(&self) -> EmployeeId {
        EmployeeId::from_uuid(self.user_id)
    }
}

/// Rejection type for AuthenticatedUser extraction.
pub struct AuthenticationRequired;

impl IntoResponse for AuthenticationRequired {
    fn into_response(self) -> axum::response::Response {
        let error = ErrorResponse::unauthorized("Authentication is required");
        (StatusCode::UNAUTHORIZED, Json(error)).into_response()
    }
}

impl<S> axum::extract::FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthenticationRequired;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let user_id = parts
                .headers
                .get("X-User-Id")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| Uuid::parse_str(s).ok())
                .ok_or(AuthenticationRequired)?;

            Ok(AuthenticatedUser { user_id })
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers (POST endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/cycles - Open a new recruitment cycle
pub async fn open_cycle(
    State(state): State<RecruitmentAppState>,
    user: AuthenticatedUser,
    Json(request): Json<OpenCycleRequest>,
) -> Result<impl IntoResponse, RecruitmentApiError> {
    let handler = state.open_cycle_handler();
    let cmd = OpenCycleCommand {
        open_date: request.open_date,
        close_date: request.close_date,
        requested_by: user.as_employee(),
    };

    let cycle = handler.handle(cmd).await?;

    Ok((StatusCode::CREATED, Json(CycleResponse::from(&cycle))))
}

/// POST /api/applicants - Enroll the calling user into the current cycle
pub async fn enroll_applicant(
    State(state): State<RecruitmentAppState>,
    user: AuthenticatedUser,
    Json(request): Json<EnrollApplicantRequest>,
) -> Result<impl IntoResponse, RecruitmentApiError> {
    let handler = state.enroll_applicant_handler();
    let cmd = EnrollApplicantCommand {
        applicant_id: user.as_applicant(),
        personal: PersonalInfo {
            birth_date: request.birth_date,
            gender: request.gender,
            religion: request.religion,
            county: request.county,
        },
    };

    let applicant = handler.handle(cmd).await?;

    Ok((StatusCode::CREATED, Json(ApplicantResponse::from(&applicant))))
}

/// POST /api/screenings - Process a batch of screening decisions
pub async fn process_screenings(
    State(state): State<RecruitmentAppState>,
    user: AuthenticatedUser,
    Json(request): Json<ScreeningBatchRequest>,
) -> Result<impl IntoResponse, RecruitmentApiError> {
    let mut decisions = Vec::with_capacity(request.decisions.len());
    for decision in request.decisions {
        let applicant_id: ApplicantId = decision.applicant_id.parse().map_err(|_| {
            RecruitmentApiError::BadRequest("Invalid applicant ID format".to_string())
        })?;
        let mut d = ScreeningDecision::new(applicant_id, decision.status);
        if let Some(reason) = decision.rejection_reason {
            d = d.with_reason(reason);
        }
        if let Some(note) = decision.rejection_note {
            d = d.with_note(note);
        }
        decisions.push(d);
    }

    let handler = state.process_batch_handler();
    let cmd = ProcessBatchCommand {
        decisions,
        processed_by: user.as_employee(),
    };

    let outcome = handler.handle(cmd).await?;

    Ok((StatusCode::CREATED, Json(ScreeningRoundResponse::from(&outcome))))
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers (GET endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/cycles/current - Fetch the current cycle
pub async fn get_current_cycle(
    State(state): State<RecruitmentAppState>,
) -> Result<impl IntoResponse, RecruitmentApiError> {
    let handler = state.get_current_cycle_handler();
    let cycle = handler.handle().await?;

    Ok((StatusCode::OK, Json(CycleResponse::from(&cycle))))
}

/// GET /api/cycles/:id/stages - List a cycle's stages in pipeline order
pub async fn list_stages(
    State(state): State<RecruitmentAppState>,
    Path(cycle_id): Path<String>,
) -> Result<impl IntoResponse, RecruitmentApiError> {
    let cycle_id: CycleId = cycle_id
        .parse()
        .map_err(|_| RecruitmentApiError::BadRequest("Invalid cycle ID format".to_string()))?;

    let handler = state.list_stages_handler();
    let stages = handler.handle(ListStagesQuery { cycle_id }).await?;

    let response: Vec<StageResponse> = stages.iter().map(StageResponse::from).collect();
    Ok((StatusCode::OK, Json(response)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts domain errors to HTTP responses.
#[derive(Debug)]
pub enum RecruitmentApiError {
    BadRequest(String),
    NotFound(String),
    Forbidden(String),
    Conflict(String),
    Internal(String),
}

/// Maps a domain error to the HTTP error class its code implies.
fn domain_to_api(err: DomainError) -> RecruitmentApiError {
    match err.code {
        ErrorCode::ValidationFailed
        | ErrorCode::InvalidDates
        | ErrorCode::InvalidStatusTransition
        | ErrorCode::NotInRoster
        | ErrorCode::CycleClosed => RecruitmentApiError::BadRequest(err.to_string()),
        ErrorCode::DuplicateScreening
        | ErrorCode::AlreadyEnrolled
        | ErrorCode::ConcurrentModification => RecruitmentApiError::Conflict(err.to_string()),
        ErrorCode::CycleNotFound | ErrorCode::StageNotFound | ErrorCode::ApplicantNotFound => {
            RecruitmentApiError::NotFound(err.to_string())
        }
        ErrorCode::Forbidden => RecruitmentApiError::Forbidden(err.to_string()),
        ErrorCode::Inconsistency | ErrorCode::DatabaseError | ErrorCode::InternalError => {
            RecruitmentApiError::Internal(err.to_string())
        }
    }
}

impl From<OpenCycleError> for RecruitmentApiError {
    fn from(err: OpenCycleError) -> Self {
        match err {
            OpenCycleError::AccessDenied(reason) => {
                RecruitmentApiError::Forbidden(reason.to_string())
            }
            OpenCycleError::Domain(e) => domain_to_api(e),
        }
    }
}

impl From<GetCurrentCycleError> for RecruitmentApiError {
    fn from(err: GetCurrentCycleError) -> Self {
        match err {
            GetCurrentCycleError::NoCurrentCycle => {
                RecruitmentApiError::NotFound("No current recruitment cycle".to_string())
            }
            GetCurrentCycleError::Domain(e) => domain_to_api(e),
        }
    }
}

impl From<ListStagesError> for RecruitmentApiError {
    fn from(err: ListStagesError) -> Self {
        match err {
            ListStagesError::CycleNotFound(id) => {
                RecruitmentApiError::NotFound(format!("Cycle not found: {}", id))
            }
            ListStagesError::Domain(e) => domain_to_api(e),
        }
    }
}

impl From<EnrollApplicantError> for RecruitmentApiError {
    fn from(err: EnrollApplicantError) -> Self {
        match err {
            EnrollApplicantError::NoCurrentCycle => {
                RecruitmentApiError::NotFound("No current recruitment cycle".to_string())
            }
            EnrollApplicantError::Domain(e) => domain_to_api(e),
        }
    }
}

impl From<ProcessBatchError> for RecruitmentApiError {
    fn from(err: ProcessBatchError) -> Self {
        match err {
            ProcessBatchError::NoCurrentCycle => {
                RecruitmentApiError::NotFound("No current recruitment cycle".to_string())
            }
            ProcessBatchError::AccessDenied(reason) => {
                RecruitmentApiError::Forbidden(reason.to_string())
            }
            ProcessBatchError::Domain(e) => domain_to_api(e),
        }
    }
}

impl IntoResponse for RecruitmentApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            RecruitmentApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::bad_request(msg))
            }
            RecruitmentApiError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, ErrorResponse::not_found(msg))
            }
            RecruitmentApiError::Forbidden(msg) => {
                (StatusCode::FORBIDDEN, ErrorResponse::forbidden(msg))
            }
            RecruitmentApiError::Conflict(msg) => {
                (StatusCode::CONFLICT, ErrorResponse::conflict(msg))
            }
            RecruitmentApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error serving recruitment request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::internal("Internal server error"),
                )
            }
        };
        (status, Json(error)).into_response()
    }
}
