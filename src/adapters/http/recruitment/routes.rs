//! Route configuration for recruitment endpoints.
//!
//! Configures the Axum router with recruitment-related routes.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{
    enroll_applicant, get_current_cycle, list_stages, open_cycle, process_screenings,
    RecruitmentAppState,
};

/// Creates the recruitment router with all endpoints.
///
/// Routes:
/// - `POST /api/cycles` - Open a new recruitment cycle
/// - `GET /api/cycles/current` - Fetch the current cycle
/// - `GET /api/cycles/:id/stages` - List a cycle's stages
/// - `POST /api/applicants` - Enroll the caller into the current cycle
/// - `POST /api/screenings` - Process a batch of screening decisions
pub fn recruitment_router() -> Router<RecruitmentAppState> {
    Router::new()
        .route("/api/cycles", post(open_cycle))
        .route("/api/cycles/current", get(get_current_cycle))
        .route("/api/cycles/:id/stages", get(list_stages))
        .route("/api/applicants", post(enroll_applicant))
        .route("/api/screenings", post(process_screenings))
}
