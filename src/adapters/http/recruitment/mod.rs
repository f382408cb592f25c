//! HTTP adapter for the recruitment API.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::{AuthenticatedUser, RecruitmentApiError, RecruitmentAppState};
pub use routes::recruitment_router;
