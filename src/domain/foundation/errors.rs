//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    InvalidDates,
    DuplicateScreening,
    NotInRoster,
    InvalidStatusTransition,
    AlreadyEnrolled,

    // Not found errors
    CycleNotFound,
    StageNotFound,
    ApplicantNotFound,

    // State errors
    CycleClosed,
    ConcurrentModification,

    // Authorization errors
    Forbidden,

    // Integrity errors (fatal, never recovered)
    Inconsistency,

    // Infrastructure errors
    DatabaseError,
    InternalError,
}

impl ErrorCode {
    /// Integrity violations halt the operation rather than guess a repair.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ErrorCode::Inconsistency)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::InvalidDates => "INVALID_DATES",
            ErrorCode::DuplicateScreening => "DUPLICATE_SCREENING",
            ErrorCode::NotInRoster => "NOT_IN_ROSTER",
            ErrorCode::InvalidStatusTransition => "INVALID_STATUS_TRANSITION",
            ErrorCode::AlreadyEnrolled => "ALREADY_ENROLLED",
            ErrorCode::CycleNotFound => "CYCLE_NOT_FOUND",
            ErrorCode::StageNotFound => "STAGE_NOT_FOUND",
            ErrorCode::ApplicantNotFound => "APPLICANT_NOT_FOUND",
            ErrorCode::CycleClosed => "CYCLE_CLOSED",
            ErrorCode::ConcurrentModification => "CONCURRENT_MODIFICATION",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::Inconsistency => "INCONSISTENCY",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a validation error for a specific field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::ValidationFailed,
            message: message.into(),
            details: HashMap::new(),
        }
        .with_detail("field", field.into())
    }

    /// Creates an integrity error. Callers must not recover from these.
    pub fn inconsistency(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Inconsistency, message)
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}
