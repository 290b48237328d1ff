//! Support-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, SessionId, ValidationError};

/// Errors returned by support command and query handlers.
///
/// Agent failures are not errors here: they surface as a failed turn outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SupportError {
    /// Session is not known to the registry.
    SessionNotFound(SessionId),
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Persistence or other infrastructure failure.
    Infrastructure(String),
}

impl SupportError {
    pub fn session_not_found(id: SessionId) -> Self {
        SupportError::SessionNotFound(id)
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        SupportError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        SupportError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            SupportError::SessionNotFound(_) => ErrorCode::SessionNotFound,
            SupportError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            SupportError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            SupportError::SessionNotFound(id) => format!("Session not found: {}", id),
            SupportError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            SupportError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for SupportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for SupportError {}

impl From<ValidationError> for SupportError {
    fn from(err: ValidationError) -> Self {
        let field = match &err {
            ValidationError::EmptyField { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. } => field.clone(),
        };
        SupportError::ValidationFailed {
            field,
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for SupportError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => SupportError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => SupportError::Infrastructure(err.to_string()),
        }
    }
}
