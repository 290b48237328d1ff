//! HTTP DTOs for support endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::support::TurnOutcome;
use crate::domain::support::SupportError;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Body of `POST /sessions/:session_id/turns`.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitTurnRequest {
    pub user_id: String,
    pub message: String,
    /// Self-reported emotion label
    #[serde(default)]
    pub emotion: Option<String>,
    /// Self-reported intensity, 1..=5
    #[serde(default)]
    pub intensity: Option<i32>,
}

impl SubmitTurnRequest {
    pub fn has_emotion_data(&self) -> bool {
        self.emotion.is_some() || self.intensity.is_some()
    }
}

/// Query string identifying the session owner.
#[derive(Debug, Clone, Deserialize)]
pub struct UserQuery {
    pub user_id: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Turn result with an explicit `success` flag.
#[derive(Debug, Clone, Serialize)]
pub struct TurnResponse {
    pub success: bool,
    #[serde(flatten)]
    pub outcome: TurnOutcome,
}

impl From<TurnOutcome> for TurnResponse {
    fn from(outcome: TurnOutcome) -> Self {
        Self {
            success: outcome.is_success(),
            outcome,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
        }
    }
}

impl From<&SupportError> for ErrorResponse {
    fn from(error: &SupportError) -> Self {
        Self {
            code: error.code().to_string(),
            message: error.message(),
        }
    }
}
