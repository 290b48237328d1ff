//! HTTP handlers for support endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::handlers::support::{
    ClearMemoryCommand, ClearMemoryHandler, DeleteUserDataCommand, DeleteUserDataHandler,
    EmotionInput, GetMoodStatisticsHandler, GetMoodStatisticsQuery, GetProfileSummaryHandler,
    GetProfileSummaryQuery, ProcessTurnCommand, ProcessTurnHandler,
};
use crate::application::SessionRegistry;
use crate::config::SupportConfig;
use crate::domain::emotion::Intensity;
use crate::domain::foundation::{SessionId, Timestamp, UserId};
use crate::domain::planning::PlanBuilder;
use crate::domain::support::SupportError;
use crate::ports::{AgentExecutor, Retriever, SupportRepository};

use super::dto::{ErrorResponse, HealthResponse, SubmitTurnRequest, TurnResponse, UserQuery};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct SupportAppState {
    process_turn: Arc<ProcessTurnHandler>,
    profile: Arc<GetProfileSummaryHandler>,
    clear_memory: Arc<ClearMemoryHandler>,
    mood_statistics: Arc<GetMoodStatisticsHandler>,
    delete_user_data: Arc<DeleteUserDataHandler>,
    registry: Option<Arc<SessionRegistry>>,
}

impl SupportAppState {
    pub fn new(
        process_turn: Arc<ProcessTurnHandler>,
        profile: Arc<GetProfileSummaryHandler>,
        clear_memory: Arc<ClearMemoryHandler>,
        mood_statistics: Arc<GetMoodStatisticsHandler>,
        delete_user_data: Arc<DeleteUserDataHandler>,
    ) -> Self {
        Self {
            process_turn,
            profile,
            clear_memory,
            mood_statistics,
            delete_user_data,
            registry: None,
        }
    }

    /// Shared registry when built by `assemble`.
    pub fn registry(&self) -> Option<Arc<SessionRegistry>> {
        self.registry.clone()
    }

    /// Wire every handler around one shared session registry.
    pub fn assemble(
        support: &SupportConfig,
        agent: Arc<dyn AgentExecutor>,
        retriever: Option<Arc<dyn Retriever>>,
        repository: Option<Arc<dyn SupportRepository>>,
    ) -> Self {
        let registry = Arc::new(
            SessionRegistry::new(support.locale, repository.clone())
                .with_limits(support.session_idle_ttl_secs, support.max_sessions),
        );
        let process_turn = ProcessTurnHandler::new(
            registry.clone(),
            support.analyzer(),
            PlanBuilder::for_locale(support.locale),
            agent,
        )
        .with_retriever(retriever)
        .with_repository(repository.clone());

        let mut state = Self::new(
            Arc::new(process_turn),
            Arc::new(GetProfileSummaryHandler::new(registry.clone())),
            Arc::new(ClearMemoryHandler::new(registry.clone())),
            Arc::new(GetMoodStatisticsHandler::new(repository.clone())),
            Arc::new(DeleteUserDataHandler::new(registry.clone(), repository)),
        );
        state.registry = Some(registry);
        state
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/support/sessions/:session_id/turns - Process one user message
pub async fn submit_turn(
    State(state): State<SupportAppState>,
    Path(session_id): Path<String>,
    Json(req): Json<SubmitTurnRequest>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let user_id = match UserId::new(req.user_id.clone()) {
        Ok(id) => id,
        Err(e) => return handle_support_error(e.into()),
    };

    let emotion = if req.has_emotion_data() {
        let intensity = match req.intensity.map(Intensity::validated).transpose() {
            Ok(intensity) => intensity,
            Err(e) => return handle_support_error(e.into()),
        };
        Some(EmotionInput {
            label: req.emotion,
            intensity,
        })
    } else {
        None
    };

    let cmd = ProcessTurnCommand {
        user_id,
        session_id,
        message: req.message,
        emotion,
        now: Timestamp::now(),
    };

    match state.process_turn.handle(cmd).await {
        Ok(outcome) => (StatusCode::OK, Json(TurnResponse::from(outcome))).into_response(),
        Err(e) => handle_support_error(e),
    }
}

/// GET /api/support/sessions/:session_id/profile?user_id= - Session profile summary
pub async fn get_profile(
    State(state): State<SupportAppState>,
    Path(session_id): Path<String>,
    Query(params): Query<UserQuery>,
) -> Response {
    let (user_id, session_id) = match parse_session_key(&params.user_id, &session_id) {
        Ok(key) => key,
        Err(response) => return response,
    };

    let query = GetProfileSummaryQuery {
        user_id,
        session_id,
    };
    match state.profile.handle(query).await {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(e) => handle_support_error(e),
    }
}

/// DELETE /api/support/sessions/:session_id/memory?user_id= - Clear memory and history
pub async fn clear_memory(
    State(state): State<SupportAppState>,
    Path(session_id): Path<String>,
    Query(params): Query<UserQuery>,
) -> Response {
    let (user_id, session_id) = match parse_session_key(&params.user_id, &session_id) {
        Ok(key) => key,
        Err(response) => return response,
    };

    let cmd = ClearMemoryCommand {
        user_id,
        session_id,
    };
    match state.clear_memory.handle(cmd) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handle_support_error(e),
    }
}

/// GET /api/support/users/:user_id/mood - Mood statistics
pub async fn get_mood_statistics(
    State(state): State<SupportAppState>,
    Path(user_id): Path<String>,
) -> Response {
    let user_id = match UserId::new(user_id) {
        Ok(id) => id,
        Err(e) => return handle_support_error(e.into()),
    };

    match state
        .mood_statistics
        .handle(GetMoodStatisticsQuery { user_id })
        .await
    {
        Ok(stats) => (StatusCode::OK, Json(stats)).into_response(),
        Err(e) => handle_support_error(e),
    }
}

/// DELETE /api/support/users/:user_id - Delete all data of a user
pub async fn delete_user_data(
    State(state): State<SupportAppState>,
    Path(user_id): Path<String>,
) -> Response {
    let user_id = match UserId::new(user_id) {
        Ok(id) => id,
        Err(e) => return handle_support_error(e.into()),
    };

    match state
        .delete_user_data
        .handle(DeleteUserDataCommand { user_id })
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handle_support_error(e),
    }
}

/// GET /api/support/health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// ════════════════════════════════════════════════════════════════════════════
// Extraction helpers
// ════════════════════════════════════════════════════════════════════════════

fn parse_session_id(raw: &str) -> Result<SessionId, Response> {
    raw.parse::<SessionId>().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Invalid session ID")),
        )
            .into_response()
    })
}

fn parse_session_key(user_id: &str, session_id: &str) -> Result<(UserId, SessionId), Response> {
    let session_id = parse_session_id(session_id)?;
    let user_id = UserId::new(user_id).map_err(|e| handle_support_error(e.into()))?;
    Ok((user_id, session_id))
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_support_error(error: SupportError) -> Response {
    let status = match &error {
        SupportError::SessionNotFound(_) => StatusCode::NOT_FOUND,
        SupportError::ValidationFailed { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        SupportError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ErrorResponse::from(&error))).into_response()
}
