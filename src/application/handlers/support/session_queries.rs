//! Session-scoped handlers: profile summary and memory reset.

use std::sync::Arc;

use crate::application::session_registry::{lock_session, SessionRegistry};
use crate::domain::foundation::{SessionId, UserId};
use crate::domain::support::{ProfileSummary, SupportError};

/// Query for what a session currently remembers.
#[derive(Debug, Clone)]
pub struct GetProfileSummaryQuery {
    pub user_id: UserId,
    pub session_id: SessionId,
}

/// Handler for profile summaries.
///
/// A session that is not live is summarized from a hydrated copy that is
/// not registered, so a returning user sees their persisted conversation
/// count and reads never add sessions.
pub struct GetProfileSummaryHandler {
    registry: Arc<SessionRegistry>,
}

impl GetProfileSummaryHandler {
    pub fn new(registry: Arc<SessionRegistry>) -> Self {
        Self { registry }
    }

    pub async fn handle(&self, query: GetProfileSummaryQuery) -> Result<ProfileSummary, SupportError> {
        if let Some(handle) = self.registry.get(&query.user_id, &query.session_id) {
            return Ok(lock_session(&handle).profile_summary());
        }
        let session = self
            .registry
            .load_session(&query.user_id, &query.session_id)
            .await;
        Ok(session.profile_summary())
    }
}

/// Command to clear a session's chat memory and emotion history.
#[derive(Debug, Clone)]
pub struct ClearMemoryCommand {
    pub user_id: UserId,
    pub session_id: SessionId,
}

/// Handler for memory resets.
pub struct ClearMemoryHandler {
    registry: Arc<SessionRegistry>,
}

impl ClearMemoryHandler {
    pub fn new(registry: Arc<SessionRegistry>) -> Self {
        Self { registry }
    }

    pub fn handle(&self, cmd: ClearMemoryCommand) -> Result<(), SupportError> {
        let handle = self
            .registry
            .get(&cmd.user_id, &cmd.session_id)
            .ok_or_else(|| SupportError::session_not_found(cmd.session_id))?;

        lock_session(&handle).clear_memory();

        tracing::info!(
            user_id = %cmd.user_id,
            session_id = %cmd.session_id,
            "Cleared session memory"
        );
        Ok(())
    }
}
