//! User-scoped handlers over persisted data: mood statistics and deletion.

use std::sync::Arc;

use crate::application::session_registry::SessionRegistry;
use crate::domain::foundation::UserId;
use crate::domain::support::{MoodStatistics, SupportError};
use crate::ports::SupportRepository;

/// Query for a user's mood statistics.
#[derive(Debug, Clone)]
pub struct GetMoodStatisticsQuery {
    pub user_id: UserId,
}

/// Handler for mood statistics. Without a repository the statistics are empty.
pub struct GetMoodStatisticsHandler {
    repository: Option<Arc<dyn SupportRepository>>,
}

impl GetMoodStatisticsHandler {
    pub fn new(repository: Option<Arc<dyn SupportRepository>>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetMoodStatisticsQuery) -> Result<MoodStatistics, SupportError> {
        let Some(repository) = &self.repository else {
            return Ok(MoodStatistics::default());
        };

        let entries = repository.load_mood_history(&query.user_id).await?;
        Ok(MoodStatistics::from_entries(&entries))
    }
}

/// Command to delete everything stored about a user.
#[derive(Debug, Clone)]
pub struct DeleteUserDataCommand {
    pub user_id: UserId,
}

/// Handler for user data deletion. Drops live sessions and persisted records.
pub struct DeleteUserDataHandler {
    registry: Arc<SessionRegistry>,
    repository: Option<Arc<dyn SupportRepository>>,
}

impl DeleteUserDataHandler {
    pub fn new(
        registry: Arc<SessionRegistry>,
        repository: Option<Arc<dyn SupportRepository>>,
    ) -> Self {
        Self { registry, repository }
    }

    pub async fn handle(&self, cmd: DeleteUserDataCommand) -> Result<(), SupportError> {
        let dropped = self.registry.remove_user(&cmd.user_id);

        if let Some(repository) = &self.repository {
            repository.delete_user_data(&cmd.user_id).await?;
        }

        tracing::info!(user_id = %cmd.user_id, dropped_sessions = dropped, "Deleted user data");
        Ok(())
    }
}
