//! Support Repository Port - Persistence of conversation turns and mood entries.
//!
//! Records are keyed by an opaque `UserId`. Load operations return records
//! ordered by time, oldest first.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::support::{ConversationTurn, MoodEntry};

/// Port for persisting a user's support history.
#[async_trait]
pub trait SupportRepository: Send + Sync {
    /// Saves one conversation turn.
    async fn save_conversation(
        &self,
        user_id: &UserId,
        turn: &ConversationTurn,
    ) -> Result<(), DomainError>;

    /// Loads all conversation turns, oldest first.
    async fn load_conversations(&self, user_id: &UserId)
        -> Result<Vec<ConversationTurn>, DomainError>;

    /// Saves one mood entry.
    async fn save_mood_entry(&self, user_id: &UserId, entry: &MoodEntry) -> Result<(), DomainError>;

    /// Loads all mood entries, oldest first.
    async fn load_mood_history(&self, user_id: &UserId) -> Result<Vec<MoodEntry>, DomainError>;

    /// Deletes every turn and mood entry of the user.
    async fn delete_user_data(&self, user_id: &UserId) -> Result<(), DomainError>;
}
