//! In-Memory Support Repository Adapter
//!
//! Keeps conversation turns and mood entries per user in process memory.
//! Used when no database is configured, and in tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::support::{ConversationTurn, MoodEntry};
use crate::ports::SupportRepository;

#[derive(Debug, Default)]
struct UserRecords {
    turns: Vec<ConversationTurn>,
    moods: Vec<MoodEntry>,
}

/// In-memory storage for support history
#[derive(Debug, Clone, Default)]
pub struct InMemorySupportRepository {
    users: Arc<RwLock<HashMap<UserId, UserRecords>>>,
}

impl InMemorySupportRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of users with any stored record
    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl SupportRepository for InMemorySupportRepository {
    async fn save_conversation(
        &self,
        user_id: &UserId,
        turn: &ConversationTurn,
    ) -> Result<(), DomainError> {
        self.users
            .write()
            .await
            .entry(user_id.clone())
            .or_default()
            .turns
            .push(turn.clone());
        Ok(())
    }

    async fn load_conversations(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<ConversationTurn>, DomainError> {
        let mut turns = self
            .users
            .read()
            .await
            .get(user_id)
            .map(|r| r.turns.clone())
            .unwrap_or_default();
        turns.sort_by_key(|t| t.time);
        Ok(turns)
    }

    async fn save_mood_entry(&self, user_id: &UserId, entry: &MoodEntry) -> Result<(), DomainError> {
        self.users
            .write()
            .await
            .entry(user_id.clone())
            .or_default()
            .moods
            .push(entry.clone());
        Ok(())
    }

    async fn load_mood_history(&self, user_id: &UserId) -> Result<Vec<MoodEntry>, DomainError> {
        let mut moods = self
            .users
            .read()
            .await
            .get(user_id)
            .map(|r| r.moods.clone())
            .unwrap_or_default();
        moods.sort_by_key(|m| m.time);
        Ok(moods)
    }

    async fn delete_user_data(&self, user_id: &UserId) -> Result<(), DomainError> {
        self.users.write().await.remove(user_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::emotion::Intensity;
    use crate::domain::foundation::Timestamp;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    #[tokio::test]
    async fn turns_load_oldest_first() {
        let repo = InMemorySupportRepository::new();
        let now = Timestamp::now();
        let alice = user("alice");

        repo.save_conversation(&alice, &ConversationTurn::new("second", "b", now.plus_secs(10)))
            .await
            .unwrap();
        repo.save_conversation(&alice, &ConversationTurn::new("first", "a", now))
            .await
            .unwrap();

        let turns = repo.load_conversations(&alice).await.unwrap();
        let messages: Vec<_> = turns.iter().map(|t| t.user_message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn users_are_isolated_and_deletable() {
        let repo = InMemorySupportRepository::new();
        let now = Timestamp::now();
        let (alice, bob) = (user("alice"), user("bob"));

        repo.save_mood_entry(&alice, &MoodEntry::new(Intensity::new(4), "üzgün", now))
            .await
            .unwrap();
        repo.save_mood_entry(&bob, &MoodEntry::new(Intensity::new(2), "mutlu", now))
            .await
            .unwrap();
        assert_eq!(repo.user_count().await, 2);

        repo.delete_user_data(&alice).await.unwrap();

        assert!(repo.load_mood_history(&alice).await.unwrap().is_empty());
        assert_eq!(repo.load_mood_history(&bob).await.unwrap().len(), 1);
        assert!(repo.load_conversations(&user("carol")).await.unwrap().is_empty());
    }
}
