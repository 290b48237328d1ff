//! PostgreSQL implementation of SupportRepository.
//!
//! Persists conversation turns and mood entries in two tables keyed by the
//! opaque user id.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};

use crate::domain::emotion::Intensity;
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::support::{ConversationTurn, MoodEntry};
use crate::ports::SupportRepository;

/// Tables used by this repository.
pub const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS conversation_turns (
        id BIGSERIAL PRIMARY KEY,
        user_id TEXT NOT NULL,
        user_message TEXT NOT NULL,
        ai_response TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_conversation_turns_user ON conversation_turns (user_id, created_at)",
    r#"
    CREATE TABLE IF NOT EXISTS mood_entries (
        id BIGSERIAL PRIMARY KEY,
        user_id TEXT NOT NULL,
        intensity INTEGER NOT NULL,
        emotion_label TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_mood_entries_user ON mood_entries (user_id, created_at)",
];

fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, e))
}

/// PostgreSQL implementation of SupportRepository.
#[derive(Clone)]
pub struct PostgresSupportRepository {
    pool: PgPool,
}

impl PostgresSupportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the tables and indexes if they do not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), DomainError> {
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| db_error("Failed to create schema", e))?;
        }
        Ok(())
    }
}

#[async_trait]
impl SupportRepository for PostgresSupportRepository {
    async fn save_conversation(
        &self,
        user_id: &UserId,
        turn: &ConversationTurn,
    ) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO conversation_turns (user_id, user_message, ai_response, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(user_id.as_str())
        .bind(&turn.user_message)
        .bind(&turn.ai_response)
        .bind(turn.time.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to insert conversation turn", e))?;

        Ok(())
    }

    async fn load_conversations(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<ConversationTurn>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT user_message, ai_response, created_at
            FROM conversation_turns
            WHERE user_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch conversation turns", e))?;

        rows.into_iter().map(row_to_turn).collect()
    }

    async fn save_mood_entry(&self, user_id: &UserId, entry: &MoodEntry) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO mood_entries (user_id, intensity, emotion_label, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(user_id.as_str())
        .bind(entry.intensity.value())
        .bind(&entry.emotion_label)
        .bind(entry.time.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to insert mood entry", e))?;

        Ok(())
    }

    async fn load_mood_history(&self, user_id: &UserId) -> Result<Vec<MoodEntry>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT intensity, emotion_label, created_at
            FROM mood_entries
            WHERE user_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch mood entries", e))?;

        rows.into_iter().map(row_to_mood).collect()
    }

    async fn delete_user_data(&self, user_id: &UserId) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin transaction", e))?;

        sqlx::query("DELETE FROM conversation_turns WHERE user_id = $1")
            .bind(user_id.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to delete conversation turns", e))?;

        sqlx::query("DELETE FROM mood_entries WHERE user_id = $1")
            .bind(user_id.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to delete mood entries", e))?;

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit user deletion", e))?;

        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn row_to_turn(row: sqlx::postgres::PgRow) -> Result<ConversationTurn, DomainError> {
    let user_message: String = row
        .try_get("user_message")
        .map_err(|e| db_error("Failed to get user_message", e))?;
    let ai_response: String = row
        .try_get("ai_response")
        .map_err(|e| db_error("Failed to get ai_response", e))?;
    let created_at: DateTime<Utc> = row
        .try_get("created_at")
        .map_err(|e| db_error("Failed to get created_at", e))?;

    Ok(ConversationTurn::new(
        user_message,
        ai_response,
        Timestamp::from_datetime(created_at),
    ))
}

fn row_to_mood(row: sqlx::postgres::PgRow) -> Result<MoodEntry, DomainError> {
    let intensity: i32 = row
        .try_get("intensity")
        .map_err(|e| db_error("Failed to get intensity", e))?;
    let emotion_label: String = row
        .try_get("emotion_label")
        .map_err(|e| db_error("Failed to get emotion_label", e))?;
    let created_at: DateTime<Utc> = row
        .try_get("created_at")
        .map_err(|e| db_error("Failed to get created_at", e))?;

    Ok(MoodEntry::new(
        Intensity::new(intensity),
        emotion_label,
        Timestamp::from_datetime(created_at),
    ))
}
