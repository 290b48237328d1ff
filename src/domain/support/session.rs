//! Per-session support state: emotion history plus chat memory.

use serde::Serialize;

use super::memory::ConversationMemory;
use super::records::ConversationTurn;
use crate::domain::emotion::{
    EmotionHistory, EmotionObservation, Intensity, PatternAnalysis, PatternAnalyzer,
};
use crate::domain::foundation::{SessionId, Timestamp, UserId};
use crate::domain::planning::Locale;

/// Number of observations listed in a profile summary.
const PROFILE_RECENT_EMOTIONS: usize = 3;

/// Snapshot of what a session remembers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileSummary {
    pub total_conversations: usize,
    pub emotion_history_count: usize,
    pub recent_emotions: Vec<EmotionObservation>,
    pub memory_summary: String,
}

/// State owned by one user session.
#[derive(Debug, Clone)]
pub struct SupportSession {
    user_id: UserId,
    session_id: SessionId,
    locale: Locale,
    last_active: Timestamp,
    emotions: EmotionHistory,
    memory: ConversationMemory,
}

impl SupportSession {
    pub fn new(user_id: UserId, session_id: SessionId, locale: Locale) -> Self {
        Self {
            user_id,
            session_id,
            locale,
            last_active: Timestamp::now(),
            emotions: EmotionHistory::new(),
            memory: ConversationMemory::new(),
        }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Time of the last turn, or of creation if none ran yet.
    pub fn last_active(&self) -> Timestamp {
        self.last_active
    }

    pub fn touch(&mut self, now: Timestamp) {
        self.last_active = now;
    }

    pub fn emotions(&self) -> &EmotionHistory {
        &self.emotions
    }

    pub fn memory(&self) -> &ConversationMemory {
        &self.memory
    }

    /// Records an observation and analyzes the recent window.
    pub fn record_and_analyze(
        &mut self,
        emotion: &str,
        intensity: Intensity,
        now: Timestamp,
        analyzer: &PatternAnalyzer,
    ) -> PatternAnalysis {
        analyzer.record_and_analyze(&mut self.emotions, emotion, intensity, now)
    }

    /// Appends a completed exchange to chat memory.
    pub fn remember_exchange(&mut self, user_message: &str, ai_response: &str) {
        self.memory.push_exchange(user_message, ai_response);
    }

    /// Replaces chat memory with persisted turns, oldest first.
    pub fn hydrate(&mut self, turns: &[ConversationTurn]) {
        self.memory.clear();
        let mut ordered: Vec<&ConversationTurn> = turns.iter().collect();
        ordered.sort_by_key(|t| t.time);
        for turn in ordered {
            self.memory.push_exchange(&turn.user_message, &turn.ai_response);
        }
    }

    /// Empties the emotion history only.
    pub fn clear_history(&mut self) {
        self.emotions.clear();
    }

    /// Empties both chat memory and emotion history.
    pub fn clear_memory(&mut self) {
        self.memory.clear();
        self.emotions.clear();
    }

    pub fn profile_summary(&self) -> ProfileSummary {
        ProfileSummary {
            total_conversations: self.memory.exchange_count(),
            emotion_history_count: self.emotions.len(),
            recent_emotions: self.emotions.recent(PROFILE_RECENT_EMOTIONS).to_vec(),
            memory_summary: self.locale.memory_summary(self.memory.len()),
        }
    }
}
