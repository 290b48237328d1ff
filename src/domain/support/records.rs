//! Records persisted through the `SupportRepository` port.

use serde::{Deserialize, Serialize};

use crate::domain::emotion::{EmotionObservation, Intensity};
use crate::domain::foundation::Timestamp;

/// One completed exchange: the user's message and the assistant's reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub user_message: String,
    pub ai_response: String,
    pub time: Timestamp,
}

impl ConversationTurn {
    pub fn new(
        user_message: impl Into<String>,
        ai_response: impl Into<String>,
        time: Timestamp,
    ) -> Self {
        Self {
            user_message: user_message.into(),
            ai_response: ai_response.into(),
            time,
        }
    }
}

/// One mood point as reported with a turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub intensity: Intensity,
    pub emotion_label: String,
    pub time: Timestamp,
}

impl MoodEntry {
    pub fn new(intensity: Intensity, emotion_label: impl Into<String>, time: Timestamp) -> Self {
        Self {
            intensity,
            emotion_label: emotion_label.into(),
            time,
        }
    }
}

impl From<&EmotionObservation> for MoodEntry {
    fn from(observation: &EmotionObservation) -> Self {
        Self::new(
            observation.intensity(),
            observation.emotion(),
            *observation.timestamp(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mood_entry_copies_observation_fields() {
        let now = Timestamp::now();
        let observation = EmotionObservation::new("Yorgunluk", Intensity::new(4), now);
        let entry = MoodEntry::from(&observation);

        assert_eq!(entry.emotion_label, "Yorgunluk");
        assert_eq!(entry.intensity.value(), 4);
        assert_eq!(entry.time, now);
    }

    #[test]
    fn conversation_turn_serializes_field_names() {
        let turn = ConversationTurn::new("merhaba", "selam", Timestamp::now());
        let json = serde_json::to_value(&turn).unwrap();
        assert_eq!(json["user_message"], "merhaba");
        assert_eq!(json["ai_response"], "selam");
        assert!(json["time"].is_string());
    }
}
