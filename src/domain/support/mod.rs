//! Support module - Session state, chat memory, and persisted records.
//!
//! # Components
//!
//! - `SupportSession` - Emotion history and chat memory owned by one session
//! - `ConversationMemory` - Ordered buffer of prior user/assistant messages
//! - `ConversationTurn` / `MoodEntry` - Records written through the repository port
//! - `MoodStatistics` - Aggregates over a user's persisted mood entries
//! - `SupportError` - Errors returned by support handlers

mod errors;
mod memory;
mod records;
mod session;
mod statistics;

pub use errors::SupportError;
pub use memory::{ChatMessage, ChatRole, ConversationMemory};
pub use records::{ConversationTurn, MoodEntry};
pub use session::{ProfileSummary, SupportSession};
pub use statistics::{DailyAverage, EmotionCount, MoodStatistics};
