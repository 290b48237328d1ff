//! Support handlers - Turn processing, session queries, and user data.

mod process_turn;
mod session_queries;
mod user_data;

pub use process_turn::{EmotionInput, ProcessTurnCommand, ProcessTurnHandler, TurnOutcome};
pub use session_queries::{
    ClearMemoryCommand, ClearMemoryHandler, GetProfileSummaryHandler, GetProfileSummaryQuery,
};
pub use user_data::{
    DeleteUserDataCommand, DeleteUserDataHandler, GetMoodStatisticsHandler,
    GetMoodStatisticsQuery,
};
