//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod support;

pub use support::{
    ClearMemoryCommand, ClearMemoryHandler, DeleteUserDataCommand, DeleteUserDataHandler,
    EmotionInput, GetMoodStatisticsHandler, GetMoodStatisticsQuery, GetProfileSummaryHandler,
    GetProfileSummaryQuery, ProcessTurnCommand, ProcessTurnHandler, TurnOutcome,
};
