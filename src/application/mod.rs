//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Live session state is owned by the `SessionRegistry`.

pub mod handlers;
pub mod session_registry;

pub use handlers::{
    ClearMemoryCommand, ClearMemoryHandler, DeleteUserDataCommand, DeleteUserDataHandler,
    EmotionInput, GetMoodStatisticsHandler, GetMoodStatisticsQuery, GetProfileSummaryHandler,
    GetProfileSummaryQuery, ProcessTurnCommand, ProcessTurnHandler, TurnOutcome,
};
pub use session_registry::{
    lock_session, SessionHandle, SessionKey, SessionRegistry, DEFAULT_IDLE_TTL_SECS,
    DEFAULT_MAX_SESSIONS,
};
