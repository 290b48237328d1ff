//! Agent Executor Port - The external response generator.
//!
//! The orchestrator hands one bundle of inputs to the agent per turn and
//! expects a single `output` string back. Everything about how the agent
//! produces that output (prompting, tool use, model choice) lives behind
//! this port.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{SessionId, UserId};
use crate::domain::support::ChatMessage;

/// Inputs for one agent invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentInput {
    pub user_id: UserId,
    pub session_id: SessionId,
    /// Raw user text.
    pub input: String,
    /// Rendered plan block (internal guidance, not shown to the user).
    pub plan_instructions: String,
    /// Current time as `YYYY-MM-DD HH:MM:SS`.
    pub current_time: String,
    /// Retrieved reference text, or empty.
    pub context: String,
    /// Prior messages, oldest first.
    pub chat_history: Vec<ChatMessage>,
}

/// Agent result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentOutput {
    pub output: String,
}

impl AgentOutput {
    pub fn new(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
        }
    }
}

/// Port for invoking the response-generating agent.
#[async_trait]
pub trait AgentExecutor: Send + Sync {
    async fn invoke(&self, input: AgentInput) -> Result<AgentOutput, AgentError>;
}

/// Agent invocation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AgentError {
    /// The underlying model provider failed.
    #[error("model provider failed: {0}")]
    Provider(String),

    /// The agent answered with nothing usable.
    #[error("agent returned an empty response")]
    EmptyOutput,

    /// Any other failure inside the agent.
    #[error("agent failed: {0}")]
    Other(String),
}

impl From<super::AIError> for AgentError {
    fn from(err: super::AIError) -> Self {
        AgentError::Provider(err.to_string())
    }
}
