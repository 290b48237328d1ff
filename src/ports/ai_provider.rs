//! Chat-completion port.
//!
//! The LLM agent renders its prompt into a `CompletionRequest` and hands it
//! to whichever vendor adapter is configured. Requests always carry the user
//! and session of the turn they belong to so provider logs can be joined
//! with orchestrator logs.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{SessionId, UserId};

#[async_trait]
pub trait AIProvider: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError>;

    fn provider_info(&self) -> ProviderInfo;
}

/// One completion call: system prompt, ordered messages, sampling options.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub messages: Vec<Message>,
    pub system_prompt: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub turn: TurnMetadata,
}

impl CompletionRequest {
    pub fn new(turn: TurnMetadata) -> Self {
        Self {
            messages: Vec::new(),
            system_prompt: None,
            max_tokens: None,
            temperature: None,
            turn,
        }
    }

    pub fn with_message(mut self, role: MessageRole, content: impl Into<String>) -> Self {
        self.messages.push(Message {
            role,
            content: content.into(),
        });
        self
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl MessageRole {
    /// Wire name used by chat-completions APIs.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

/// Which support turn a completion belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnMetadata {
    pub user_id: UserId,
    pub session_id: SessionId,
    /// Fresh per call, shared by every retry of it.
    pub trace_id: String,
}

impl TurnMetadata {
    pub fn new(user_id: UserId, session_id: SessionId) -> Self {
        Self {
            user_id,
            session_id,
            trace_id: format!("support-turn-{}", uuid::Uuid::new_v4()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CompletionResponse {
    pub content: String,
    pub usage: TokenUsage,
    pub model: String,
    pub finish_reason: FinishReason,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl TokenUsage {
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens.saturating_add(completion_tokens),
        }
    }
}

/// Why generation stopped. A filtered completion surfaces as
/// `AIError::ContentFiltered` instead of a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Stop,
    Length,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderInfo {
    pub name: String,
    pub model: String,
    pub max_context_tokens: u32,
}

impl ProviderInfo {
    pub fn new(name: impl Into<String>, model: impl Into<String>, max_context_tokens: u32) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
            max_context_tokens,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AIError {
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u32 },

    #[error("context too long")]
    ContextTooLong,

    #[error("content filtered: {reason}")]
    ContentFiltered { reason: String },

    #[error("provider unavailable: {message}")]
    Unavailable { message: String },

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("network error: {0}")]
    Network(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u32 },
}

impl AIError {
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    pub fn content_filtered(reason: impl Into<String>) -> Self {
        Self::ContentFiltered {
            reason: reason.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Transient failures worth another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AIError::RateLimited { .. }
                | AIError::Unavailable { .. }
                | AIError::Network(_)
                | AIError::Timeout { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turn() -> TurnMetadata {
        TurnMetadata::new(UserId::new("u1").unwrap(), SessionId::new())
    }

    #[test]
    fn request_builder_keeps_message_order() {
        let request = CompletionRequest::new(turn())
            .with_system_prompt("Be supportive")
            .with_message(MessageRole::User, "Hello")
            .with_message(MessageRole::Assistant, "Hi")
            .with_max_tokens(100)
            .with_temperature(1.0);

        let roles: Vec<_> = request.messages.iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![MessageRole::User, MessageRole::Assistant]);
        assert_eq!(request.system_prompt.as_deref(), Some("Be supportive"));
        assert_eq!(request.max_tokens, Some(100));
        assert_eq!(request.temperature, Some(1.0));
    }

    #[test]
    fn each_turn_gets_its_own_trace_id() {
        let a = turn();
        let b = TurnMetadata::new(a.user_id.clone(), a.session_id);
        assert!(a.trace_id.starts_with("support-turn-"));
        assert_ne!(a.trace_id, b.trace_id);
    }

    #[test]
    fn token_usage_total_saturates() {
        assert_eq!(TokenUsage::new(100, 50).total_tokens, 150);
        assert_eq!(TokenUsage::new(u32::MAX, 1).total_tokens, u32::MAX);
    }

    #[test]
    fn retryable_errors_are_classified() {
        assert!(AIError::rate_limited(30).is_retryable());
        assert!(AIError::network("reset").is_retryable());
        assert!(AIError::Timeout { timeout_secs: 60 }.is_retryable());
        assert!(!AIError::AuthenticationFailed.is_retryable());
        assert!(!AIError::parse("bad json").is_retryable());
    }
}
