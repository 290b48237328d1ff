//! LLM-backed AgentExecutor.
//!
//! Turns an `AgentInput` into a single chat-completion request: a persona
//! system prompt (with the current time and retrieved context filled in),
//! the prior chat history, and one human message carrying the internal plan
//! guidelines followed by the user's text.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::planning::Locale;
use crate::domain::support::{ChatMessage, ChatRole};
use crate::ports::{
    AIProvider, AgentError, AgentExecutor, AgentInput, AgentOutput, CompletionRequest,
    FinishReason, MessageRole, TurnMetadata,
};

/// Default sampling temperature for supportive replies.
pub const DEFAULT_TEMPERATURE: f32 = 1.0;

/// Agent that answers through an `AIProvider`.
pub struct LlmAgentExecutor {
    ai_provider: Arc<dyn AIProvider>,
    locale: Locale,
    temperature: f32,
    max_tokens: Option<u32>,
}

impl LlmAgentExecutor {
    pub fn new(ai_provider: Arc<dyn AIProvider>, locale: Locale) -> Self {
        Self {
            ai_provider,
            locale,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Persona prompt with time and context interpolated.
    fn system_prompt(&self, current_time: &str, context: &str) -> String {
        format!(
            r#"You are "Sincere Support Assistant", a friendly, sincere, compassionate, and non-judgmental AI companion.
Your goal is to act like a supportive and constructive friend who truly understands people.
**NEVER sound like a tool operator or a mechanical chatbot.**

**PRIMARY DIRECTIVE:**
Understand and validate the user's emotions, and provide immediate support for relief or coping.

**CONVERSATION FLOW RULES (VERY IMPORTANT):**
1. **FIRST, EMPATHIZE AND VALIDATE:** Always begin with a sincere sentence that reflects the user's feelings and shows you understand. Make them feel their emotion is normal and acceptable.
2. **OFFER DIRECT SUPPORTIVE MESSAGE:** After empathy and validation, offer a general message of support or insight.
3. **MAKE A CONCRETE SUGGESTION:** As part of your supportive message, suggest a small, concrete action or activity you think might be helpful.
   * NEVER end your response with a question asking what the user wants to do (e.g., "Do you want to?", "What would you like?").
   * Always end your response with a clear suggestion or a supportive closing statement (e.g., "I think this could be good for you.", "I'm here to continue supporting you with this.").

**CRITICAL FINAL INSTRUCTION: You must ALWAYS respond to the user in {language}.**

Current date and time: {current_time}
Additional context you can use: {context}"#,
            language = self.locale.language_name(),
            current_time = current_time,
            context = context,
        )
    }

    /// Human message carrying the plan as internal guidance.
    fn human_message(plan_instructions: &str, input: &str) -> String {
        format!(
            "Internal Planning Guidelines (DO NOT include this text in your response, use it ONLY as an internal guide):\n{}\n\nUser Message: {}",
            plan_instructions, input
        )
    }

    fn history_role(message: &ChatMessage) -> MessageRole {
        match message.role {
            ChatRole::User => MessageRole::User,
            ChatRole::Assistant => MessageRole::Assistant,
        }
    }

    fn build_request(&self, input: &AgentInput) -> CompletionRequest {
        let turn = TurnMetadata::new(input.user_id.clone(), input.session_id);

        let mut request = CompletionRequest::new(turn)
            .with_system_prompt(self.system_prompt(&input.current_time, &input.context))
            .with_temperature(self.temperature);

        if let Some(max) = self.max_tokens {
            request = request.with_max_tokens(max);
        }

        for message in &input.chat_history {
            request = request.with_message(Self::history_role(message), message.content.clone());
        }

        request.with_message(
            MessageRole::User,
            Self::human_message(&input.plan_instructions, &input.input),
        )
    }
}

#[async_trait]
impl AgentExecutor for LlmAgentExecutor {
    async fn invoke(&self, input: AgentInput) -> Result<AgentOutput, AgentError> {
        let request = self.build_request(&input);
        let trace_id = request.turn.trace_id.clone();

        tracing::debug!(
            trace_id = %trace_id,
            session_id = %input.session_id,
            history_len = input.chat_history.len(),
            model = %self.ai_provider.provider_info().model,
            "Invoking support agent"
        );

        let response = self.ai_provider.complete(request).await?;
        if response.finish_reason == FinishReason::Length {
            tracing::warn!(trace_id = %trace_id, "Support reply hit the token limit");
        }

        let output = response.content.trim();
        if output.is_empty() {
            return Err(AgentError::EmptyOutput);
        }

        tracing::debug!(
            trace_id = %trace_id,
            total_tokens = response.usage.total_tokens,
            "Support agent answered"
        );

        Ok(AgentOutput::new(output))
    }
}
