//! Mock AgentExecutor for tests and offline runs.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use crate::ports::{AgentError, AgentExecutor, AgentInput, AgentOutput};

/// Agent that replays queued outcomes and logs every input it receives.
///
/// With nothing queued it echoes a short acknowledgement of the user text.
#[derive(Debug, Clone, Default)]
pub struct MockAgentExecutor {
    outcomes: Arc<Mutex<VecDeque<Result<String, AgentError>>>>,
    calls: Arc<Mutex<Vec<AgentInput>>>,
}

impl MockAgentExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output(self, output: impl Into<String>) -> Self {
        self.outcomes.lock().unwrap_or_else(PoisonError::into_inner).push_back(Ok(output.into()));
        self
    }

    pub fn with_error(self, error: AgentError) -> Self {
        self.outcomes.lock().unwrap_or_else(PoisonError::into_inner).push_back(Err(error));
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn get_calls(&self) -> Vec<AgentInput> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

#[async_trait]
impl AgentExecutor for MockAgentExecutor {
    async fn invoke(&self, input: AgentInput) -> Result<AgentOutput, AgentError> {
        let default = format!("I hear you: {}", input.input);
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).push(input);

        let next = self.outcomes.lock().unwrap_or_else(PoisonError::into_inner).pop_front();
        next.unwrap_or(Ok(default)).map(AgentOutput::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{SessionId, UserId};

    fn input(text: &str) -> AgentInput {
        AgentInput {
            user_id: UserId::new("u1").unwrap(),
            session_id: SessionId::new(),
            input: text.to_string(),
            plan_instructions: String::new(),
            current_time: String::new(),
            context: String::new(),
            chat_history: Vec::new(),
        }
    }

    #[tokio::test]
    async fn replays_queue_then_echoes() {
        let agent = MockAgentExecutor::new()
            .with_output("first")
            .with_error(AgentError::EmptyOutput);

        assert_eq!(agent.invoke(input("a")).await.unwrap().output, "first");
        assert!(agent.invoke(input("b")).await.is_err());
        assert_eq!(agent.invoke(input("c")).await.unwrap().output, "I hear you: c");
        assert_eq!(agent.call_count(), 3);
        assert_eq!(agent.get_calls()[1].input, "b");
    }
}
