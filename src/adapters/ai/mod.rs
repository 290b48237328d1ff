//! AI Adapters.
//!
//! ## Available Adapters
//!
//! - `OpenAIProvider` - OpenAI-compatible chat-completions provider
//! - `MockAIProvider` - Configurable provider mock for testing
//! - `LlmAgentExecutor` - Support agent that prompts an `AIProvider`
//! - `MockAgentExecutor` - Agent mock replaying queued outcomes

mod llm_agent;
mod mock_agent;
mod mock_provider;
mod openai_provider;

pub use llm_agent::{LlmAgentExecutor, DEFAULT_TEMPERATURE};
pub use mock_agent::MockAgentExecutor;
pub use mock_provider::{MockAIProvider, MockError, MockResponse};
pub use openai_provider::{OpenAIConfig, OpenAIProvider};
