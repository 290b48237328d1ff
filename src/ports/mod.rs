//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AgentExecutor` - The response-generating agent invoked once per turn
//! - `AIProvider` - Chat-completion model access used by the LLM agent adapter
//! - `Retriever` - Reference text lookup for retrieval-augmented responses
//! - `SupportRepository` - Persistence of conversation turns and mood entries

mod agent_executor;
mod ai_provider;
mod retriever;
mod support_repository;

pub use agent_executor::{AgentError, AgentExecutor, AgentInput, AgentOutput};
pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo, TokenUsage, TurnMetadata,
};
pub use retriever::{join_context, RetrievalError, RetrievedDocument, Retriever};
pub use support_repository::SupportRepository;
