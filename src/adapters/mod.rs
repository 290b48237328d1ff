//! Adapters - Implementations of port interfaces.
//!
//! - `ai` - Chat-completions providers and the agent executor built on them
//! - `http` - Axum routes for the support API
//! - `postgres` - PostgreSQL persistence of turns and mood entries
//! - `retrieval` - Reference-document chunking and keyword retrieval
//! - `storage` - In-memory persistence for development and tests

pub mod ai;
pub mod http;
pub mod postgres;
pub mod retrieval;
pub mod storage;
