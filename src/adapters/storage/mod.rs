//! Storage Adapters
//!
//! - **InMemorySupportRepository** - Turns and mood entries kept in process memory

mod in_memory_support_repository;

pub use in_memory_support_repository::InMemorySupportRepository;
