//! PostgreSQL adapters - Database implementations for repository ports.

mod support_repository;

pub use support_repository::{PostgresSupportRepository, SCHEMA};
