//! HTTP adapters - REST API implementations.

pub mod support;

pub use support::{support_router, SupportAppState};
