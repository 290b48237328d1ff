//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `emotion` - Emotion history and pattern analysis
//! - `planning` - Intent classification and multi-step response planning
//! - `support` - Session state, chat memory, persisted records, mood statistics

pub mod emotion;
pub mod foundation;
pub mod planning;
pub mod support;
