//! Planning module - Multi-step response planning.
//!
//! The planner turns a `PatternAnalysis` plus raw user text into an ordered
//! list of internal instructions for the response generator. Text heuristics
//! are isolated behind `IntentClassifier` so the ordering rules never see a
//! keyword list.

mod builder;
mod classifier;
mod locale;
mod plan;

pub use builder::PlanBuilder;
pub use classifier::{Intent, IntentClassifier, KeywordClassifier};
pub use locale::Locale;
pub use plan::{Plan, PlanStep, PlanStepKind, PLAN_HEADER};
