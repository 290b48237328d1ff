//! Emotion module - Observation history and pattern analysis.
//!
//! # Components
//!
//! - `EmotionObservation` - One timestamped (label, intensity) report
//! - `EmotionHistory` - Append-only per-session sequence of observations
//! - `PatternAnalyzer` - Trend, crisis-risk, and repetition rules over the recent window
//!
//! All types here are pure; persistence of mood entries goes through the
//! `SupportRepository` port.

mod analyzer;
mod history;
mod observation;

pub use analyzer::{
    CrisisRisk, PatternAnalysis, PatternAnalyzer, Recommendation, Trend, DEFAULT_MIN_OBSERVATIONS,
    DEFAULT_WINDOW,
};
pub use history::EmotionHistory;
pub use observation::{
    EmotionObservation, Intensity, DEFAULT_INTENSITY, MAX_INTENSITY, MIN_INTENSITY,
};
