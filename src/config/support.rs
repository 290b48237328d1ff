//! Support behavior configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::application::{DEFAULT_IDLE_TTL_SECS, DEFAULT_MAX_SESSIONS};
use crate::domain::emotion::{PatternAnalyzer, DEFAULT_MIN_OBSERVATIONS, DEFAULT_WINDOW};
use crate::domain::planning::Locale;

/// Language and analysis window settings.
#[derive(Debug, Clone, Deserialize)]
pub struct SupportConfig {
    /// Language of keywords, plan steps, and fallback text (`tr` or `en`)
    #[serde(default)]
    pub locale: Locale,

    /// Observations considered by the pattern analyzer
    #[serde(default = "default_history_window")]
    pub history_window: usize,

    /// Observations needed before trend and pattern rules apply
    #[serde(default = "default_min_observations")]
    pub min_observations: usize,

    /// Seconds without a turn before a live session is evicted
    #[serde(default = "default_session_idle_ttl")]
    pub session_idle_ttl_secs: u64,

    /// Upper bound on sessions kept in memory
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

impl SupportConfig {
    pub fn analyzer(&self) -> PatternAnalyzer {
        PatternAnalyzer::new(self.history_window, self.min_observations)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.min_observations < DEFAULT_MIN_OBSERVATIONS
            || self.history_window < self.min_observations
        {
            return Err(ValidationError::InvalidAnalysisWindow);
        }
        if self.session_idle_ttl_secs == 0 || self.max_sessions == 0 {
            return Err(ValidationError::InvalidSessionLimits);
        }
        Ok(())
    }
}

impl Default for SupportConfig {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            history_window: default_history_window(),
            min_observations: default_min_observations(),
            session_idle_ttl_secs: default_session_idle_ttl(),
            max_sessions: default_max_sessions(),
        }
    }
}

fn default_history_window() -> usize {
    DEFAULT_WINDOW
}

fn default_min_observations() -> usize {
    DEFAULT_MIN_OBSERVATIONS
}

fn default_session_idle_ttl() -> u64 {
    DEFAULT_IDLE_TTL_SECS
}

fn default_max_sessions() -> usize {
    DEFAULT_MAX_SESSIONS
}
