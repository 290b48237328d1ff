//! Short-term emotional trend and crisis-risk classification.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::history::EmotionHistory;
use super::observation::Intensity;
use crate::domain::foundation::Timestamp;

/// Number of most recent observations the analyzer looks at.
pub const DEFAULT_WINDOW: usize = 5;

/// Observations required before any pattern logic activates.
pub const DEFAULT_MIN_OBSERVATIONS: usize = 3;

/// Number of trailing intensities that decide the trend.
const TREND_SPAN: usize = 3;

/// Repetitions of the current label that count as a pattern.
const PATTERN_REPEAT_THRESHOLD: usize = 3;

/// Coarse three-way classification of the last intensity values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Worsening,
    Improving,
    #[default]
    Stable,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Worsening => write!(f, "worsening"),
            Self::Improving => write!(f, "improving"),
            Self::Stable => write!(f, "stable"),
        }
    }
}

/// Coarse crisis-risk tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrisisRisk {
    #[default]
    Low,
    Medium,
    High,
}

impl fmt::Display for CrisisRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Recommendation tags attached to an analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    ProfessionalHelp,
    PatternIntervention,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProfessionalHelp => write!(f, "professional_help"),
            Self::PatternIntervention => write!(f, "pattern_intervention"),
        }
    }
}

/// Result of one analysis pass. Recomputed on every call, never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternAnalysis {
    pub pattern_detected: bool,
    pub trend: Trend,
    pub recommendations: BTreeSet<Recommendation>,
    pub crisis_risk: CrisisRisk,
}

impl PatternAnalysis {
    /// The low-risk result used when there is not enough history.
    pub fn baseline() -> Self {
        Self::default()
    }

    pub fn recommends(&self, recommendation: Recommendation) -> bool {
        self.recommendations.contains(&recommendation)
    }

    /// Raises crisis risk to `High` after explicit crisis language was seen.
    pub fn escalate_crisis(&mut self) {
        self.crisis_risk = CrisisRisk::High;
        self.recommendations.insert(Recommendation::ProfessionalHelp);
    }
}

/// Rule evaluator over the most recent slice of an [`EmotionHistory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternAnalyzer {
    window: usize,
    min_observations: usize,
}

impl Default for PatternAnalyzer {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            min_observations: DEFAULT_MIN_OBSERVATIONS,
        }
    }
}

impl PatternAnalyzer {
    /// Creates an analyzer with a custom window.
    ///
    /// `min_observations` is raised to the trend span (3) if smaller, since
    /// the trend rule always reads three values.
    pub fn new(window: usize, min_observations: usize) -> Self {
        Self {
            window,
            min_observations: min_observations.max(TREND_SPAN),
        }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn min_observations(&self) -> usize {
        self.min_observations
    }

    /// Records the observation in `history`, then analyzes the recent window.
    pub fn record_and_analyze(
        &self,
        history: &mut EmotionHistory,
        emotion: &str,
        intensity: Intensity,
        now: Timestamp,
    ) -> PatternAnalysis {
        history.record(emotion, intensity, now);
        self.analyze(history, emotion)
    }

    /// Analyzes the recent window relative to `current_emotion`.
    pub fn analyze(&self, history: &EmotionHistory, current_emotion: &str) -> PatternAnalysis {
        let recent = history.recent(self.window);
        let mut analysis = PatternAnalysis::baseline();

        if recent.len() < self.min_observations {
            return analysis;
        }

        let last_three: Vec<i32> = recent[recent.len() - TREND_SPAN..]
            .iter()
            .map(|o| o.intensity().value())
            .collect();

        if last_three.iter().all(|&i| i >= 4) {
            analysis.trend = Trend::Worsening;
            analysis.crisis_risk = CrisisRisk::Medium;
            analysis.recommendations.insert(Recommendation::ProfessionalHelp);
        } else if last_three.iter().all(|&i| i <= 2) {
            analysis.trend = Trend::Improving;
        }

        let repeats = recent
            .iter()
            .filter(|o| o.emotion() == current_emotion)
            .count();
        if repeats >= PATTERN_REPEAT_THRESHOLD {
            analysis.pattern_detected = true;
            analysis.recommendations.insert(Recommendation::PatternIntervention);
        }

        analysis
    }
}
