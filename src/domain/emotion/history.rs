//! Append-only emotion history for one support session.

use serde::{Deserialize, Serialize};

use super::observation::{EmotionObservation, Intensity};
use crate::domain::foundation::Timestamp;

/// Ordered sequence of emotion observations.
///
/// Insertion order is chronological order. Entries are never reordered or
/// removed individually; [`EmotionHistory::clear`] empties the whole sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionHistory {
    observations: Vec<EmotionObservation>,
}

impl EmotionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new observation and returns it.
    pub fn record(
        &mut self,
        emotion: impl Into<String>,
        intensity: Intensity,
        now: Timestamp,
    ) -> EmotionObservation {
        let observation = EmotionObservation::new(emotion, intensity, now);
        self.observations.push(observation.clone());
        observation
    }

    /// Returns the last `n` observations in chronological order.
    pub fn recent(&self, n: usize) -> &[EmotionObservation] {
        let start = self.observations.len().saturating_sub(n);
        &self.observations[start..]
    }

    /// Empties the history.
    pub fn clear(&mut self) {
        self.observations.clear();
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn last(&self) -> Option<&EmotionObservation> {
        self.observations.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EmotionObservation> {
        self.observations.iter()
    }
}
