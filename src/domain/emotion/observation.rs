//! Emotion observation value objects.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{Timestamp, ValidationError};

/// Lowest intensity on the reporting scale.
pub const MIN_INTENSITY: i32 = 1;

/// Highest intensity on the reporting scale.
pub const MAX_INTENSITY: i32 = 5;

/// Intensity used when a caller supplies an emotion label without one.
pub const DEFAULT_INTENSITY: i32 = 3;

/// Self-reported emotion intensity on the 1 (mild) to 5 (severe) scale.
///
/// Construction through [`Intensity::new`] is unchecked; the rule evaluator
/// tolerates any value. Use [`Intensity::validated`] at trust boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Intensity(i32);

impl Intensity {
    /// Wraps a raw value without range checks.
    pub fn new(value: i32) -> Self {
        Self(value)
    }

    /// Wraps a raw value, returning error if outside 1..=5.
    pub fn validated(value: i32) -> Result<Self, ValidationError> {
        if !(MIN_INTENSITY..=MAX_INTENSITY).contains(&value) {
            return Err(ValidationError::out_of_range(
                "intensity",
                MIN_INTENSITY,
                MAX_INTENSITY,
                value,
            ));
        }
        Ok(Self(value))
    }

    /// Returns the numeric value.
    pub fn value(&self) -> i32 {
        self.0
    }

    /// Returns true if the value lies on the 1..=5 scale.
    pub fn is_on_scale(&self) -> bool {
        (MIN_INTENSITY..=MAX_INTENSITY).contains(&self.0)
    }
}

impl Default for Intensity {
    fn default() -> Self {
        Self(DEFAULT_INTENSITY)
    }
}

impl From<i32> for Intensity {
    fn from(value: i32) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, MAX_INTENSITY)
    }
}

/// One timestamped (label, intensity) pair reported by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionObservation {
    emotion: String,
    intensity: Intensity,
    timestamp: Timestamp,
}

impl EmotionObservation {
    /// Creates an observation. Any label is accepted.
    pub fn new(emotion: impl Into<String>, intensity: Intensity, timestamp: Timestamp) -> Self {
        Self {
            emotion: emotion.into(),
            intensity,
            timestamp,
        }
    }

    pub fn emotion(&self) -> &str {
        &self.emotion
    }

    pub fn intensity(&self) -> Intensity {
        self.intensity
    }

    pub fn timestamp(&self) -> &Timestamp {
        &self.timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validated_accepts_scale_bounds() {
        assert_eq!(Intensity::validated(1).unwrap().value(), 1);
        assert_eq!(Intensity::validated(5).unwrap().value(), 5);
    }

    #[test]
    fn validated_rejects_out_of_range() {
        match Intensity::validated(6) {
            Err(ValidationError::OutOfRange { field, min, max, actual }) => {
                assert_eq!(field, "intensity");
                assert_eq!((min, max, actual), (1, 5, 6));
            }
            other => panic!("Expected OutOfRange, got {:?}", other),
        }
        assert!(Intensity::validated(0).is_err());
    }

    #[test]
    fn new_keeps_out_of_range_values() {
        let intensity = Intensity::new(42);
        assert_eq!(intensity.value(), 42);
        assert!(!intensity.is_on_scale());
    }

    #[test]
    fn default_intensity_is_midpoint() {
        assert_eq!(Intensity::default().value(), 3);
    }

    #[test]
    fn intensity_displays_against_scale() {
        assert_eq!(Intensity::new(4).to_string(), "4/5");
    }

    #[test]
    fn observation_exposes_fields() {
        let now = Timestamp::now();
        let obs = EmotionObservation::new("Stres", Intensity::new(4), now);
        assert_eq!(obs.emotion(), "Stres");
        assert_eq!(obs.intensity().value(), 4);
        assert_eq!(obs.timestamp(), &now);
    }
}
