//! Aggregate statistics over persisted mood entries.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use super::records::MoodEntry;

/// Average intensity for one calendar day (UTC).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyAverage {
    pub date: NaiveDate,
    pub average_intensity: f64,
}

/// How often a label was reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmotionCount {
    pub emotion_label: String,
    pub count: usize,
}

/// Summary of a user's mood history.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MoodStatistics {
    pub entry_count: usize,
    pub average_intensity: Option<f64>,
    pub max_intensity: Option<i32>,
    /// Ordered by date, oldest first.
    pub daily_averages: Vec<DailyAverage>,
    /// Ordered by count descending, then label.
    pub emotion_distribution: Vec<EmotionCount>,
}

impl MoodStatistics {
    pub fn from_entries(entries: &[MoodEntry]) -> Self {
        if entries.is_empty() {
            return Self::default();
        }

        let values: Vec<i32> = entries.iter().map(|e| e.intensity.value()).collect();
        let total: i64 = values.iter().map(|&v| v as i64).sum();

        let mut per_day: BTreeMap<NaiveDate, (i64, usize)> = BTreeMap::new();
        for entry in entries {
            let slot = per_day.entry(entry.time.date()).or_insert((0, 0));
            slot.0 += entry.intensity.value() as i64;
            slot.1 += 1;
        }

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for entry in entries {
            *counts.entry(entry.emotion_label.as_str()).or_default() += 1;
        }
        let mut emotion_distribution: Vec<EmotionCount> = counts
            .into_iter()
            .map(|(label, count)| EmotionCount {
                emotion_label: label.to_string(),
                count,
            })
            .collect();
        emotion_distribution.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.emotion_label.cmp(&b.emotion_label))
        });

        Self {
            entry_count: entries.len(),
            average_intensity: Some(total as f64 / entries.len() as f64),
            max_intensity: values.iter().copied().max(),
            daily_averages: per_day
                .into_iter()
                .map(|(date, (sum, n))| DailyAverage {
                    date,
                    average_intensity: sum as f64 / n as f64,
                })
                .collect(),
            emotion_distribution,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::emotion::Intensity;
    use crate::domain::foundation::Timestamp;
    use chrono::{TimeZone, Utc};

    fn entry(day: u32, hour: u32, label: &str, intensity: i32) -> MoodEntry {
        let time = Timestamp::from_datetime(Utc.with_ymd_and_hms(2024, 5, day, hour, 0, 0).unwrap());
        MoodEntry::new(Intensity::new(intensity), label, time)
    }

    #[test]
    fn empty_history_has_no_averages() {
        let stats = MoodStatistics::from_entries(&[]);
        assert_eq!(stats.entry_count, 0);
        assert_eq!(stats.average_intensity, None);
        assert_eq!(stats.max_intensity, None);
        assert!(stats.daily_averages.is_empty());
    }

    #[test]
    fn computes_totals_and_daily_means() {
        let entries = vec![
            entry(2, 9, "Stres", 4),
            entry(1, 8, "Stres", 2),
            entry(2, 20, "Üzüntü", 5),
            entry(1, 22, "Endişe", 3),
        ];
        let stats = MoodStatistics::from_entries(&entries);

        assert_eq!(stats.entry_count, 4);
        assert_eq!(stats.average_intensity, Some(3.5));
        assert_eq!(stats.max_intensity, Some(5));
        assert_eq!(
            stats.daily_averages,
            vec![
                DailyAverage {
                    date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
                    average_intensity: 2.5,
                },
                DailyAverage {
                    date: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
                    average_intensity: 4.5,
                },
            ]
        );
    }

    #[test]
    fn distribution_orders_by_count_then_label() {
        let entries = vec![
            entry(1, 1, "Üzüntü", 3),
            entry(1, 2, "Stres", 3),
            entry(1, 3, "Endişe", 3),
            entry(1, 4, "Stres", 3),
        ];
        let stats = MoodStatistics::from_entries(&entries);
        let labels: Vec<&str> = stats
            .emotion_distribution
            .iter()
            .map(|c| c.emotion_label.as_str())
            .collect();
        assert_eq!(labels, vec!["Stres", "Endişe", "Üzüntü"]);
        assert_eq!(stats.emotion_distribution[0].count, 2);
    }
}
