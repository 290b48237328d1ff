//! Intent detection over free user text.
//!
//! The plan builder only asks "which intents are present"; how that is
//! decided lives behind [`IntentClassifier`].

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::locale::Locale;

/// Intents that steer plan construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Stress or anxiety is mentioned.
    StressOrAnxiety,
    /// Lack of motivation or energy is mentioned.
    LowEnergy,
    /// Explicit self-harm or suicide language.
    Crisis,
}

/// Classifies raw user text into a set of intents.
pub trait IntentClassifier: Send + Sync {
    fn classify(&self, text: &str) -> BTreeSet<Intent>;
}

const TR_STRESS: &[&str] = &["stres", "endişe"];
const TR_ENERGY: &[&str] = &["motivasyon", "enerji"];
const TR_CRISIS: &[&str] = &[
    "intihar",
    "kendime zarar",
    "ölmek istiyorum",
    "yaşamak istemiyorum",
];

const EN_STRESS: &[&str] = &["stress", "anxiety", "anxious"];
const EN_ENERGY: &[&str] = &["motivation", "energy"];
const EN_CRISIS: &[&str] = &[
    "suicide",
    "kill myself",
    "hurt myself",
    "self-harm",
    "want to die",
];

/// Case-insensitive substring matching against per-intent keyword lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordClassifier {
    keywords: BTreeMap<Intent, Vec<String>>,
}

impl KeywordClassifier {
    /// Classifier with no keywords; matches nothing.
    pub fn empty() -> Self {
        Self {
            keywords: BTreeMap::new(),
        }
    }

    /// Classifier seeded with the built-in lexicon for `locale`.
    pub fn for_locale(locale: Locale) -> Self {
        let (stress, energy, crisis) = match locale {
            Locale::Turkish => (TR_STRESS, TR_ENERGY, TR_CRISIS),
            Locale::English => (EN_STRESS, EN_ENERGY, EN_CRISIS),
        };

        Self::empty()
            .with_keywords(Intent::StressOrAnxiety, stress)
            .with_keywords(Intent::LowEnergy, energy)
            .with_keywords(Intent::Crisis, crisis)
    }

    /// Adds keywords for an intent. Keywords are stored lowercase.
    pub fn with_keywords<I, S>(mut self, intent: Intent, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entry = self.keywords.entry(intent).or_default();
        entry.extend(
            keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .filter(|k| !k.is_empty()),
        );
        self
    }

    pub fn keywords(&self, intent: Intent) -> &[String] {
        self.keywords.get(&intent).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::for_locale(Locale::default())
    }
}

impl IntentClassifier for KeywordClassifier {
    fn classify(&self, text: &str) -> BTreeSet<Intent> {
        let lowered = text.to_lowercase();
        self.keywords
            .iter()
            .filter(|(_, words)| words.iter().any(|w| lowered.contains(w.as_str())))
            .map(|(intent, _)| *intent)
            .collect()
    }
}
