//! Language of keywords, plan steps, and user-facing fixed texts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Supported response languages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "tr")]
    Turkish,
    #[serde(rename = "en")]
    English,
}

impl Locale {
    /// ISO 639-1 code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Turkish => "tr",
            Self::English => "en",
        }
    }

    /// Language name as written into the agent's system prompt.
    pub fn language_name(&self) -> &'static str {
        match self {
            Self::Turkish => "TURKISH",
            Self::English => "ENGLISH",
        }
    }

    /// Apology returned when the agent call fails.
    pub fn fallback_response(&self) -> &'static str {
        match self {
            Self::Turkish => {
                "Üzgünüm, şu anda teknik bir sorun yaşıyorum. Lütfen tekrar deneyin."
            }
            Self::English => {
                "I'm sorry, I'm experiencing a technical problem right now. Please try again."
            }
        }
    }

    /// Label recorded when emotion data arrives without a label.
    pub fn unspecified_emotion(&self) -> &'static str {
        match self {
            Self::Turkish => "Belirsiz",
            Self::English => "Unspecified",
        }
    }

    /// Human-readable description of the conversation memory size.
    pub fn memory_summary(&self, message_count: usize) -> String {
        match (self, message_count) {
            (Self::Turkish, 0) => "Henüz hafızada mesaj yok".to_string(),
            (Self::Turkish, n) => format!("Son {} mesaj hafızada saklanıyor", n),
            (Self::English, 0) => "No messages in memory yet".to_string(),
            (Self::English, n) => format!("Last {} messages kept in memory", n),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Locale {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tr" | "turkish" => Ok(Self::Turkish),
            "en" | "english" => Ok(Self::English),
            other => Err(ValidationError::invalid_format(
                "locale",
                format!("unsupported locale '{}'", other),
            )),
        }
    }
}
