//! Podcast generation request and its enumerated options.
//!
//! [`Tone`] and [`Language`] parse case-insensitively from either their wire
//! value (`"casual"`) or their display label (`"Casual"`), and always
//! serialise as the lowercase wire value.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::podcast::PodcastError;

// ---------------------------------------------------------------------------
// Tone
// ---------------------------------------------------------------------------

/// Delivery style requested for the generated conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Professional,
    Casual,
    Humorous,
    Educational,
    Dramatic,
    Inspirational,
}

impl Tone {
    pub const ALL: [Tone; 6] = [
        Tone::Professional,
        Tone::Casual,
        Tone::Humorous,
        Tone::Educational,
        Tone::Dramatic,
        Tone::Inspirational,
    ];

    /// Lowercase value sent to the generation service.
    pub fn value(&self) -> &'static str {
        match self {
            Tone::Professional => "professional",
            Tone::Casual => "casual",
            Tone::Humorous => "humorous",
            Tone::Educational => "educational",
            Tone::Dramatic => "dramatic",
            Tone::Inspirational => "inspirational",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Tone::Professional => "Professional",
            Tone::Casual => "Casual",
            Tone::Humorous => "Humorous",
            Tone::Educational => "Educational",
            Tone::Dramatic => "Dramatic",
            Tone::Inspirational => "Inspirational",
        }
    }
}

impl Default for Tone {
    fn default() -> Self {
        Tone::Casual
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Tone {
    type Err = PodcastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Tone::ALL
            .into_iter()
            .find(|t| t.value().eq_ignore_ascii_case(needle))
            .ok_or_else(|| PodcastError::InvalidRequest(format!("unknown tone: {s:?}")))
    }
}

// ---------------------------------------------------------------------------
// Language
// ---------------------------------------------------------------------------

/// Language the script is generated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Spanish,
    French,
    German,
    Hindi,
    Portuguese,
    Japanese,
    Arabic,
}

impl Language {
    pub const ALL: [Language; 8] = [
        Language::English,
        Language::Spanish,
        Language::French,
        Language::German,
        Language::Hindi,
        Language::Portuguese,
        Language::Japanese,
        Language::Arabic,
    ];

    /// Lowercase value sent to the generation service.
    pub fn value(&self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Spanish => "spanish",
            Language::French => "french",
            Language::German => "german",
            Language::Hindi => "hindi",
            Language::Portuguese => "portuguese",
            Language::Japanese => "japanese",
            Language::Arabic => "arabic",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Spanish => "Spanish",
            Language::French => "French",
            Language::German => "German",
            Language::Hindi => "Hindi",
            Language::Portuguese => "Portuguese",
            Language::Japanese => "Japanese",
            Language::Arabic => "Arabic",
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::English
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Language {
    type Err = PodcastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Language::ALL
            .into_iter()
            .find(|l| l.value().eq_ignore_ascii_case(needle))
            .ok_or_else(|| PodcastError::InvalidRequest(format!("unknown language: {s:?}")))
    }
}

// ---------------------------------------------------------------------------
// PodcastRequest
// ---------------------------------------------------------------------------

/// One podcast submission.  Built once per submission and never mutated.
///
/// ```
/// use agentcast::podcast::{Language, PodcastRequest, Tone};
///
/// let req = PodcastRequest::new("space travel", Tone::Casual, Language::English).unwrap();
/// assert_eq!(req.topic(), "space travel");
///
/// assert!(PodcastRequest::new("   ", Tone::Casual, Language::English).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PodcastRequest {
    topic: String,
    tone: Tone,
    language: Language,
}

impl PodcastRequest {
    /// Validate and build a request.  The topic is trimmed and must not be
    /// empty.
    pub fn new(
        topic: impl Into<String>,
        tone: Tone,
        language: Language,
    ) -> Result<Self, PodcastError> {
        let topic = topic.into().trim().to_string();
        if topic.is_empty() {
            return Err(PodcastError::InvalidRequest("topic must not be empty".into()));
        }
        Ok(Self {
            topic,
            tone,
            language,
        })
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn tone(&self) -> Tone {
        self.tone
    }

    pub fn language(&self) -> Language {
        self.language
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tone_parses_value_and_label() {
        assert_eq!("casual".parse::<Tone>().unwrap(), Tone::Casual);
        assert_eq!("Dramatic".parse::<Tone>().unwrap(), Tone::Dramatic);
        assert_eq!(" EDUCATIONAL ".parse::<Tone>().unwrap(), Tone::Educational);
    }

    #[test]
    fn unknown_tone_is_rejected() {
        let err = "sarcastic".parse::<Tone>().unwrap_err();
        assert!(matches!(err, PodcastError::InvalidRequest(_)));
    }

    #[test]
    fn language_parses_case_insensitively() {
        assert_eq!("English".parse::<Language>().unwrap(), Language::English);
        assert_eq!("japanese".parse::<Language>().unwrap(), Language::Japanese);
        assert!("klingon".parse::<Language>().is_err());
    }

    #[test]
    fn request_trims_topic() {
        let req = PodcastRequest::new("  the future of AI  ", Tone::Humorous, Language::French)
            .unwrap();
        assert_eq!(req.topic(), "the future of AI");
        assert_eq!(req.tone(), Tone::Humorous);
        assert_eq!(req.language(), Language::French);
    }

    #[test]
    fn empty_topic_is_rejected() {
        let err = PodcastRequest::new("", Tone::Casual, Language::English).unwrap_err();
        assert!(matches!(err, PodcastError::InvalidRequest(_)));
    }

    #[test]
    fn request_serialises_lowercase_wire_values() {
        let req = PodcastRequest::new("space travel", Tone::Casual, Language::English).unwrap();
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "topic": "space travel",
                "tone": "casual",
                "language": "english"
            })
        );
    }
}
