//! Aggregated result of one podcast session.

use serde::{Deserialize, Serialize};

use crate::podcast::Script;

/// Everything the orchestrator has assembled for the current podcast.
///
/// Created after a successful generate call, extended by synthesis and
/// translation, discarded on reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PodcastResult {
    /// Current script (translated, when `translated` is set).
    pub script: Script,
    /// Script as it was before the most recent translation, or as returned
    /// by the service alongside a generated script.
    pub original_script: Option<Script>,
    /// Language of `script`.
    pub language: String,
    /// Topic the podcast was generated for.
    pub topic: String,
    /// URL or file path of the synthesized audio.  Cleared whenever the
    /// script changes.
    pub audio_reference: Option<String>,
    /// Set once the script has been translated.
    pub translated: bool,
}

impl PodcastResult {
    pub fn new(topic: impl Into<String>, language: impl Into<String>, script: Script) -> Self {
        Self {
            script,
            original_script: None,
            language: language.into(),
            topic: topic.into(),
            audio_reference: None,
            translated: false,
        }
    }

    /// Transcript text for display or download.
    pub fn transcript(&self) -> String {
        self.script.to_transcript()
    }

    pub fn has_audio(&self) -> bool {
        self.audio_reference.is_some()
    }

    /// Case-insensitive comparison against the current script language.
    pub fn is_in_language(&self, language: &str) -> bool {
        self.language.trim().to_lowercase() == language.trim().to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::podcast::ScriptTurn;

    #[test]
    fn new_result_has_no_audio_and_is_untranslated() {
        let result = PodcastResult::new(
            "space travel",
            "English",
            Script::Turns(vec![ScriptTurn::new("Host", "Hi")]),
        );
        assert!(!result.has_audio());
        assert!(!result.translated);
        assert!(result.original_script.is_none());
        assert_eq!(result.transcript(), "Host: Hi");
    }

    #[test]
    fn language_match_ignores_case_and_whitespace() {
        let result = PodcastResult::new("t", "English", Script::TextBlob("x".into()));
        assert!(result.is_in_language("english"));
        assert!(result.is_in_language(" ENGLISH "));
        assert!(!result.is_in_language("Spanish"));
    }
}
