//! Script representation shared by the orchestrator, the revealer and the
//! exporters.
//!
//! The generation service returns either a sequence of turns
//! (`[{"Host": "Hi"}, {"Guest": "Hello"}]`) or a single text blob.  Both are
//! folded into the tagged [`Script`] enum when decoded.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ---------------------------------------------------------------------------
// ScriptTurn
// ---------------------------------------------------------------------------

/// One unit of dialogue: one or more `(speaker, utterance)` pairs.
///
/// Encoded on the wire as a JSON object.  Decoding keeps the pairs in the
/// order they appear in the payload.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScriptTurn {
    lines: Vec<(String, String)>,
}

impl ScriptTurn {
    /// A turn with a single speaker.
    pub fn new(speaker: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            lines: vec![(speaker.into(), text.into())],
        }
    }

    /// Append another speaker/utterance pair to this turn.
    pub fn with_line(mut self, speaker: impl Into<String>, text: impl Into<String>) -> Self {
        self.lines.push((speaker.into(), text.into()));
        self
    }

    pub fn lines(&self) -> impl Iterator<Item = (&str, &str)> {
        self.lines.iter().map(|(s, t)| (s.as_str(), t.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// `speaker: text` pairs joined with a newline.
    pub fn to_transcript(&self) -> String {
        self.lines
            .iter()
            .map(|(speaker, text)| format!("{speaker}: {text}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Serialize for ScriptTurn {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.lines.len()))?;
        for (speaker, text) in &self.lines {
            map.serialize_entry(speaker, text)?;
        }
        map.end()
    }
}

struct TurnVisitor;

impl<'de> Visitor<'de> for TurnVisitor {
    type Value = ScriptTurn;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of speaker to utterance")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut lines = Vec::with_capacity(access.size_hint().unwrap_or(1));
        while let Some((speaker, text)) = access.next_entry::<String, String>()? {
            lines.push((speaker, text));
        }
        Ok(ScriptTurn { lines })
    }
}

impl<'de> Deserialize<'de> for ScriptTurn {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(TurnVisitor)
    }
}

// ---------------------------------------------------------------------------
// Script
// ---------------------------------------------------------------------------

/// A generated podcast script.
///
/// ```
/// use agentcast::podcast::{Script, ScriptTurn};
///
/// let script = Script::Turns(vec![
///     ScriptTurn::new("Host", "Hi"),
///     ScriptTurn::new("Guest", "Hello"),
/// ]);
/// assert_eq!(script.to_transcript(), "Host: Hi\n\nGuest: Hello");
///
/// let blob = Script::from("Just one paragraph.".to_string());
/// assert_eq!(blob.to_transcript(), "Just one paragraph.");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Script {
    /// Ordered conversation turns.
    Turns(Vec<ScriptTurn>),
    /// Unstructured script text.
    TextBlob(String),
}

impl Script {
    /// Transcript text: turns joined with a blank line, pairs within a turn
    /// joined with a newline.
    pub fn to_transcript(&self) -> String {
        match self {
            Script::TextBlob(text) => text.clone(),
            Script::Turns(turns) => turns
                .iter()
                .filter(|turn| !turn.is_empty())
                .map(ScriptTurn::to_transcript)
                .collect::<Vec<_>>()
                .join("\n\n"),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Script::TextBlob(text) => text.trim().is_empty(),
            Script::Turns(turns) => turns.iter().all(ScriptTurn::is_empty),
        }
    }

    /// Number of turns; a text blob counts as a single turn.
    pub fn turn_count(&self) -> usize {
        match self {
            Script::TextBlob(_) => 1,
            Script::Turns(turns) => turns.len(),
        }
    }
}

impl From<String> for Script {
    fn from(text: String) -> Self {
        Script::TextBlob(text)
    }
}

impl From<Vec<ScriptTurn>> for Script {
    fn from(turns: Vec<ScriptTurn>) -> Self {
        Script::Turns(turns)
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_transcript())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
