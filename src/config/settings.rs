//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files.  Every field has a
//! default, so a partial `settings.toml` is accepted.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::AppPaths;
use crate::podcast::{Language, Tone};

// ---------------------------------------------------------------------------
// ApiConfig
// ---------------------------------------------------------------------------

/// Connection settings for the podcast generation service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the service, without a trailing path
    /// (e.g. `http://localhost:8000`).
    pub base_url: String,
    /// Maximum seconds to wait for any single call.  Script generation and
    /// speech synthesis are slow, so the default is generous.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".into(),
            timeout_secs: 120,
        }
    }
}

// ---------------------------------------------------------------------------
// RevealConfig
// ---------------------------------------------------------------------------

/// Pacing of the typewriter transcript reveal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Print the transcript progressively instead of all at once.
    pub enabled: bool,
    /// Milliseconds between ticks.
    pub tick_interval_ms: u64,
    /// Characters revealed per tick.
    pub chars_per_tick: usize,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            tick_interval_ms: 30,
            chars_per_tick: 1,
        }
    }
}

impl RevealConfig {
    pub fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.tick_interval_ms.max(1))
    }
}

// ---------------------------------------------------------------------------
// ExportConfig
// ---------------------------------------------------------------------------

/// Where downloaded transcripts and audio are written.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Target directory.  `None` means the platform download directory.
    pub output_dir: Option<PathBuf>,
    pub transcript_file_name: String,
    pub audio_file_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            transcript_file_name: "podcast-transcript.txt".into(),
            audio_file_name: "podcast.mp3".into(),
        }
    }
}

impl ExportConfig {
    /// The configured directory, else the platform download directory, else
    /// the current directory.
    pub fn resolve_output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| AppPaths::new().download_dir)
    }
}

// ---------------------------------------------------------------------------
// DefaultsConfig
// ---------------------------------------------------------------------------

/// Form values used when the command line leaves them out.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    pub tone: Tone,
    pub language: Language,
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use agentcast::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
///
/// // Modify and save
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Generation service connection.
    pub api: ApiConfig,
    /// Transcript reveal pacing.
    pub reveal: RevealConfig,
    /// Download targets.
    pub export: ExportConfig,
    /// Default form values.
    pub defaults: DefaultsConfig,
}

impl AppConfig {
    /// Load from the platform settings file, returning defaults when the
    /// file does not exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path, returning defaults when it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("config: {} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: AppConfig =
            toml::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))?;
        log::debug!("config: loaded {}", path.display());
        Ok(config)
    }

    /// Save to the platform settings file, creating its directory.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let raw = toml::to_string_pretty(self).context("failed to serialise settings")?;
        std::fs::write(path, raw).with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }

    /// Returns `true` when no `settings.toml` file exists yet.
    pub fn is_first_run() -> bool {
        !AppPaths::new().settings_file.exists()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn round_trip_toml() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");

        let original = AppConfig::default();
        original.save_to(&path).expect("save");

        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(original.api.base_url, loaded.api.base_url);
        assert_eq!(original.api.timeout_secs, loaded.api.timeout_secs);
        assert_eq!(original.reveal.enabled, loaded.reveal.enabled);
        assert_eq!(original.reveal.tick_interval_ms, loaded.reveal.tick_interval_ms);
        assert_eq!(original.reveal.chars_per_tick, loaded.reveal.chars_per_tick);
        assert_eq!(original.export.output_dir, loaded.export.output_dir);
        assert_eq!(
            original.export.transcript_file_name,
            loaded.export.transcript_file_name
        );
        assert_eq!(original.defaults.tone, loaded.defaults.tone);
        assert_eq!(original.defaults.language, loaded.defaults.language);
    }

    /// `load_from` on a non-existent path must return `Default` without error.
    #[test]
    fn load_missing_returns_default() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nonexistent.toml");

        let config = AppConfig::load_from(&path).expect("should not error");
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.reveal.tick_interval_ms, 30);
    }

    #[test]
    fn default_values() {
        let cfg = AppConfig::default();

        assert_eq!(cfg.api.base_url, "http://localhost:8000");
        assert_eq!(cfg.api.timeout_secs, 120);
        assert!(cfg.reveal.enabled);
        assert_eq!(cfg.reveal.chars_per_tick, 1);
        assert!(cfg.export.output_dir.is_none());
        assert_eq!(cfg.export.transcript_file_name, "podcast-transcript.txt");
        assert_eq!(cfg.export.audio_file_name, "podcast.mp3");
        assert_eq!(cfg.defaults.tone, Tone::Casual);
        assert_eq!(cfg.defaults.language, Language::English);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("partial.toml");
        std::fs::write(
            &path,
            "[api]\nbase_url = \"https://podcasts.example.com\"\n\n[defaults]\ntone = \"dramatic\"\n",
        )
        .unwrap();

        let cfg = AppConfig::load_from(&path).expect("load");
        assert_eq!(cfg.api.base_url, "https://podcasts.example.com");
        assert_eq!(cfg.api.timeout_secs, 120);
        assert_eq!(cfg.defaults.tone, Tone::Dramatic);
        assert_eq!(cfg.defaults.language, Language::English);
        assert!(cfg.reveal.enabled);
    }

    #[test]
    fn round_trip_modified_values() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("modified.toml");

        let mut cfg = AppConfig::default();
        cfg.api.base_url = "http://10.0.0.5:9000".into();
        cfg.api.timeout_secs = 30;
        cfg.reveal.enabled = false;
        cfg.reveal.tick_interval_ms = 5;
        cfg.export.output_dir = Some(dir.path().join("out"));
        cfg.defaults.language = Language::Hindi;

        cfg.save_to(&path).expect("save");
        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(loaded.api.base_url, "http://10.0.0.5:9000");
        assert_eq!(loaded.api.timeout_secs, 30);
        assert!(!loaded.reveal.enabled);
        assert_eq!(loaded.reveal.tick_interval_ms, 5);
        assert_eq!(loaded.export.output_dir, Some(dir.path().join("out")));
        assert_eq!(loaded.defaults.language, Language::Hindi);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[api\nbase_url = ").unwrap();
        assert!(AppConfig::load_from(&path).is_err());
    }

    #[test]
    fn explicit_output_dir_wins() {
        let mut export = ExportConfig::default();
        export.output_dir = Some(PathBuf::from("/tmp/podcasts"));
        assert_eq!(export.resolve_output_dir(), PathBuf::from("/tmp/podcasts"));
    }

    #[test]
    fn zero_tick_interval_is_clamped() {
        let reveal = RevealConfig {
            tick_interval_ms: 0,
            ..RevealConfig::default()
        };
        assert_eq!(reveal.tick_interval(), std::time::Duration::from_millis(1));
    }
}
