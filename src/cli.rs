//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use crate::config::AppConfig;
use crate::podcast::{Language, PodcastError, PodcastRequest, Tone};

#[derive(Parser, Debug, Clone)]
#[command(name = "agentcast", about = "AgentCast - AI podcast generation client")]
pub struct CliArgs {
    /// Podcast topic (e.g. "The future of AI in healthcare")
    #[arg(long, short)]
    pub topic: String,

    /// Conversation tone [professional, casual, humorous, educational, dramatic, inspirational]
    #[arg(long)]
    pub tone: Option<Tone>,

    /// Script language [english, spanish, french, german, hindi, portuguese, japanese, arabic]
    #[arg(long, short)]
    pub language: Option<Language>,

    /// Translate the generated script into this language
    #[arg(long, value_name = "LANGUAGE")]
    pub translate: Option<String>,

    /// Synthesize audio for the final script
    #[arg(long)]
    pub audio: bool,

    /// Save the transcript (and audio, when synthesized) to the output directory
    #[arg(long)]
    pub download: bool,

    /// Print the transcript at once instead of revealing it progressively
    #[arg(long)]
    pub no_reveal: bool,

    /// Directory for downloaded files
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Base URL of the generation service
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Settings file to use instead of the platform default
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl CliArgs {
    /// Overlay command-line values onto the loaded configuration.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(url) = &self.base_url {
            config.api.base_url = url.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.export.output_dir = Some(dir.clone());
        }
        if self.no_reveal {
            config.reveal.enabled = false;
        }
    }

    /// Build the submission, falling back to the configured defaults for
    /// tone and language.
    pub fn request(&self, config: &AppConfig) -> Result<PodcastRequest, PodcastError> {
        PodcastRequest::new(
            self.topic.clone(),
            self.tone.unwrap_or(config.defaults.tone),
            self.language.unwrap_or(config.defaults.language),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_invocation() {
        let args = CliArgs::try_parse_from([
            "agentcast",
            "--topic",
            "space travel",
            "--tone",
            "casual",
            "--language",
            "English",
            "--translate",
            "Spanish",
            "--audio",
            "--download",
        ])
        .unwrap();

        assert_eq!(args.topic, "space travel");
        assert_eq!(args.tone, Some(Tone::Casual));
        assert_eq!(args.language, Some(Language::English));
        assert_eq!(args.translate.as_deref(), Some("Spanish"));
        assert!(args.audio);
        assert!(args.download);
        assert!(!args.no_reveal);
    }

    #[test]
    fn unknown_tone_is_a_parse_error() {
        let res = CliArgs::try_parse_from(["agentcast", "-t", "x", "--tone", "sarcastic"]);
        assert!(res.is_err());
    }

    #[test]
    fn topic_is_required() {
        assert!(CliArgs::try_parse_from(["agentcast"]).is_err());
    }

    #[test]
    fn request_uses_config_defaults() {
        let args = CliArgs::try_parse_from(["agentcast", "-t", "ocean life"]).unwrap();
        let mut config = AppConfig::default();
        config.defaults.tone = Tone::Educational;
        config.defaults.language = Language::German;

        let req = args.request(&config).unwrap();

        assert_eq!(req.topic(), "ocean life");
        assert_eq!(req.tone(), Tone::Educational);
        assert_eq!(req.language(), Language::German);
    }

    #[test]
    fn blank_topic_is_rejected() {
        let args = CliArgs::try_parse_from(["agentcast", "-t", "   "]).unwrap();
        assert!(args.request(&AppConfig::default()).is_err());
    }

    #[test]
    fn apply_overrides_config() {
        let args = CliArgs::try_parse_from([
            "agentcast",
            "-t",
            "x",
            "--base-url",
            "http://podcasts.local:9000",
            "--output-dir",
            "/tmp/out",
            "--no-reveal",
        ])
        .unwrap();
        let mut config = AppConfig::default();

        args.apply(&mut config);

        assert_eq!(config.api.base_url, "http://podcasts.local:9000");
        assert_eq!(config.export.output_dir, Some(PathBuf::from("/tmp/out")));
        assert!(!config.reveal.enabled);
    }
}
