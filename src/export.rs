//! Download actions: save the transcript and the synthesized audio locally.
//!
//! The audio locator returned by the speech service may be an absolute URL,
//! a path on this machine, or a path relative to the service base URL.
//! [`AudioLocation::resolve`] decides which.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::api::ApiFailure;
use crate::config::ExportConfig;
use crate::podcast::PodcastResult;

// ---------------------------------------------------------------------------
// ExportError
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ExportError {
    /// The result has no audio reference yet.
    #[error("no audio has been synthesized for this podcast")]
    NoAudio,

    /// Reading or writing a local file failed.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Copying a local audio file into the output directory failed.
    #[error("failed to copy {from} to {to}: {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Fetching remote audio failed.
    #[error("failed to download audio: {0}")]
    Download(#[from] ApiFailure),
}

// ---------------------------------------------------------------------------
// AudioLocation
// ---------------------------------------------------------------------------

/// Where the synthesized audio actually lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioLocation {
    Remote(String),
    Local(PathBuf),
}

impl AudioLocation {
    /// Classify an audio reference.
    ///
    /// ```
    /// use agentcast::export::AudioLocation;
    ///
    /// assert_eq!(
    ///     AudioLocation::resolve("http://localhost:8000", "/audio/ep1.mp3"),
    ///     AudioLocation::Remote("http://localhost:8000/audio/ep1.mp3".into())
    /// );
    /// ```
    pub fn resolve(base_url: &str, reference: &str) -> Self {
        let reference = reference.trim();

        if reference.starts_with("http://") || reference.starts_with("https://") {
            return AudioLocation::Remote(reference.to_string());
        }
        if let Some(path) = reference.strip_prefix("file://") {
            return AudioLocation::Local(PathBuf::from(path));
        }

        let path = Path::new(reference);
        if path.is_absolute() && path.exists() {
            return AudioLocation::Local(path.to_path_buf());
        }

        AudioLocation::Remote(format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            reference.trim_start_matches('/')
        ))
    }
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Write the transcript of `result` to `dir/file_name`, creating `dir`.
pub async fn write_transcript(
    result: &PodcastResult,
    dir: &Path,
    file_name: &str,
) -> Result<PathBuf, ExportError> {
    let path = dir.join(file_name);
    create_dir(dir).await?;
    tokio::fs::write(&path, result.transcript())
        .await
        .map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;
    log::info!("export: transcript written to {}", path.display());
    Ok(path)
}

/// Save the audio referenced by `result` to `dir/file_name`.
pub async fn save_audio(
    client: &reqwest::Client,
    base_url: &str,
    result: &PodcastResult,
    dir: &Path,
    file_name: &str,
) -> Result<PathBuf, ExportError> {
    let reference = result.audio_reference.as_deref().ok_or(ExportError::NoAudio)?;
    let target = dir.join(file_name);
    create_dir(dir).await?;

    match AudioLocation::resolve(base_url, reference) {
        AudioLocation::Local(from) => {
            tokio::fs::copy(&from, &target)
                .await
                .map_err(|source| ExportError::Copy {
                    from: from.clone(),
                    to: target.clone(),
                    source,
                })?;
        }
        AudioLocation::Remote(url) => {
            log::debug!("export: downloading audio from {url}");
            let response = client.get(&url).send().await.map_err(ApiFailure::from)?;
            let status = response.status();
            if !status.is_success() {
                return Err(ExportError::Download(ApiFailure::Status {
                    status: status.as_u16(),
                    message: format!("audio download responded with HTTP {}", status.as_u16()),
                }));
            }
            let bytes = response.bytes().await.map_err(ApiFailure::from)?;
            tokio::fs::write(&target, &bytes)
                .await
                .map_err(|source| ExportError::Io {
                    path: target.clone(),
                    source,
                })?;
        }
    }

    log::info!("export: audio saved to {}", target.display());
    Ok(target)
}

async fn create_dir(dir: &Path) -> Result<(), ExportError> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|source| ExportError::Io {
            path: dir.to_path_buf(),
            source,
        })
}

// ---------------------------------------------------------------------------
// Exporter
// ---------------------------------------------------------------------------

/// Bundles the export settings with the HTTP client used for audio
/// downloads.
pub struct Exporter {
    client: reqwest::Client,
    base_url: String,
    config: ExportConfig,
    output_dir: PathBuf,
}

impl Exporter {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, config: ExportConfig) -> Self {
        let output_dir = config.resolve_output_dir();
        Self {
            client,
            base_url: base_url.into(),
            config,
            output_dir,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub async fn transcript(&self, result: &PodcastResult) -> Result<PathBuf, ExportError> {
        write_transcript(result, &self.output_dir, &self.config.transcript_file_name).await
    }

    pub async fn audio(&self, result: &PodcastResult) -> Result<PathBuf, ExportError> {
        save_audio(
            &self.client,
            &self.base_url,
            result,
            &self.output_dir,
            &self.config.audio_file_name,
        )
        .await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
