//! Application entry point: AgentCast command-line client.
//!
//! # Startup sequence
//!
//! 1. Parse command-line arguments.
//! 2. Initialise logging.
//! 3. Load [`AppConfig`] (returns default on first run) and apply CLI
//!    overrides.
//! 4. Create the [`tokio`] runtime.
//! 5. Generate the script, reveal the transcript, then run the requested
//!    follow-ups (translate, synthesize audio, download).

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use agentcast::{
    api::HttpPodcastApi,
    cli::CliArgs,
    config::{AppConfig, RevealConfig},
    export::Exporter,
    pipeline::{PodcastOrchestrator, Stage},
    reveal::Revealer,
};

// ---------------------------------------------------------------------------
// Presentation
// ---------------------------------------------------------------------------

/// Print `text` to stdout, progressively when the reveal is enabled.
async fn show_transcript(revealer: &mut Revealer, config: &RevealConfig, text: &str) -> Result<()> {
    let mut out = std::io::stdout();

    if !config.enabled {
        writeln!(out, "{text}")?;
        return Ok(());
    }

    let handle = revealer.reveal(text);
    let mut printed = 0;
    while let Some(state) = handle.next_update().await {
        let fresh: String = state.revealed_text().chars().skip(printed).collect();
        write!(out, "{fresh}")?;
        out.flush()?;
        printed = state.revealed_len();
    }
    writeln!(out)?;
    Ok(())
}

/// Print a user-facing notification for a recoverable failure.
fn notify_failure(title: &str, error: &dyn std::fmt::Display) {
    eprintln!("\n{title}: {error}");
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

async fn run(args: CliArgs, config: AppConfig) -> Result<()> {
    let request = args.request(&config)?;

    let api = Arc::new(HttpPodcastApi::from_config(&config.api));
    let exporter = Exporter::new(
        api.http_client().clone(),
        api.base_url(),
        config.export.clone(),
    );
    let orchestrator = PodcastOrchestrator::new(api);
    let mut revealer = Revealer::from_config(&config.reveal);

    // 1. Script
    eprintln!("{}...", Stage::GeneratingScript.label());
    let mut result = orchestrator
        .generate(&request)
        .await
        .context("Generation Failed")?;

    eprintln!(
        "\nYour podcast on {:?} is ready ({}):\n",
        result.topic, result.language
    );
    show_transcript(&mut revealer, &config.reveal, &result.transcript()).await?;

    // 2. Translation
    if let Some(target) = args.translate.as_deref() {
        eprintln!("\nTranslating to {target}...");
        match orchestrator.translate(target).await {
            Ok(translated) if translated.translated && translated != result => {
                eprintln!("\nTranslated script ({}):\n", translated.language);
                show_transcript(&mut revealer, &config.reveal, &translated.transcript()).await?;
                result = translated;
            }
            Ok(_) => eprintln!("Script is already in {target}."),
            Err(e) => notify_failure("Translation Failed", &e),
        }
    }

    // 3. Audio
    if args.audio {
        eprintln!("\nSynthesizing audio...");
        match orchestrator.synthesize_audio().await {
            Ok(audio) => eprintln!("Audio ready: {audio}"),
            Err(e) => notify_failure("Audio Generation Failed", &e),
        }
        if let Some(latest) = orchestrator.result() {
            result = latest;
        }
    }

    // 4. Downloads
    if args.download {
        match exporter.transcript(&result).await {
            Ok(path) => eprintln!("Transcript saved to {}", path.display()),
            Err(e) => notify_failure("Transcript Download Failed", &e),
        }
        if result.has_audio() {
            match exporter.audio(&result).await {
                Ok(path) => eprintln!("Audio saved to {}", path.display()),
                Err(e) => notify_failure("Audio Download Failed", &e),
            }
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    // 1. Arguments
    let args = CliArgs::parse();

    // 2. Logging
    let default_filter = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
    log::debug!("AgentCast starting up");

    // 3. Configuration
    let mut config = match &args.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load().unwrap_or_else(|e| {
            log::warn!("Failed to load config ({e}); using defaults");
            AppConfig::default()
        }),
    };
    args.apply(&mut config);

    // 4. Tokio runtime
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .context("failed to create tokio runtime")?;

    // 5. Run the session
    rt.block_on(run(args, config))
}
