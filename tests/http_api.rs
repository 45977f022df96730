//! Drives `HttpPodcastApi` and the orchestrator against a mock service.

use std::sync::Arc;
use std::time::Duration;

use agentcast::api::{ApiFailure, HttpPodcastApi, PodcastApi};
use agentcast::config::{ApiConfig, ExportConfig};
use agentcast::export::Exporter;
use agentcast::pipeline::{PodcastOrchestrator, Stage};
use agentcast::podcast::{Language, PodcastError, PodcastRequest, Script, ScriptTurn, Tone};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn api_for(server: &MockServer) -> Arc<HttpPodcastApi> {
    Arc::new(HttpPodcastApi::from_config(&ApiConfig {
        base_url: server.uri(),
        timeout_secs: 5,
    }))
}

fn space_travel() -> PodcastRequest {
    PodcastRequest::new("space travel", Tone::Casual, Language::English).unwrap()
}

async fn mount_generate(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/generate-podcast"))
        .and(body_json(json!({
            "topic": "space travel",
            "tone": "casual",
            "language": "english"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "script": [{"Host": "Hi"}, {"Guest": "Hello"}],
            "language": "English",
            "original_script": null
        })))
        .expect(1)
        .mount(server)
        .await;
}

// ---------------------------------------------------------------------------
// generate
// ---------------------------------------------------------------------------

#[tokio::test]
async fn generated_script_becomes_blank_line_separated_transcript() {
    let server = MockServer::start().await;
    mount_generate(&server).await;

    let orchestrator = PodcastOrchestrator::new(api_for(&server));
    let result = orchestrator.generate(&space_travel()).await.unwrap();

    assert_eq!(result.topic, "space travel");
    assert_eq!(result.language, "English");
    assert_eq!(result.transcript(), "Host: Hi\n\nGuest: Hello");
    assert_eq!(orchestrator.stage(), Stage::Idle);
}

#[tokio::test]
async fn text_blob_script_is_accepted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate-podcast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "script": "Welcome to the show.",
            "language": "English"
        })))
        .mount(&server)
        .await;

    let response = api_for(&server).generate(&space_travel()).await.unwrap();
    assert_eq!(response.script, Script::TextBlob("Welcome to the show.".into()));
}

#[tokio::test]
async fn error_detail_is_surfaced_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate-podcast"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({"detail": "Topic is too vague"})),
        )
        .mount(&server)
        .await;

    let orchestrator = PodcastOrchestrator::new(api_for(&server));
    let err = orchestrator.generate(&space_travel()).await.unwrap_err();

    match &err {
        PodcastError::Generation(ApiFailure::Status { status, message }) => {
            assert_eq!(*status, 422);
            assert_eq!(message, "Topic is too vague");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(orchestrator.result().is_none());
    assert_eq!(orchestrator.stage(), Stage::Idle);
}

#[tokio::test]
async fn empty_error_body_gets_generic_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate-podcast"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let err = api_for(&server).generate(&space_travel()).await.unwrap_err();
    assert_eq!(err.to_string(), "service responded with HTTP 502");
}

#[tokio::test]
async fn blank_error_detail_gets_generic_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate-podcast"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"detail": ""})))
        .mount(&server)
        .await;

    let err = api_for(&server).generate(&space_travel()).await.unwrap_err();
    assert_eq!(err.to_string(), "service responded with HTTP 500");
}

#[tokio::test]
async fn malformed_success_body_is_a_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate-podcast"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = api_for(&server).generate(&space_travel()).await.unwrap_err();
    assert!(matches!(err, ApiFailure::Parse(_)));
}

#[tokio::test]
async fn slow_service_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/text-to-speech"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"audio_file": "late.mp3", "language": "English"}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let api = HttpPodcastApi::from_config(&ApiConfig {
        base_url: server.uri(),
        timeout_secs: 1,
    });
    let script = Script::Turns(vec![ScriptTurn::new("Host", "Hi")]);

    let err = api.synthesize(&script, "English").await.unwrap_err();
    assert!(matches!(err, ApiFailure::Timeout));
}

// ---------------------------------------------------------------------------
// translate / synthesize
// ---------------------------------------------------------------------------

#[tokio::test]
async fn translation_to_current_language_sends_nothing() {
    let server = MockServer::start().await;
    mount_generate(&server).await;
    Mock::given(method("POST"))
        .and(path("/translate"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let orchestrator = PodcastOrchestrator::new(api_for(&server));
    let generated = orchestrator.generate(&space_travel()).await.unwrap();

    let same = orchestrator.translate("ENGLISH").await.unwrap();
    assert_eq!(same, generated);
}

#[tokio::test]
async fn translation_failure_is_not_silently_swallowed() {
    let server = MockServer::start().await;
    mount_generate(&server).await;
    Mock::given(method("POST"))
        .and(path("/translate"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Translation model offline"))
        .mount(&server)
        .await;

    let orchestrator = PodcastOrchestrator::new(api_for(&server));
    let generated = orchestrator.generate(&space_travel()).await.unwrap();

    let err = orchestrator.translate("Spanish").await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "translation failed: Translation model offline"
    );
    assert_eq!(orchestrator.result(), Some(generated));
    assert!(!orchestrator.is_follow_up_busy());
}

#[tokio::test]
async fn full_session_synthesize_translate_and_download() {
    let server = MockServer::start().await;
    mount_generate(&server).await;

    Mock::given(method("POST"))
        .and(path("/text-to-speech"))
        .and(body_json(json!({
            "script": [{"Host": "Hi"}, {"Guest": "Hello"}],
            "language": "English"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "audio_file": "/audio/podcast_en.mp3",
            "language": "English"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/translate"))
        .and(body_json(json!({
            "script": [{"Host": "Hi"}, {"Guest": "Hello"}],
            "target_language": "Spanish"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "translated_script": [{"Host": "Hola"}, {"Guest": "Buenas"}],
            "language": "Spanish"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/audio/podcast_en.mp3"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"ID3audio".to_vec()))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let dir = tempfile::tempdir().expect("temp dir");
    let exporter = Exporter::new(
        api.http_client().clone(),
        api.base_url(),
        ExportConfig {
            output_dir: Some(dir.path().to_path_buf()),
            ..ExportConfig::default()
        },
    );
    let orchestrator = PodcastOrchestrator::new(api);

    orchestrator.generate(&space_travel()).await.unwrap();
    let audio = orchestrator.synthesize_audio().await.unwrap();
    assert_eq!(audio, "/audio/podcast_en.mp3");

    let with_audio = orchestrator.result().unwrap();
    let audio_path = exporter.audio(&with_audio).await.unwrap();
    assert_eq!(std::fs::read(audio_path).unwrap(), b"ID3audio");

    let translated = orchestrator.translate("Spanish").await.unwrap();
    assert_eq!(translated.language, "Spanish");
    assert!(translated.translated);
    assert!(translated.audio_reference.is_none());
    assert_eq!(translated.transcript(), "Host: Hola\n\nGuest: Buenas");
    assert_eq!(
        translated.original_script.as_ref().map(Script::to_transcript).as_deref(),
        Some("Host: Hi\n\nGuest: Hello")
    );

    let transcript_path = exporter.transcript(&translated).await.unwrap();
    assert_eq!(
        std::fs::read_to_string(transcript_path).unwrap(),
        "Host: Hola\n\nGuest: Buenas"
    );
}
