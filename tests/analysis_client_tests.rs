use std::time::Duration;

use serde_json::json;
use tokio_test::{assert_err, assert_ok};
use wellcheck::analysis::{AnalysisError, AnalysisService, HttpAnalysisService};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, method, path},
};

// ============================================================================
// Helper Functions
// ============================================================================

fn service(uri: &str) -> HttpAnalysisService {
    HttpAnalysisService::new(uri, Duration::from_secs(5)).unwrap()
}

fn analysis_body() -> serde_json::Value {
    json!({
        "response": "That sounds like a lot to carry.",
        "resources": ["Guided breathing", "Journaling prompts"],
        "emotion": { "label": "sadness", "score": 0.91 },
        "sentiment": { "label": "NEGATIVE", "score": 0.88 },
        "risk_level": "low"
    })
}

// ============================================================================
// Success
// ============================================================================

#[tokio::test]
async fn test_analyze_text_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/analyze_text"))
        .and(body_json(json!({ "text": "I feel down today" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(analysis_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = assert_ok!(service(&mock_server.uri()).analyze_text("I feel down today").await);

    assert_eq!(result.response, "That sounds like a lot to carry.");
    assert_eq!(result.resources, vec!["Guided breathing", "Journaling prompts"]);
    assert_eq!(result.emotion.label, "sadness");
    assert_eq!(result.emotion.score, Some(0.91));
    assert!(result.is_low_risk());
    assert_eq!(result.sentiment.map(|s| s.label), Some("NEGATIVE".to_string()));
}

#[tokio::test]
async fn test_analyze_text_minimal_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/analyze_text"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "ok",
            "resources": [],
            "emotion": { "label": "joy" },
            "risk_level": "high",
            "unexpected": true
        })))
        .mount(&mock_server)
        .await;

    let result = assert_ok!(service(&mock_server.uri()).analyze_text("hi").await);

    assert!(result.resources.is_empty());
    assert_eq!(result.emotion.score, None);
    assert!(result.sentiment.is_none());
    assert!(!result.is_low_risk());
}

#[tokio::test]
async fn test_trailing_slash_in_base_url() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/analyze_text"))
        .respond_with(ResponseTemplate::new(200).set_body_json(analysis_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let uri = format!("{}/", mock_server.uri());
    assert_ok!(service(&uri).analyze_text("hello").await);
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn test_server_error_is_protocol_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/analyze_text"))
        .respond_with(ResponseTemplate::new(500).set_body_string("model not loaded"))
        .mount(&mock_server)
        .await;

    let result = service(&mock_server.uri()).analyze_text("hello").await;

    assert_eq!(
        result,
        Err(AnalysisError::Protocol {
            status: 500,
            message: "model not loaded".to_string()
        })
    );
}

#[tokio::test]
async fn test_invalid_json_is_malformed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/analyze_text"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&mock_server)
        .await;

    let result = service(&mock_server.uri()).analyze_text("hello").await;

    assert!(matches!(result, Err(AnalysisError::Malformed(_))));
}

#[tokio::test]
async fn test_missing_field_is_malformed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/analyze_text"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": "hi" })))
        .mount(&mock_server)
        .await;

    let result = service(&mock_server.uri()).analyze_text("hello").await;

    assert!(matches!(result, Err(AnalysisError::Malformed(_))));
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Start and drop a server so the port is known to be closed
    let uri = {
        let mock_server = MockServer::start().await;
        mock_server.uri()
    };

    let result = service(&uri).analyze_text("hello").await;

    assert!(matches!(result, Err(AnalysisError::Transport(_))));
}

#[tokio::test]
async fn test_slow_server_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/analyze_text"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(analysis_body())
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let svc = HttpAnalysisService::new(mock_server.uri(), Duration::from_millis(200)).unwrap();
    let err = assert_err!(svc.analyze_text("hello").await);

    assert!(matches!(err, AnalysisError::Transport(_)));
}
