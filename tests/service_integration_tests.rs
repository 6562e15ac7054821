use std::time::Duration;

use emotioneye::analysis::{
    AnalysisOutcome, AnalysisRequest, EmotionService, Endpoints, HttpEmotionService, ServiceError,
};
use serde_json::json;
use tokio_test::{assert_err, assert_ok};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path},
};

// ============================================================================
// Helper Functions
// ============================================================================

fn service_for(server: &MockServer) -> HttpEmotionService {
    HttpEmotionService::new(Endpoints::with_base(server.uri()), Duration::from_secs(5))
        .expect("client should build")
}

fn request(message: &str) -> AnalysisRequest {
    AnalysisRequest::from_input(message).expect("non-empty message")
}

fn joy_body() -> serde_json::Value {
    json!({
        "reply": "That's wonderful to hear!",
        "emotion": "joy",
        "confidence": 0.873,
        "quranic_aayat": "فَإِنَّ مَعَ الْعُسْرِ يُسْرًا",
        "translation": "For indeed, with hardship will be ease.",
        "original_classification": "joy"
    })
}

// ============================================================================
// POST /analyze
// ============================================================================

#[tokio::test]
async fn test_analyze_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/analyze"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "message": "I feel great today" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(joy_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    let outcome = assert_ok!(service.analyze(&request("  I feel great today ")).await);

    match outcome {
        AnalysisOutcome::Analyzed(analysis) => {
            assert_eq!(analysis.reply, "That's wonderful to hear!");
            assert_eq!(analysis.emotion, "joy");
            assert!((analysis.confidence - 0.873).abs() < f64::EPSILON);
            assert_eq!(analysis.overridden_classification(), None);
        }
        other => panic!("Expected Analyzed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_analyze_reports_corrected_classification() {
    let mock_server = MockServer::start().await;

    let mut body = joy_body();
    body["emotion"] = json!("sadness");
    body["original_classification"] = json!("joy");

    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    let outcome = assert_ok!(service.analyze(&request("I'm not happy")).await);

    match outcome {
        AnalysisOutcome::Analyzed(analysis) => {
            assert_eq!(analysis.emotion, "sadness");
            assert_eq!(analysis.overridden_classification(), Some("joy"));
        }
        other => panic!("Expected Analyzed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_analyze_error_field_is_rejection() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "error": "Model not loaded" })),
        )
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    let outcome = assert_ok!(service.analyze(&request("hello")).await);

    assert_eq!(outcome, AnalysisOutcome::Rejected("Model not loaded".to_string()));
}

#[tokio::test]
async fn test_analyze_server_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    let err = assert_err!(service.analyze(&request("hello")).await);

    assert_eq!(
        err,
        ServiceError::Status {
            status: 500,
            message: "Internal Server Error".to_string()
        }
    );
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn test_analyze_malformed_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    let err = assert_err!(service.analyze(&request("hello")).await);

    assert!(matches!(err, ServiceError::Parse(_)), "got {err:?}");
}

#[tokio::test]
async fn test_analyze_missing_field() {
    let mock_server = MockServer::start().await;

    let mut body = joy_body();
    body.as_object_mut().unwrap().remove("translation");

    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    let err = assert_err!(service.analyze(&request("hello")).await);

    assert_eq!(
        err,
        ServiceError::Parse("missing field `translation`".to_string())
    );
}

#[tokio::test]
async fn test_analyze_timeout_is_network_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(joy_body())
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let service = HttpEmotionService::new(
        Endpoints::with_base(mock_server.uri()),
        Duration::from_millis(200),
    )
    .expect("client should build");
    let err = assert_err!(service.analyze(&request("hello")).await);

    assert!(matches!(err, ServiceError::Network(_)), "got {err:?}");
}

#[tokio::test]
async fn test_unreachable_service_is_network_error() {
    // Nothing listens on port 1
    let service = HttpEmotionService::new(
        Endpoints::with_base("http://127.0.0.1:1"),
        Duration::from_secs(2),
    )
    .expect("client should build");

    let err = assert_err!(service.analyze(&request("hello")).await);
    assert!(matches!(err, ServiceError::Network(_)), "got {err:?}");
}

// ============================================================================
// GET /sentiment-trend
// ============================================================================

#[tokio::test]
async fn test_sentiment_trend_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sentiment-trend"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "sadness": 2, "joy": 4, "anger": 1 })),
        )
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    let trend = assert_ok!(service.sentiment_trend().await);

    let entries: Vec<(&str, u64)> = trend.iter().collect();
    assert_eq!(entries, vec![("anger", 1), ("joy", 4), ("sadness", 2)]);
}

#[tokio::test]
async fn test_sentiment_trend_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sentiment-trend"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    let trend = assert_ok!(service.sentiment_trend().await);
    assert!(trend.is_empty());
}

#[tokio::test]
async fn test_sentiment_trend_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sentiment-trend"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    let err = assert_err!(service.sentiment_trend().await);
    assert!(matches!(err, ServiceError::Status { status: 503, .. }), "got {err:?}");
}

#[tokio::test]
async fn test_sentiment_trend_rejects_negative_counts() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sentiment-trend"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "joy": -1 })))
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    let err = assert_err!(service.sentiment_trend().await);
    assert!(matches!(err, ServiceError::Parse(_)), "got {err:?}");
}

// ============================================================================
// GET /health
// ============================================================================

#[tokio::test]
async fn test_health_reports_model_state() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "status": "healthy", "model_loaded": true })),
        )
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    let report = assert_ok!(service.health().await);

    assert!(report.is_healthy());
    assert_eq!(report.model_loaded, Some(true));
}

#[tokio::test]
async fn test_health_unhealthy_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "status": "unhealthy", "model_loaded": false })),
        )
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    let report = assert_ok!(service.health().await);
    assert!(!report.is_healthy());
}

// ============================================================================
// Endpoint dispatch
// ============================================================================

#[tokio::test]
async fn test_api_prefix_is_used_for_remote_hosts() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/sentiment-trend"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "joy": 1 })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let endpoints = Endpoints::dispatch(
        "emotioneye.example",
        &mock_server.uri(),
        "http://localhost:5000",
        "/api",
    );
    let service = HttpEmotionService::new(endpoints, Duration::from_secs(5))
        .expect("client should build");

    let trend = assert_ok!(service.sentiment_trend().await);
    assert_eq!(trend.get("joy"), Some(1));
}
