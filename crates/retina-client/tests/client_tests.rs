//! Client tests against an in-process fake prediction service.

use axum::body::Bytes;
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use retina_client::client::{CLASSES_FAILED_MESSAGE, PREDICTION_FAILED_MESSAGE};
use retina_client::PredictionClient;
use retina_core::error::{CONNECTIVITY_MESSAGE, MALFORMED_PREDICTION_MESSAGE};
use retina_core::notification::MODEL_NOT_LOADED_MESSAGE;
use retina_core::upload::validate;
use retina_core::{
    CandidateFile, ClientConfig, NotificationLevel, Pipeline, PredictionService, RetinaError,
    Severity,
};

/// Serve `router` on an ephemeral port and return its API base URL.
async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}/api", addr)
}

/// A base URL nothing listens on.
async fn dead_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/api", addr)
}

fn client(base_url: &str) -> PredictionClient {
    PredictionClient::new(ClientConfig::with_url(base_url).unwrap())
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

fn moderate() -> Value {
    json!({
        "severity_value": 2,
        "severity_class": "Moderate",
        "confidence": 73.4,
        "probabilities": {
            "No DR": 5, "Mild": 10, "Moderate": 73.4, "Severe": 8, "Proliferative DR": 3.6
        },
        "info": {
            "level": "Moderate",
            "risk": "Medium",
            "description": "Moderate non-proliferative diabetic retinopathy detected.",
            "recommendation": "Consult with an ophthalmologist within 3-6 months. Close monitoring required.",
            "color": "#f59e0b"
        }
    })
}

fn no_dr() -> Value {
    json!({
        "severity_value": 0,
        "severity_class": "No DR",
        "confidence": 97.25,
        "probabilities": {"No DR": 97.25, "Mild": 2.75},
        "info": {
            "risk": "Low",
            "description": "No signs of diabetic retinopathy detected.",
            "recommendation": "Continue regular eye examinations and maintain good blood sugar control."
        }
    })
}

/// `/predict` handler that insists on a multipart `file` field.
async fn strict_predict(headers: HeaderMap, body: Bytes) -> (StatusCode, Json<Value>) {
    let is_multipart = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("multipart/form-data"));
    if !is_multipart || !contains(&body, b"name=\"file\"") {
        return (StatusCode::BAD_REQUEST, Json(json!({"error": "No file provided"})));
    }
    if !contains(&body, b"filename=\"left.png\"") || !contains(&body, b"image/png") {
        return (StatusCode::BAD_REQUEST, Json(json!({"error": "bad part headers"})));
    }
    (StatusCode::OK, Json(moderate()))
}

fn left_png() -> CandidateFile {
    CandidateFile::new("left.png", "image/png", vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a])
}

#[tokio::test]
async fn test_predict_sends_multipart_file() {
    let url = spawn(Router::new().route("/api/predict", post(strict_predict))).await;
    let file = validate(left_png()).unwrap();

    let result = client(&url).predict(&file).await.unwrap();
    assert_eq!(result.severity_value, Severity::Moderate);
    assert_eq!(result.confidence, 73.4);
    assert_eq!(result.probability("Proliferative DR"), 3.6);
    assert_eq!(result.info.risk, "Medium");
}

#[tokio::test]
async fn test_error_message_surfaced_verbatim() {
    let url = spawn(Router::new().route(
        "/api/predict",
        post(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "model unavailable"})),
            )
        }),
    ))
    .await;
    let file = validate(left_png()).unwrap();

    let err = client(&url).predict(&file).await.unwrap_err();
    assert_eq!(err.to_string(), "model unavailable");
    assert!(matches!(err, RetinaError::Transport { status: Some(500), .. }));
}

#[tokio::test]
async fn test_error_without_message_is_generic() {
    let url = spawn(Router::new().route(
        "/api/predict",
        post(|| async { (StatusCode::BAD_GATEWAY, "<html>Bad Gateway</html>") }),
    ))
    .await;
    let file = validate(left_png()).unwrap();

    let err = client(&url).predict(&file).await.unwrap_err();
    assert_eq!(err.to_string(), PREDICTION_FAILED_MESSAGE);
}

#[tokio::test]
async fn test_malformed_success_body() {
    let url = spawn(Router::new().route(
        "/api/predict",
        post(|| async { Json(json!({"severity_value": 2})) }),
    ))
    .await;
    let file = validate(left_png()).unwrap();

    let err = client(&url).predict(&file).await.unwrap_err();
    assert_eq!(err.to_string(), MALFORMED_PREDICTION_MESSAGE);
    assert!(!err.is_connectivity());
}

#[tokio::test]
async fn test_out_of_range_severity_is_malformed() {
    let mut body = moderate();
    body["severity_value"] = json!(5);
    let url = spawn(Router::new().route(
        "/api/predict",
        post(move || {
            let body = body.clone();
            async move { Json(body) }
        }),
    ))
    .await;
    let file = validate(left_png()).unwrap();

    let err = client(&url).predict(&file).await.unwrap_err();
    assert_eq!(err.to_string(), MALFORMED_PREDICTION_MESSAGE);
}

#[tokio::test]
async fn test_unreachable_service() {
    let url = dead_url().await;
    let file = validate(left_png()).unwrap();
    let client = client(&url);

    let err = client.predict(&file).await.unwrap_err();
    assert!(err.is_connectivity());
    assert_eq!(err.to_string(), CONNECTIVITY_MESSAGE);

    assert!(client.health().await.unwrap_err().is_connectivity());
    assert!(client.classes().await.unwrap_err().is_connectivity());
}

#[tokio::test]
async fn test_health_reports_model_state() {
    let url = spawn(Router::new().route(
        "/api/health",
        get(|| async { Json(json!({"status": "healthy", "model_loaded": true, "device": "cpu"})) }),
    ))
    .await;

    let health = client(&url).health().await.unwrap();
    assert!(health.is_model_loaded());
    assert_eq!(health.device.as_deref(), Some("cpu"));
}

#[tokio::test]
async fn test_unreadable_health_counts_as_connectivity() {
    let url = spawn(Router::new().route("/api/health", get(|| async { "ok" }))).await;
    assert!(client(&url).health().await.unwrap_err().is_connectivity());
}

#[tokio::test]
async fn test_classes_catalog() {
    let url = spawn(Router::new().route(
        "/api/classes",
        get(|| async {
            Json(json!({
                "classes": ["No DR", "Mild", "Moderate", "Severe", "Proliferative DR"],
                "info": [{"risk": "Low", "description": "d", "recommendation": "r", "level": "No DR"}]
            }))
        }),
    ))
    .await;

    let catalog = client(&url).classes().await.unwrap();
    assert_eq!(catalog.classes.len(), 5);
    assert_eq!(catalog.info[0].level.as_deref(), Some("No DR"));
}

#[tokio::test]
async fn test_classes_failure_message() {
    let url = spawn(Router::new().route(
        "/api/classes",
        get(|| async { StatusCode::NOT_FOUND }),
    ))
    .await;

    let err = client(&url).classes().await.unwrap_err();
    assert_eq!(err.to_string(), CLASSES_FAILED_MESSAGE);
}

#[tokio::test]
async fn test_unloaded_model_warns_but_analysis_works() {
    let url = spawn(
        Router::new()
            .route("/api/health", get(|| async { Json(json!({"model_loaded": false})) }))
            .route("/api/predict", post(strict_predict)),
    )
    .await;
    let mut pipeline = Pipeline::new(Arc::new(client(&url)));

    let note = pipeline.check_health().await.unwrap();
    assert_eq!(note.level, NotificationLevel::Warning);
    assert_eq!(note.message, MODEL_NOT_LOADED_MESSAGE);

    pipeline.select(left_png()).unwrap();
    let model = pipeline.submit().await.unwrap();
    assert_eq!(model.color, "#f59e0b");
}

#[tokio::test]
async fn test_pipeline_failure_returns_to_ready() {
    let url = spawn(Router::new().route(
        "/api/predict",
        post(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "model unavailable"})),
            )
        }),
    ))
    .await;
    let mut pipeline = Pipeline::new(Arc::new(client(&url)));
    pipeline.select(left_png()).unwrap();

    let err = pipeline.submit().await.unwrap_err();
    assert_eq!(err.notification().message, "model unavailable");
    let state = pipeline.state();
    assert!(!state.busy);
    assert!(state.can_submit);
    assert!(state.result.is_none());
}

#[tokio::test]
async fn test_sequential_submissions_replace_render() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let url = spawn(Router::new().route(
        "/api/predict",
        post(move || {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            async move { Json(if n == 0 { moderate() } else { no_dr() }) }
        }),
    ))
    .await;
    let mut pipeline = Pipeline::new(Arc::new(client(&url)));
    pipeline.select(left_png()).unwrap();

    let first = pipeline.submit().await.unwrap().clone();
    assert_eq!(first.ring.label, "73.4%");

    let second = pipeline.submit().await.unwrap().clone();
    assert_eq!(second.color, "#10b981");
    assert_eq!(second.ring.label, "97.25%");
    let widths: Vec<f64> = second.bars.iter().map(|b| b.width_percent).collect();
    assert_eq!(widths, vec![97.25, 2.75, 0.0, 0.0, 0.0]);
    assert_eq!(pipeline.last_render(), Some(&second));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}
