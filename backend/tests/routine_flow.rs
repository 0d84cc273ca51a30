//! End-to-end routine generation: routes -> workflow -> Gemini client,
//! with the generation service mocked at the HTTP level.

use std::sync::Arc;

use axum::Router;
use bytes::Bytes;
use http::StatusCode;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use wellspace_backend::config::{
    Config, CorsConfig, DatabaseConfig, GeminiConfig, LoggingConfig,
};
use wellspace_backend::test_util::MockGeminiResponse;
use wellspace_backend::{routes, AppState, GeminiClient, KvStore};

const GENERATE_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

async fn create_test_state(mock_server: &MockServer) -> Arc<AppState> {
    let config = Config {
        host: "127.0.0.1".to_string(),
        port: 8080,
        gemini: GeminiConfig {
            base_url: mock_server.uri(),
            api_key: "test-key".to_string(),
            model: "gemini-2.5-flash".to_string(),
        },
        database: DatabaseConfig {
            url: ":memory:".to_string(),
        },
        logging: LoggingConfig {
            level: "info".to_string(),
        },
        cors: CorsConfig {
            origins: "*".to_string(),
        },
    };

    let store = Arc::new(KvStore::open(&config.database.url).unwrap());
    let generator = Arc::new(GeminiClient::new(
        &config.gemini.base_url,
        &config.gemini.api_key,
        &config.gemini.model,
    ));
    Arc::new(AppState::new(config, store, generator))
}

fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(routes::auth::router(state.clone()))
        .merge(routes::routine::router(state))
}

async fn send_request(
    app: &Router,
    method: http::Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut req_builder = http::Request::builder().method(method).uri(uri);
    if body.is_some() {
        req_builder = req_builder.header("Content-Type", "application/json");
    }
    let req = req_builder
        .body(if let Some(b) = body {
            axum::body::Body::from(Bytes::from(b.to_string()))
        } else {
            axum::body::Body::empty()
        })
        .unwrap();

    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

async fn sign_up(app: &Router) {
    send_request(
        app,
        http::Method::POST,
        "/auth/signup",
        Some(json!({ "name": "Ada", "email": "ada@example.com", "password": "hunter2" })),
    )
    .await;
}

#[tokio::test]
async fn generated_plan_is_returned_sorted_and_persisted() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockGeminiResponse::plan(&[
            (2, &["Stretch for 5 minutes"]),
            (1, &["10-min guided meditation", "Drink water"]),
        ])))
        .mount(&mock_server)
        .await;

    let app = app(create_test_state(&mock_server).await);
    sign_up(&app).await;

    let (status, plan) = send_request(
        &app,
        http::Method::POST,
        "/routine/generate",
        Some(json!({ "free_minutes": 30 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(plan[0]["day"], 1);
    assert_eq!(plan[1]["day"], 2);
    assert_eq!(plan[0]["tasks"][0], "10-min guided meditation");
    assert_eq!(plan[0]["completed"], false);

    let (_, body) = send_request(&app, http::Method::GET, "/routine", None).await;
    assert_eq!(body["plan"].as_array().unwrap().len(), 2);
    assert_eq!(body["completed_days"], json!([]));
}

#[tokio::test]
async fn malformed_entries_are_dropped_end_to_end() {
    let mock_server = MockServer::start().await;
    let text = json!([
        { "day": 9, "tasks": ["Evening walk"] },
        { "day": 4, "tasks": "not an array" },
        { "day": 2, "tasks": ["Morning stretch"] }
    ])
    .to_string();
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(MockGeminiResponse::with_text(&text)),
        )
        .mount(&mock_server)
        .await;

    let app = app(create_test_state(&mock_server).await);
    sign_up(&app).await;

    let (_, plan) = send_request(
        &app,
        http::Method::POST,
        "/routine/generate",
        Some(json!({ "free_minutes": 15 })),
    )
    .await;

    let days: Vec<u64> = plan
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["day"].as_u64().unwrap())
        .collect();
    assert_eq!(days, vec![2, 9]);
}

#[tokio::test]
async fn service_failure_serves_the_fallback_plan() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(MockGeminiResponse::error_json("model overloaded")),
        )
        .mount(&mock_server)
        .await;

    let app = app(create_test_state(&mock_server).await);
    sign_up(&app).await;

    // A completed day from a previous plan must not survive regeneration.
    send_request(&app, http::Method::POST, "/routine/days/1/toggle", None).await;

    let (status, plan) = send_request(
        &app,
        http::Method::POST,
        "/routine/generate",
        Some(json!({ "free_minutes": 45 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(plan.as_array().unwrap().len(), 3);
    assert_eq!(plan[2]["tasks"][0], "Error generating plan.");

    let (_, body) = send_request(&app, http::Method::GET, "/routine", None).await;
    assert_eq!(body["completed_days"], json!([]));
}

#[tokio::test]
async fn empty_candidates_also_fall_back() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockGeminiResponse::empty()))
        .mount(&mock_server)
        .await;

    let app = app(create_test_state(&mock_server).await);
    sign_up(&app).await;

    let (_, plan) = send_request(
        &app,
        http::Method::POST,
        "/routine/generate",
        Some(json!({ "free_minutes": 30 })),
    )
    .await;

    assert_eq!(plan.as_array().unwrap().len(), 3);
    assert_eq!(plan[0]["tasks"][0], "5-minute deep breathing exercise.");
}

#[tokio::test]
async fn invalid_free_minutes_is_a_client_error() {
    let mock_server = MockServer::start().await;
    let app = app(create_test_state(&mock_server).await);
    sign_up(&app).await;

    let (status, _) = send_request(
        &app,
        http::Method::POST,
        "/routine/generate",
        Some(json!({ "free_minutes": 20 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn clearing_the_plan_removes_completion_state() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockGeminiResponse::plan(&[(
            1,
            &["Drink water"],
        )])))
        .mount(&mock_server)
        .await;

    let app = app(create_test_state(&mock_server).await);
    sign_up(&app).await;

    send_request(
        &app,
        http::Method::POST,
        "/routine/generate",
        Some(json!({ "free_minutes": 30 })),
    )
    .await;
    send_request(&app, http::Method::POST, "/routine/days/1/toggle", None).await;

    let (status, _) = send_request(&app, http::Method::DELETE, "/routine", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send_request(&app, http::Method::GET, "/routine", None).await;
    assert_eq!(body["plan"], Value::Null);
    assert_eq!(body["completed_days"], json!([]));
}
