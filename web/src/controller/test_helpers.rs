//! Router construction and request helpers shared by controller tests.

use crate::{router, AppState};
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use inference::{EmotionClassifier, SentimentScorer};
use service::config::Config;
use service::Models;
use std::sync::Arc;
use tower::ServiceExt;

pub(crate) fn test_config() -> Config {
    <Config as clap::Parser>::try_parse_from(["ai_service"]).unwrap()
}

pub(crate) fn app_with(
    scorer: impl SentimentScorer + 'static,
    classifier: Option<Arc<dyn EmotionClassifier>>,
) -> Router {
    let models = Models {
        sentiment_scorer: Arc::new(scorer),
        emotion_classifier: classifier,
    };
    router::define_routes(AppState::new(test_config(), models))
}

pub(crate) async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

pub(crate) async fn post_json(
    app: Router,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    post_raw(app, uri, body.to_string()).await
}

pub(crate) async fn post_raw(
    app: Router,
    uri: &str,
    body: String,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}
