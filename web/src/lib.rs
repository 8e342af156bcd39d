use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::Response;
use log::*;
use std::any::Any;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, Any as AnyOrigin, CorsLayer};

pub use self::error::{Error, Result};
pub use service::AppState;

mod controller;
mod error;
mod extractors;
mod params;
pub mod router;

pub async fn init_server(app_state: AppState) -> std::io::Result<()> {
    let config = app_state.config.clone();
    let server_url = format!("{}:{}", config.interface(), config.port);

    info!("Server starting... listening for connections on http://{server_url}");

    let cors_layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_origin(allowed_origin(&config));

    let app = router::define_routes(app_state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors_layer);

    let listener = TcpListener::bind(&server_url).await?;
    axum::serve(listener, app).await
}

/// Map the configured origins onto a CORS origin policy; `*` allows any origin.
fn allowed_origin(config: &service::config::Config) -> AllowOrigin {
    if config.allows_any_origin() {
        return AllowOrigin::from(AnyOrigin);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.trim().parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring invalid CORS origin {origin:?}: {e}");
                None
            }
        })
        .collect();

    info!("CORS allowed origins: {origins:?}");
    AllowOrigin::list(origins)
}

/// Render a handler panic as the same 500 body every other server error uses.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    error!("Handler panicked: {message}");
    error::error_body(
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("Server error: {message}"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::test_helpers::{send, test_config};
    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::get;
    use axum::Router;
    use clap::Parser;

    async fn panicking_handler() -> &'static str {
        panic!("scorer exploded")
    }

    #[tokio::test]
    async fn test_panics_become_500_with_error_field() {
        let app = Router::new()
            .route("/boom", get(panicking_handler))
            .layer(CatchPanicLayer::custom(handle_panic));
        let request = Request::builder().uri("/boom").body(Body::empty()).unwrap();

        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Server error: scorer exploded");
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin_by_default() {
        let app = Router::new()
            .route("/ping", get(|| async { "pong" }))
            .layer(CorsLayer::new().allow_origin(allowed_origin(&test_config())));
        let request = Request::builder()
            .uri("/ping")
            .header(header::ORIGIN, "http://somewhere.example")
            .body(Body::empty())
            .unwrap();

        let response = tower::ServiceExt::oneshot(app, request).await.unwrap();

        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
    }

    #[tokio::test]
    async fn test_cors_restricts_to_configured_origins() {
        let config = service::config::Config::try_parse_from([
            "ai_service",
            "--allowed-origins",
            "http://localhost:3000",
        ])
        .unwrap();
        let app = Router::new()
            .route("/ping", get(|| async { "pong" }))
            .layer(CorsLayer::new().allow_origin(allowed_origin(&config)));
        let request = Request::builder()
            .uri("/ping")
            .header(header::ORIGIN, "http://localhost:3000")
            .body(Body::empty())
            .unwrap();

        let response = tower::ServiceExt::oneshot(app, request).await.unwrap();

        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:3000"
        );
    }
}
