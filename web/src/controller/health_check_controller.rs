use crate::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

/// Name this service reports about itself.
pub(crate) const SERVICE_NAME: &str = "ai-service";

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct HealthStatus {
    status: String,
    service: String,
    /// Whether the emotion model loaded at startup.
    model_loaded: bool,
}

/// GET liveness and model readiness
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up; reports whether the emotion model loaded", body = HealthStatus),
    )
)]
pub async fn health_check(State(app_state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthStatus {
            status: "healthy".to_string(),
            service: SERVICE_NAME.to_string(),
            model_loaded: app_state.emotion_model_loaded(),
        }),
    )
}
