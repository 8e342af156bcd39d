use crate::controller::{analysis_controller, batch_analysis_controller, health_check_controller};
use crate::AppState;
use axum::{
    routing::{get, post},
    Router,
};

use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

// This is the global definition of our OpenAPI spec. To be a part
// of the rendered spec, a path and schema must be listed here.
#[derive(OpenApi)]
#[openapi(
        info(
            title = "AI Text Analysis Service API"
        ),
        paths(
            health_check_controller::health_check,
            analysis_controller::analyze,
            batch_analysis_controller::batch_analyze,
        ),
        components(
            schemas(
                domain::Analysis,
                domain::BatchAnalysis,
                domain::BatchItem,
                domain::Emotion,
                domain::Metadata,
                domain::Sentiment,
                domain::SentimentDetails,
                domain::SentimentLabel,
                crate::params::analysis::AnalyzeParams,
                crate::params::analysis::BatchAnalyzeParams,
            )
        ),
        tags(
            (name = "ai_service", description = "Sentiment and emotion analysis of text")
        )
    )]
struct ApiDoc;

pub fn define_routes(app_state: AppState) -> Router {
    Router::new()
        .merge(health_routes(app_state.clone()))
        .merge(analysis_routes(app_state))
        .merge(RapiDoc::with_openapi("/api-docs/openapi.json", ApiDoc::openapi()).path("/rapidoc"))
}

fn health_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check_controller::health_check))
        .with_state(app_state)
}

fn analysis_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/analyze", post(analysis_controller::analyze))
        .route(
            "/batch-analyze",
            post(batch_analysis_controller::batch_analyze),
        )
        .with_state(app_state)
}
