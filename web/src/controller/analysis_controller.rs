use crate::extractors::json_object::JsonObject;
use crate::params::analysis::AnalyzeParams;
use crate::{AppState, Error};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use domain::analysis as AnalysisApi;

use log::*;

/// POST analyze the sentiment and emotions of a single text
#[utoipa::path(
    post,
    path = "/analyze",
    request_body = AnalyzeParams,
    responses(
        (status = 200, description = "Sentiment, top emotions and metadata for the text", body = domain::Analysis),
        (status = 400, description = "Missing, empty, non-string or too long text"),
        (status = 500, description = "Internal Server Error")
    )
)]
pub async fn analyze(
    State(app_state): State<AppState>,
    JsonObject(params): JsonObject<AnalyzeParams>,
) -> Result<impl IntoResponse, Error> {
    let text = AnalysisApi::validate_text(params.text()?)?;
    debug!("POST analyze {} characters", text.chars().count());

    let analysis = AnalysisApi::analyze(
        app_state.sentiment_scorer(),
        app_state.emotion_classifier(),
        text,
    )
    .await?;

    Ok((StatusCode::OK, Json(analysis)))
}
