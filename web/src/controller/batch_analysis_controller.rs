use crate::extractors::json_object::JsonObject;
use crate::params::analysis::BatchAnalyzeParams;
use crate::{AppState, Error};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use domain::batch as BatchApi;

use log::*;

/// POST analyze the sentiment of up to 50 texts
#[utoipa::path(
    post,
    path = "/batch-analyze",
    request_body = BatchAnalyzeParams,
    responses(
        (status = 200, description = "Sentiment label and score for every non-blank text", body = domain::BatchAnalysis),
        (status = 400, description = "Missing texts, not a list of strings, or more than 50 texts"),
        (status = 500, description = "Internal Server Error")
    )
)]
pub async fn batch_analyze(
    State(app_state): State<AppState>,
    JsonObject(params): JsonObject<BatchAnalyzeParams>,
) -> Result<impl IntoResponse, Error> {
    let entries = BatchApi::validate_batch(params.texts()?)?;
    let texts = BatchAnalyzeParams::entry_texts(entries)?;
    debug!("POST batch-analyze {} texts", texts.len());

    let batch = BatchApi::analyze_batch(app_state.sentiment_scorer(), &texts)?;

    Ok((StatusCode::OK, Json(batch)))
}

#[cfg(test)]
mod tests {
    use crate::controller::test_helpers::{app_with, post_json};
    use axum::http::StatusCode;
    use domain::test_support::{FailingScorer, KeywordScorer};
    use inference::providers::VaderScorer;
    use serde_json::json;

    #[tokio::test]
    async fn test_batch_skips_blank_items() {
        let app = app_with(KeywordScorer, None);

        let (status, body) = post_json(
            app,
            "/batch-analyze",
            json!({ "texts": ["good", "bad", "   "] }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "results": [
                    { "index": 0, "text": "good", "sentiment": "positive", "score": 0.4404 },
                    { "index": 1, "text": "bad", "sentiment": "negative", "score": 0.5423 }
                ],
                "total": 2
            })
        );
    }

    #[tokio::test]
    async fn test_batch_keeps_original_indices() {
        let app = app_with(KeywordScorer, None);

        let (_, body) = post_json(
            app,
            "/batch-analyze",
            json!({ "texts": ["", null, "good"] }),
        )
        .await;

        assert_eq!(body["total"], 1);
        assert_eq!(body["results"][0]["index"], 2);
    }

    #[tokio::test]
    async fn test_batch_truncates_long_text() {
        let app = app_with(VaderScorer::new(), None);
        let long = format!("{} I love it", "word ".repeat(40));

        let (_, body) = post_json(app, "/batch-analyze", json!({ "texts": [long] })).await;

        let echoed = body["results"][0]["text"].as_str().unwrap();
        assert_eq!(echoed.chars().count(), 103);
        assert!(echoed.ends_with("..."));
        assert_eq!(body["results"][0]["sentiment"], "positive");
    }

    #[tokio::test]
    async fn test_batch_size_boundary() {
        let fifty = vec!["good"; 50];
        let fifty_one = vec!["good"; 51];

        let (status, body) = post_json(
            app_with(KeywordScorer, None),
            "/batch-analyze",
            json!({ "texts": fifty }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 50);

        let (status, body) = post_json(
            app_with(KeywordScorer, None),
            "/batch-analyze",
            json!({ "texts": fifty_one }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("50"));
    }

    #[tokio::test]
    async fn test_batch_missing_texts_is_400() {
        let (status, body) =
            post_json(app_with(KeywordScorer, None), "/batch-analyze", json!({})).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("\"texts\""));
    }

    #[tokio::test]
    async fn test_batch_texts_not_a_list_is_400() {
        let (status, body) = post_json(
            app_with(KeywordScorer, None),
            "/batch-analyze",
            json!({ "texts": "good" }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("list"));
    }

    #[tokio::test]
    async fn test_batch_size_is_checked_before_entry_types() {
        let mut texts = vec![json!("good"); 50];
        texts.push(json!(7));

        let (status, body) = post_json(
            app_with(KeywordScorer, None),
            "/batch-analyze",
            json!({ "texts": texts }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Maximum 50 texts per request" }));
    }

    #[tokio::test]
    async fn test_batch_entry_of_wrong_type_is_400() {
        let (status, body) = post_json(
            app_with(KeywordScorer, None),
            "/batch-analyze",
            json!({ "texts": ["good", 7] }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "\"texts\" must be a list of strings" }));
    }

    #[tokio::test]
    async fn test_batch_exclamation_on_plain_statement_is_neutral() {
        let (status, body) = post_json(
            app_with(VaderScorer::new(), None),
            "/batch-analyze",
            json!({ "texts": ["The meeting is at noon!", "Where is the station??"] }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        for result in body["results"].as_array().unwrap() {
            assert_eq!(result["sentiment"], "neutral", "{result}");
            assert_eq!(result["score"], 0.0);
        }
    }

    #[tokio::test]
    async fn test_batch_scorer_failure_is_500() {
        let (status, body) = post_json(
            app_with(FailingScorer, None),
            "/batch-analyze",
            json!({ "texts": ["good"] }),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].is_string());
    }
}
