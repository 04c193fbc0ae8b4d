use axum::{Json, extract::State, http::StatusCode};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

use crate::error::KeywordError;
use crate::seo::SeoKeywordGenerator;

use super::models::{ErrorResponse, KeywordRequest, KeywordResponse};

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, message: &str) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}

/// A `null` body is treated like an empty object.
pub async fn keywords_handler(
    State(generator): State<Arc<SeoKeywordGenerator>>,
    Json(request): Json<Option<KeywordRequest>>,
) -> Result<Json<KeywordResponse>, ApiError> {
    let start = Instant::now();
    let request = request.unwrap_or_default();
    info!(
        title = %request.title,
        description = %request.description,
        "keyword request received"
    );

    let title = request.title.trim().to_string();
    let description = request.description.trim().to_string();

    if title.is_empty() {
        warn!("keyword request without a title");
        return Err(api_error(StatusCode::BAD_REQUEST, "Missing title"));
    }

    let keywords = generator
        .generate(title, description)
        .await
        .map_err(|e| match e {
            KeywordError::MissingTitle => api_error(StatusCode::BAD_REQUEST, "Missing title"),
            other => {
                error!(error = %other, "keyword generation failed");
                api_error(StatusCode::INTERNAL_SERVER_ERROR, "Server error")
            }
        })?;

    let processing_time_ms = start.elapsed().as_millis();
    info!(count = keywords.len(), processing_time_ms, "keywords generated");

    Ok(Json(KeywordResponse {
        keywords,
        processing_time_ms,
    }))
}
