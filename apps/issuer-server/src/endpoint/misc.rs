use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::metrics::encode_metrics;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 204, description = "No content")
    ),
    tag = "other",
    summary = "Health check",
    description = "Returns a `204` response when the system is healthy.",
)]
pub(crate) async fn health_check() -> impl IntoResponse {
    StatusCode::NO_CONTENT
}

#[utoipa::path(
    get,
    path = "/metrics",
    responses(
        (status = 200, description = "OK"),
        (status = 500, description = "Internal error")
    ),
    tag = "other",
    summary = "Retrieve metrics",
    description = "Returns request counters and response times in the prometheus text format.",
)]
pub(crate) async fn get_metrics() -> Response {
    match encode_metrics() {
        Ok(result) => (StatusCode::OK, result).into_response(),
        Err(error) => {
            tracing::error!("Metrics encoding error: {error:?}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Metrics encoding error: {error:?}"),
            )
                .into_response()
        }
    }
}
