//! Health check endpoint

use axum::Json;

use crate::dto::HealthResponse;

/// GET /health - Check API health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::routes::test_util::{offline_state, send};

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(&offline_state(), "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }
}
