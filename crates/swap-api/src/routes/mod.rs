//! API route handlers

pub mod health;
pub mod node;
pub mod swap;
pub mod tx;
pub mod wallet;

use axum::{http::StatusCode, routing::get, Json, Router};

use crate::dto::ApiError;
use crate::AppState;

/// Handler error: status plus JSON body
pub type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

/// Create the API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/node", node::router())
        .nest("/wallet", wallet::router())
        .nest("/swap", swap::router())
        .nest("/tx", tx::router())
        .with_state(state)
}

/// Map a core error to its HTTP status and error code
pub(crate) fn error_response(err: swap_core::Error) -> (StatusCode, Json<ApiError>) {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ApiError::new(err.error_code(), err.to_string())))
}

pub(crate) fn node_unavailable() -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(ApiError::new("node_unavailable", "Node not connected")),
    )
}

#[cfg(test)]
pub(crate) mod test_util {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use swap_core::{AppConfig, NodeConfig};
    use tower::ServiceExt;

    use crate::{create_app, AppState};

    /// State whose node is never reachable
    pub fn offline_state() -> AppState {
        AppState::with_config(AppConfig {
            node: NodeConfig {
                url: "http://127.0.0.1:1".to_string(),
                request_timeout_secs: 1,
            },
            ..AppConfig::default()
        })
    }

    pub async fn send(
        state: &AppState,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => request
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        let response = create_app(state.clone()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }
}
