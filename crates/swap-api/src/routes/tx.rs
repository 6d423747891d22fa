//! Submitted transaction tracking

use std::str::FromStr;

use alloy::primitives::B256;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use uniswap_v2::{unix_now, PendingTransaction};

use crate::dto::{ApiError, PendingTxResponse, TxSubmittedRequest};
use crate::routes::ApiResult;
use crate::AppState;

/// Create transaction routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/submitted", post(record_submitted))
        .route("/pending", get(get_pending))
}

/// POST /tx/submitted - Wallet reports the hash of a broadcast transaction
async fn record_submitted(
    State(state): State<AppState>,
    Json(request): Json<TxSubmittedRequest>,
) -> ApiResult<PendingTxResponse> {
    let hash = B256::from_str(request.tx_hash.trim()).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiError::bad_request(format!(
                "Invalid transaction hash {:?}: {}",
                request.tx_hash, e
            ))),
        )
    })?;

    state
        .set_pending(PendingTransaction {
            hash,
            kind: request.kind,
            submitted_at: unix_now(),
        })
        .await;

    get_pending(State(state)).await
}

/// GET /tx/pending - Most recent submission and its status
async fn get_pending(State(state): State<AppState>) -> ApiResult<PendingTxResponse> {
    let record = state.pending().await.ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            Json(ApiError::not_found("No transaction submitted")),
        )
    })?;
    let explorer_url = state
        .config()
        .chain
        .explorer_link(&record.tx.hash.to_string());
    Ok(Json(PendingTxResponse::new(&record, explorer_url)))
}
