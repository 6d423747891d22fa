//! Wallet connection endpoints
//!
//! Signing happens in the browser wallet; the server only tracks which
//! account is connected.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::dto::{ApiError, ConnectWalletRequest, WalletStatusResponse};
use crate::routes::ApiResult;
use crate::AppState;

/// Create wallet routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_wallet))
        .route("/connect", post(connect))
        .route("/disconnect", post(disconnect))
}

/// GET /wallet - Connected account
async fn get_wallet(State(state): State<AppState>) -> ApiResult<WalletStatusResponse> {
    Ok(Json(status(&state).await))
}

/// POST /wallet/connect - Record the account the wallet exposed
async fn connect(
    State(state): State<AppState>,
    Json(request): Json<ConnectWalletRequest>,
) -> ApiResult<WalletStatusResponse> {
    let address = state.set_wallet(&request.address).await.map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiError::new("invalid_address", e.to_string())),
        )
    })?;
    tracing::info!(%address, "Wallet connected");
    Ok(Json(status(&state).await))
}

/// POST /wallet/disconnect
async fn disconnect(State(state): State<AppState>) -> ApiResult<WalletStatusResponse> {
    state.disconnect_wallet().await;
    tracing::info!("Wallet disconnected");
    Ok(Json(status(&state).await))
}

async fn status(state: &AppState) -> WalletStatusResponse {
    match state.wallet().await {
        Some(wallet) => WalletStatusResponse {
            connected: true,
            address: Some(wallet.address.to_string()),
            connected_secs: Some(wallet.connected_at.elapsed().as_secs()),
        },
        None => WalletStatusResponse {
            connected: false,
            address: None,
            connected_secs: None,
        },
    }
}
