//! Swap Routes
//!
//! Quote and approval results are published to the session under a
//! sequence number; a response computed for an outdated request is marked
//! stale and does not replace the session state.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use evm_node_client::NodeClient;
use swap_core::constants::{DEFAULT_AMOUNT_IN, NATIVE_SENTINEL};
use swap_core::{parse_address, AssetId};
use uniswap_v2::{
    build_approval_tx, fetch_asset_info, fetch_decimals, needs_approval, prepare_swap, quote,
    resolve_path, QuoteRequest, SwapRequest,
};

use crate::dto::{
    ApiError, ApprovalApiRequest, ApprovalApiResponse, ApproveBuildRequest, ApproveBuildResponse,
    AssetInfoResponse, DecimalsResponse, PathRequest, PathResponse, QuoteApiRequest,
    QuoteApiResponse, SessionApprovalDto, SessionQuoteDto, SessionResponse, SwapBuildApiRequest,
    SwapBuildApiResponse, SwapDefaultsResponse, TokenRequest,
};
use crate::routes::{error_response, node_unavailable, ApiResult};
use crate::AppState;

/// Create swap routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/decimals", post(get_decimals))
        .route("/asset", post(get_asset))
        .route("/path", post(get_path))
        .route("/quote", post(get_quote))
        .route("/approval", post(check_approval))
        .route("/approve/build", post(build_approve))
        .route("/build", post(build_swap))
        .route("/session", get(get_session))
        .route("/defaults", get(get_defaults))
}

/// Use the caller's precision if given, otherwise read it from the token
async fn decimals_for(client: Option<&NodeClient>, given: Option<u8>, token: &str) -> u8 {
    match given {
        Some(d) => d,
        None => fetch_decimals(client, token).await,
    }
}

fn parse_asset(input: &str) -> Result<AssetId, (StatusCode, Json<ApiError>)> {
    AssetId::parse(input).map_err(|e| error_response(e.into()))
}

/// POST /swap/decimals - Decimal precision of an asset
async fn get_decimals(
    State(state): State<AppState>,
    Json(request): Json<TokenRequest>,
) -> ApiResult<DecimalsResponse> {
    let client = state.node_client().await;
    let decimals = fetch_decimals(client.as_ref(), &request.token).await;
    Ok(Json(DecimalsResponse {
        token: request.token,
        decimals,
    }))
}

/// POST /swap/asset - Symbol, decimals, and balance
async fn get_asset(
    State(state): State<AppState>,
    Json(request): Json<TokenRequest>,
) -> ApiResult<AssetInfoResponse> {
    let asset = parse_asset(&request.token)?;
    let account = match request.account.as_deref() {
        Some(text) => Some(parse_address(text).ok_or_else(|| {
            (
                StatusCode::BAD_REQUEST,
                Json(ApiError::new("invalid_address", format!("Invalid account: {}", text))),
            )
        })?),
        None => state.account().await,
    };
    let client = state.node_client().await.ok_or_else(node_unavailable)?;

    let info = fetch_asset_info(&client, &asset, account)
        .await
        .map_err(error_response)?;
    Ok(Json(info.into()))
}

/// POST /swap/path - Direct or bridged route
async fn get_path(
    State(state): State<AppState>,
    Json(request): Json<PathRequest>,
) -> ApiResult<PathResponse> {
    let token_in = parse_asset(&request.token_in)?;
    let token_out = parse_asset(&request.token_out)?;
    let client = state.node_client().await.ok_or_else(node_unavailable)?;

    let path = resolve_path(&client, &state.config().chain, &token_in, &token_out)
        .await
        .map_err(|e| error_response(e.into()))?;
    Ok(Json(PathResponse::from(&path)))
}

/// POST /swap/quote - Recompute the quote from scratch
async fn get_quote(
    State(state): State<AppState>,
    Json(request): Json<QuoteApiRequest>,
) -> ApiResult<QuoteApiResponse> {
    let config = state.config();
    let slot = &state.session().quote;
    let ticket = slot.begin();

    let client = state.node_client().await;
    let decimals_in = decimals_for(client.as_ref(), request.decimals_in, &request.token_in).await;
    let decimals_out =
        decimals_for(client.as_ref(), request.decimals_out, &request.token_out).await;

    let quote_request = QuoteRequest::new(&request.token_in, &request.token_out, &request.amount_in)
        .with_decimals(decimals_in, decimals_out);
    let result = quote(client.as_ref(), &config.chain, &quote_request).await;

    let published = slot.publish(ticket, result.clone()).await;
    Ok(Json(QuoteApiResponse {
        seq: ticket.seq(),
        quote: result.quote.to_string(),
        amount_out_raw: result.quote.amount_out().map(|v| v.to_string()),
        executable: result.quote.is_executable(),
        path: PathResponse::from(&result.path).path,
        stale: !published,
    }))
}

/// POST /swap/approval - Whether the router needs an allowance first
async fn check_approval(
    State(state): State<AppState>,
    Json(request): Json<ApprovalApiRequest>,
) -> ApiResult<ApprovalApiResponse> {
    let config = state.config();
    let slot = &state.session().approval;
    let ticket = slot.begin();

    let client = state.node_client().await;
    let account = state.account().await;
    let decimals_in = decimals_for(client.as_ref(), request.decimals_in, &request.token_in).await;

    let needed = needs_approval(
        client.as_ref(),
        &config.chain,
        account,
        &request.token_in,
        &request.amount_in,
        decimals_in,
    )
    .await;

    let published = slot.publish(ticket, needed).await;
    Ok(Json(ApprovalApiResponse {
        seq: ticket.seq(),
        needs_approval: needed,
        stale: !published,
    }))
}

/// POST /swap/approve/build - Unsigned `approve(router, amount)`
async fn build_approve(
    State(state): State<AppState>,
    Json(request): Json<ApproveBuildRequest>,
) -> ApiResult<ApproveBuildResponse> {
    let account = state.account().await;
    let token_in = parse_asset(&request.token_in)?;
    let client = state.node_client().await;
    let decimals_in = decimals_for(client.as_ref(), request.decimals_in, &request.token_in).await;

    let tx = build_approval_tx(
        &state.config().chain,
        account,
        &token_in,
        &request.amount_in,
        decimals_in,
    )
    .map_err(error_response)?;
    Ok(Json(ApproveBuildResponse::from(&tx)))
}

/// POST /swap/build - Unsigned router call for the quoted swap
async fn build_swap(
    State(state): State<AppState>,
    Json(request): Json<SwapBuildApiRequest>,
) -> ApiResult<SwapBuildApiResponse> {
    let config = state.config();
    let account = state.account().await;
    let client = state.node_client().await.ok_or_else(node_unavailable)?;

    let decimals_in = decimals_for(Some(&client), request.decimals_in, &request.token_in).await;
    let decimals_out = decimals_for(Some(&client), request.decimals_out, &request.token_out).await;

    let swap_request = SwapRequest {
        token_in: request.token_in,
        token_out: request.token_out,
        amount_in: request.amount_in,
        decimals_in,
        decimals_out,
        quote: request.quote,
    };

    let tx = prepare_swap(&client, &config.chain, &config.policy, &swap_request, account)
        .await
        .map_err(|e| {
            tracing::debug!("Swap not built: {}", e);
            error_response(e)
        })?;
    Ok(Json(SwapBuildApiResponse::from(&tx)))
}

/// GET /swap/session - Latest published quote and approval flag
async fn get_session(State(state): State<AppState>) -> ApiResult<SessionResponse> {
    let session = state.session();
    let quote = session
        .quote
        .latest_with_seq()
        .await
        .map(|(seq, q)| SessionQuoteDto {
            seq,
            quote: q.quote.to_string(),
            path: PathResponse::from(&q.path).path,
        });
    let approval = session
        .approval
        .latest_with_seq()
        .await
        .map(|(seq, needs_approval)| SessionApprovalDto {
            seq,
            needs_approval,
        });
    Ok(Json(SessionResponse { quote, approval }))
}

/// GET /swap/defaults - Initial form values
async fn get_defaults(State(state): State<AppState>) -> ApiResult<SwapDefaultsResponse> {
    Ok(Json(SwapDefaultsResponse {
        token_in: NATIVE_SENTINEL.to_string(),
        token_out: state.config().default_token_out.to_string(),
        amount_in: DEFAULT_AMOUNT_IN.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::routes::test_util::{offline_state, send};
    use crate::AppState;

    const USDC: &str = "0x1c7D4B196Cb0C7B01d743Fbc6116a902379C7238";
    const USER: &str = "0x00000000000000000000000000000000000000a1";

    async fn connected_state() -> AppState {
        let state = offline_state();
        state.set_wallet(USER).await.unwrap();
        state
    }

    #[tokio::test]
    async fn test_form_defaults() {
        let (status, body) = send(&offline_state(), "GET", "/swap/defaults", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["token_in"], "ETH");
        assert_eq!(body["amount_in"], "0.01");
        assert_eq!(
            body["token_out"].as_str().unwrap().to_lowercase(),
            USDC.to_lowercase()
        );
    }

    #[tokio::test]
    async fn test_native_decimals() {
        let (status, body) =
            send(&offline_state(), "POST", "/swap/decimals", Some(json!({ "token": "ETH" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["decimals"], 18);
    }

    #[tokio::test]
    async fn test_empty_amount_quote_is_idle_and_published() {
        let state = offline_state();
        let (status, body) = send(
            &state,
            "POST",
            "/swap/quote",
            Some(json!({ "token_in": "ETH", "token_out": USDC, "amount_in": "", "decimals_out": 6 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["quote"], "-");
        assert_eq!(body["executable"], false);
        assert_eq!(body["stale"], false);
        assert_eq!(body["seq"], 1);

        let (_, session) = send(&state, "GET", "/swap/session", None).await;
        assert_eq!(session["quote"]["quote"], "-");
        assert_eq!(session["quote"]["seq"], 1);
    }

    #[tokio::test]
    async fn test_unreachable_node_quote_error() {
        let (status, body) = send(
            &offline_state(),
            "POST",
            "/swap/quote",
            Some(json!({
                "token_in": "ETH",
                "token_out": USDC,
                "amount_in": "0.01",
                "decimals_in": 18,
                "decimals_out": 6
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["quote"], "Quote error");
    }

    #[tokio::test]
    async fn test_native_input_needs_no_approval() {
        let state = connected_state().await;
        let (status, body) = send(
            &state,
            "POST",
            "/swap/approval",
            Some(json!({ "token_in": "ETH", "amount_in": "1" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["needs_approval"], false);

        let (_, session) = send(&state, "GET", "/swap/session", None).await;
        assert_eq!(session["approval"]["needs_approval"], false);
    }

    #[tokio::test]
    async fn test_unreadable_allowance_needs_approval() {
        let state = connected_state().await;
        let (_, body) = send(
            &state,
            "POST",
            "/swap/approval",
            Some(json!({ "token_in": USDC, "amount_in": "1", "decimals_in": 6 })),
        )
        .await;
        assert_eq!(body["needs_approval"], true);
    }

    #[tokio::test]
    async fn test_approve_build() {
        let state = offline_state();
        let request = json!({ "token_in": USDC, "amount_in": "1", "decimals_in": 6 });

        let (status, body) =
            send(&state, "POST", "/swap/approve/build", Some(request.clone())).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], "wallet_not_connected");

        state.set_wallet(USER).await.unwrap();
        let (status, body) = send(&state, "POST", "/swap/approve/build", Some(request)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["amount"], "1000000");
        assert!(body["unsigned_tx"]["data"]
            .as_str()
            .unwrap()
            .starts_with("0x095ea7b3"));

        let (status, body) = send(
            &state,
            "POST",
            "/swap/approve/build",
            Some(json!({ "token_in": "ETH", "amount_in": "1" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], "native_asset_approval");
    }

    #[tokio::test]
    async fn test_swap_build_preconditions() {
        let request = json!({
            "token_in": "ETH",
            "token_out": USDC,
            "amount_in": "0.01",
            "quote": "No liquidity",
            "decimals_out": 6
        });

        let (status, body) =
            send(&offline_state(), "POST", "/swap/build", Some(request.clone())).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], "wallet_not_connected");

        let state = connected_state().await;
        let (status, body) = send(&state, "POST", "/swap/build", Some(request)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], "quote_unavailable");
    }

    #[tokio::test]
    async fn test_swap_build_rejects_bad_token() {
        let state = connected_state().await;
        let (status, body) = send(
            &state,
            "POST",
            "/swap/build",
            Some(json!({
                "token_in": "0xabc",
                "token_out": USDC,
                "amount_in": "1",
                "quote": "30",
                "decimals_in": 18,
                "decimals_out": 6
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "invalid_asset");
    }
}
