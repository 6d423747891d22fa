//! Node status endpoint

use axum::{extract::State, routing::get, Json, Router};
use evm_node_client::NodeCapabilities;
use uniswap_v2::check_bridge;

use crate::dto::NodeStatusResponse;
use crate::routes::ApiResult;
use crate::AppState;

/// Create node routes
pub fn router() -> Router<AppState> {
    Router::new().route("/status", get(get_status))
}

/// GET /node/status - Probe the configured node
pub async fn get_status(State(state): State<AppState>) -> ApiResult<NodeStatusResponse> {
    let config = state.config();
    let expected = config.chain.chain_id;

    let (caps, bridge_matches) = match state.node_client().await {
        Some(client) => {
            let caps = client.probe(expected).await;
            let bridge_matches = if caps.is_online {
                check_bridge(&client, &config.chain).await.ok()
            } else {
                None
            };
            (caps, bridge_matches)
        }
        None => (NodeCapabilities::offline(expected), None),
    };

    Ok(Json(NodeStatusResponse {
        connected: caps.is_online,
        url: config.node.url.clone(),
        network: config.chain.network.as_str().to_string(),
        chain_id: caps.chain_id,
        expected_chain_id: caps.expected_chain_id,
        block_number: caps.block_number,
        capability_tier: caps.capability_tier.as_str().to_string(),
        bridge_matches,
    }))
}
