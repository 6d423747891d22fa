//! swapd application library

pub mod tx_watcher;

use anyhow::Context;
use swap_api::AppState;
use swap_core::AppConfig;

/// Run the swap backend until Ctrl-C
pub async fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("swapd_lib=debug".parse()?)
                .add_directive("uniswap_v2=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .init();

    let config = AppConfig::load().context("loading configuration")?;
    tracing::info!(
        network = %config.chain.network,
        rpc = %config.node.url,
        router = %config.chain.router,
        "Starting swapd"
    );

    let state = AppState::with_config(config);

    if let Some(client) = state.node_client().await {
        let caps = client.probe(state.config().chain.chain_id).await;
        tracing::info!(
            online = caps.is_online,
            block = caps.block_number,
            tier = caps.capability_tier.as_str(),
            "Node probe"
        );
        if caps.is_online {
            match uniswap_v2::check_bridge(&client, &state.config().chain).await {
                Ok(true) => tracing::debug!("Router bridge asset matches configuration"),
                Ok(false) => {}
                Err(e) => tracing::warn!("Could not read router WETH(): {}", e),
            }
        }
    }

    let watcher = tx_watcher::spawn(state.clone());

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    };
    let result = swap_api::start_server(state, shutdown)
        .await
        .context("running API server");

    watcher.abort();
    result
}
