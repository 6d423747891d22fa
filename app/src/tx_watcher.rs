//! Background transaction watcher
//!
//! Polls the node for the receipt of the most recently submitted transaction
//! and records whether it confirmed, reverted, or was never mined.

use std::time::Duration;

use swap_api::{AppState, PendingStatus};
use tokio::task::JoinHandle;

/// How often the background task polls the node (seconds).
const POLL_INTERVAL_SECS: u64 = 5;

/// Transactions older than this are marked timed out (seconds).
const TIMEOUT_SECS: u64 = 40 * 60; // 40 minutes

/// Check the pending transaction once.
///
/// Returns the new status when it became final during this poll.
pub async fn poll_once(state: &AppState, timeout: Duration) -> Option<PendingStatus> {
    let record = state.pending().await?;
    if record.status.is_final() {
        return None;
    }
    let hash = record.tx.hash;

    if record.recorded_at.elapsed() > timeout {
        tracing::warn!(%hash, "Transaction not mined after {}s", timeout.as_secs());
        state.update_pending_status(hash, PendingStatus::Timeout).await;
        return Some(PendingStatus::Timeout);
    }

    let client = state.node_client().await?;
    let status = match client.transaction_status(hash).await {
        Ok(status) => PendingStatus::from(status),
        Err(e) => {
            tracing::debug!(%hash, "Receipt lookup failed: {}", e);
            return None;
        }
    };

    if !status.is_final() {
        return None;
    }

    // a newer submission may have replaced this one while we waited
    if !state.update_pending_status(hash, status).await {
        return None;
    }
    match status {
        PendingStatus::Reverted { .. } => tracing::warn!(%hash, "Transaction reverted"),
        _ => tracing::info!(%hash, status = status.as_str(), "Transaction resolved"),
    }
    Some(status)
}

/// Start the polling loop.
pub fn spawn(state: AppState) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(POLL_INTERVAL_SECS));
        let timeout = Duration::from_secs(TIMEOUT_SECS);
        loop {
            interval.tick().await;
            poll_once(&state, timeout).await;
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::B256;
    use swap_core::{AppConfig, NodeConfig};
    use uniswap_v2::{PendingKind, PendingTransaction};

    fn offline_state() -> AppState {
        AppState::with_config(AppConfig {
            node: NodeConfig {
                url: "http://127.0.0.1:1".to_string(),
                request_timeout_secs: 1,
            },
            ..AppConfig::default()
        })
    }

    fn submission() -> PendingTransaction {
        PendingTransaction {
            hash: B256::repeat_byte(0x22),
            kind: PendingKind::Approval,
            submitted_at: 1_700_000_000,
        }
    }

    #[tokio::test]
    async fn test_nothing_to_watch() {
        assert_eq!(poll_once(&offline_state(), Duration::from_secs(60)).await, None);
    }

    #[tokio::test]
    async fn test_timeout() {
        let state = offline_state();
        state.set_pending(submission()).await;
        tokio::time::sleep(Duration::from_millis(5)).await;

        let status = poll_once(&state, Duration::ZERO).await;
        assert_eq!(status, Some(PendingStatus::Timeout));
        assert_eq!(state.pending().await.unwrap().status, PendingStatus::Timeout);

        // final records are left alone
        assert_eq!(poll_once(&state, Duration::ZERO).await, None);
    }

    #[tokio::test]
    async fn test_unreachable_node_stays_pending() {
        let state = offline_state();
        state.set_pending(submission()).await;

        assert_eq!(poll_once(&state, Duration::from_secs(60)).await, None);
        assert_eq!(state.pending().await.unwrap().status, PendingStatus::Pending);
    }
}
