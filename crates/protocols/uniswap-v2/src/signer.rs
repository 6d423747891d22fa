//! Transaction submission through a server-side signer
//!
//! The HTTP surface hands unsigned transactions to a browser wallet, which
//! reports the broadcast hash back through `/tx/submitted`. Deployments that
//! hold a key themselves implement [`TransactionSigner`] and submit the same
//! built transactions with [`submit_swap`] / [`submit_approval`].

use alloy::primitives::B256;
use alloy::rpc::types::TransactionRequest;
use async_trait::async_trait;
use swap_core::{Result, TxError};

use crate::state::{ApprovalTransaction, PendingKind, PendingTransaction, SwapTransaction};
use crate::tx_builder::unix_now;

/// Wallet capability: sign and broadcast a request, returning its hash.
///
/// Rejections (user declined, insufficient funds) come back as errors.
#[async_trait]
pub trait TransactionSigner: Send + Sync {
    async fn send_transaction(&self, request: TransactionRequest) -> Result<B256>;
}

/// Submit a built swap. Failures are returned to the caller unchanged.
pub async fn submit_swap<S: TransactionSigner + ?Sized>(
    signer: &S,
    tx: &SwapTransaction,
) -> Result<PendingTransaction> {
    let hash = signer.send_transaction(tx.to_request()).await?;
    tracing::info!(%hash, kind = %tx.kind, "Swap submitted");
    Ok(PendingTransaction {
        hash,
        kind: PendingKind::Swap,
        submitted_at: unix_now(),
    })
}

/// Submit a built approval.
pub async fn submit_approval<S: TransactionSigner + ?Sized>(
    signer: &S,
    tx: &ApprovalTransaction,
) -> Result<PendingTransaction> {
    let hash = signer.send_transaction(tx.to_request()).await?;
    tracing::info!(%hash, token = %tx.token, "Approval submitted");
    Ok(PendingTransaction {
        hash,
        kind: PendingKind::Approval,
        submitted_at: unix_now(),
    })
}

/// Map a wallet-side failure into a submission error
pub fn submission_failed(message: impl Into<String>) -> swap_core::Error {
    TxError::SubmissionFailed {
        message: message.into(),
    }
    .into()
}
