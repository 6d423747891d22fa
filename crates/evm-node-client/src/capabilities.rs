//! Node capability detection
//!
//! Detects whether the node is reachable and serves the expected chain.

use serde::{Deserialize, Serialize};

use crate::NodeClient;

/// Capability tier based on probe results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum CapabilityTier {
    /// Online and on the configured chain - all features available
    Full,
    /// Online but serving a different chain; contract addresses will not match
    WrongChain,
    /// Not reachable
    Offline,
}

impl CapabilityTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Full => "Full",
            Self::WrongChain => "WrongChain",
            Self::Offline => "Offline",
        }
    }
}

/// Node capabilities detected through probing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeCapabilities {
    /// Node is reachable and responding
    pub is_online: bool,

    /// Chain id reported by the node
    pub chain_id: Option<u64>,

    /// Chain id the configuration expects
    pub expected_chain_id: u64,

    /// Latest block number
    pub block_number: u64,

    /// Capability tier
    pub capability_tier: CapabilityTier,
}

impl NodeCapabilities {
    pub fn offline(expected_chain_id: u64) -> Self {
        Self {
            is_online: false,
            chain_id: None,
            expected_chain_id,
            block_number: 0,
            capability_tier: CapabilityTier::Offline,
        }
    }

    /// Build from probe results
    pub fn from_probe(chain_id: u64, expected_chain_id: u64, block_number: u64) -> Self {
        let capability_tier = if chain_id == expected_chain_id {
            CapabilityTier::Full
        } else {
            CapabilityTier::WrongChain
        };

        Self {
            is_online: true,
            chain_id: Some(chain_id),
            expected_chain_id,
            block_number,
            capability_tier,
        }
    }

    pub fn chain_matches(&self) -> bool {
        self.chain_id == Some(self.expected_chain_id)
    }
}

/// Detect node capabilities by probing endpoints
pub async fn detect_capabilities(node: &NodeClient, expected_chain_id: u64) -> NodeCapabilities {
    let block_number = match node.block_number().await {
        Ok(n) => n,
        Err(e) => {
            tracing::warn!("Node probe failed: {}", e);
            return NodeCapabilities::offline(expected_chain_id);
        }
    };

    let chain_id = match node.chain_id().await {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!("Node chain id unavailable: {}", e);
            return NodeCapabilities::offline(expected_chain_id);
        }
    };

    let caps = NodeCapabilities::from_probe(chain_id, expected_chain_id, block_number);
    if caps.capability_tier == CapabilityTier::WrongChain {
        tracing::warn!(
            chain_id,
            expected_chain_id,
            "Node serves a different chain than configured"
        );
    }
    caps
}
