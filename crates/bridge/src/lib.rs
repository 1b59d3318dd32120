pub mod allowance;
pub mod client;
pub mod error;
pub mod normalize;
pub mod plan;
pub mod rpc;
pub mod service;
#[cfg(test)]
pub(crate) mod testing;

pub use client::{ChainClient, ClientError};
pub use error::BridgeError;
pub use plan::{BridgeCall, BridgeCallPlan, Direction};
pub use service::{BridgeConfig, BridgeService};

/// A raw bridge request as it arrives from the caller.
///
/// Everything is optional-ish on purpose: the normalizer fills in defaults
/// (source chain, recipient) and resolves the native-asset marker before any
/// network activity happens. `amount` is a decimal string in the chain's
/// native units (e.g. `"0.01"` for 0.01 BNB).
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeRequest {
    /// Source chain; defaults to BSC when absent.
    #[serde(default)]
    pub source_chain: Option<utils::Chain>,
    pub destination_chain: utils::Chain,
    /// Token to bridge. Absent, or the native marker (`"BNB"`, case
    /// insensitive), means the native asset.
    #[serde(default)]
    pub source_token: Option<String>,
    /// Token address on the destination chain. Required when depositing a
    /// non-native token from the L1 side; the orchestrator never probes a
    /// token registry to infer it.
    #[serde(default)]
    pub destination_token: Option<String>,
    #[serde(default)]
    pub amount: Option<String>,
    /// Recipient on the destination chain; defaults to the sender.
    #[serde(default)]
    pub recipient: Option<String>,
}

/// Outcome of a submitted bridge transaction.
///
/// Produced once the bridge call has a transaction hash; the transfer itself
/// completes on the destination chain minutes later.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeResult {
    pub source_chain: utils::Chain,
    pub destination_chain: utils::Chain,
    /// Bridged token address, or the native symbol for the native asset.
    pub source_token: String,
    pub destination_token: String,
    /// Decimal amount as requested.
    pub amount: String,
    pub recipient: String,
    pub transaction_hash: String,
}
