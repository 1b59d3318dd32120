use crate::client::ClientError;

/// Caller-facing failure taxonomy for one bridge attempt.
///
/// The validation variants are raised before any RPC call and are never
/// retried. Chain-side failures are surfaced as-is; the orchestrator never
/// resubmits a bridge transaction on its own.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// Malformed request that doesn't fit a more specific variant.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("unsupported bridge direction: {source} -> {destination}")]
    UnsupportedDirection {
        source: utils::Chain,
        destination: utils::Chain,
    },
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    /// A token deposit from the L1 side needs the caller to supply the
    /// destination token address.
    #[error("destination token address is required when depositing a token from {0}")]
    MissingDestinationToken(utils::Chain),
    #[error("invalid address: {0}")]
    InvalidAddress(String),
    /// The approval was submitted but never confirmed, or confirmed with a
    /// failure status.
    #[error("allowance approval failed: {0}")]
    AllowanceApprovalFailed(String),
    /// The dry-run reverted; the bridge transaction was never broadcast.
    #[error("simulation reverted: {0}")]
    SimulationReverted(String),
    #[error("insufficient funds for bridge transaction")]
    InsufficientFunds,
    #[error("transaction rejected by signer")]
    UserRejected,
    /// The broadcast transaction failed on chain.
    #[error("execution reverted: {0}")]
    ExecutionReverted(String),
    #[error("bridge failed: {0}")]
    Unknown(String),
}

/// Maps a chain-client failure onto the caller-facing taxonomy.
///
/// The RPC layer reports most failures as free text, so this is substring
/// matching on the rendered error -- a known fragility of the collaborator's
/// error surface. Every such match lives here; nothing outside this function
/// inspects error strings.
pub(crate) fn classify(err: ClientError) -> BridgeError {
    if let ClientError::Reverted { reason } = err {
        return BridgeError::ExecutionReverted(reason);
    }

    let text = err.to_string();
    let lower = text.to_lowercase();
    if lower.contains("insufficient funds") || lower.contains("insufficient balance") {
        BridgeError::InsufficientFunds
    } else if lower.contains("user rejected") || lower.contains("user denied") {
        BridgeError::UserRejected
    } else if lower.contains("execution reverted") || lower.contains("revert") {
        BridgeError::ExecutionReverted(text)
    } else {
        BridgeError::Unknown(text)
    }
}
