use alloy::primitives::{Address, Bytes, TxHash, U256};
use alloy::sol_types::{Panic, Revert, SolError};
use async_trait::async_trait;
use utils::Chain;

/// Failure surfaced by a [`ChainClient`] implementation.
///
/// The underlying RPC stack does not expose structured error codes, so
/// everything except a decoded revert travels as text. Classification into
/// the caller-facing taxonomy happens in [`crate::error`].
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// A call or dry-run reverted. `reason` carries the decoded revert
    /// string when the contract supplied one.
    #[error("reverted: {reason}")]
    Reverted { reason: String },
    #[error("rpc error: {0}")]
    Rpc(String),
    #[error("no provider configured for chain {0}")]
    UnknownChain(Chain),
    #[error("timed out waiting for receipt of {0}")]
    ReceiptTimeout(TxHash),
}

/// Read and write operations the orchestrator needs against one chain's RPC
/// endpoint at a time.
///
/// Production uses [`crate::rpc::RpcClient`]; tests substitute a recording
/// mock. Implementations are expected to be cheap to share across tasks,
/// but note that two concurrent bridge attempts spending the same token are
/// the caller's problem to serialize (see [`crate::allowance`]).
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// The transaction signer's address. Used as the allowance owner and as
    /// the default recipient.
    fn sender(&self) -> Address;

    /// Selects the chain all subsequent operations run against.
    async fn switch_chain(&self, chain: Chain) -> Result<(), ClientError>;

    /// Read-only contract call; returns the raw ABI-encoded output.
    async fn read(&self, to: Address, calldata: Bytes) -> Result<Bytes, ClientError>;

    /// `allowance(owner, spender)` on an ERC-20 token.
    async fn get_allowance(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
    ) -> Result<U256, ClientError>;

    /// Submits `approve(spender, amount)` on an ERC-20 token.
    async fn approve(
        &self,
        token: Address,
        spender: Address,
        amount: U256,
    ) -> Result<TxHash, ClientError>;

    /// Blocks until the transaction is mined and returns its success status.
    async fn wait_for_receipt(&self, tx: TxHash) -> Result<bool, ClientError>;

    /// Dry-runs a call against current state without broadcasting anything.
    /// A revert resolves to [`ClientError::Reverted`].
    async fn simulate(&self, to: Address, calldata: Bytes, value: U256)
        -> Result<(), ClientError>;

    /// Signs and broadcasts a transaction, returning its hash without
    /// waiting for a receipt.
    async fn send(&self, to: Address, calldata: Bytes, value: U256)
        -> Result<TxHash, ClientError>;
}

/// Best-effort extraction of a human-readable reason from raw revert data.
///
/// Handles the standard `Error(string)` and `Panic(uint256)` encodings;
/// custom errors come back as `None` and surface as plain revert data
/// upstream.
pub(crate) fn decode_revert_reason(data: &[u8]) -> Option<String> {
    if data.is_empty() {
        return None;
    }
    if let Ok(revert) = Revert::abi_decode(data, true) {
        return Some(revert.reason);
    }
    if let Ok(panic) = Panic::abi_decode(data, true) {
        return Some(panic.to_string());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    // abi-encoded Error("Invalid signature order")
    const ERROR_STRING_REVERT: &str = "08c379a000000000000000000000000000000000000000000000000000000000000000200000000000000000000000000000000000000000000000000000000000000017496e76616c6964207369676e6174757265206f72646572000000000000000000";

    #[test]
    fn decodes_error_string_revert() {
        let data = hex::decode(ERROR_STRING_REVERT).unwrap();
        assert_eq!(
            decode_revert_reason(&data).as_deref(),
            Some("Invalid signature order")
        );
    }

    #[test]
    fn empty_and_custom_revert_data_decode_to_none() {
        assert_eq!(decode_revert_reason(&[]), None);
        // four-byte custom error selector with no registry to resolve it
        assert_eq!(decode_revert_reason(&[0x1a, 0xc6, 0x69, 0x08]), None);
    }
}
