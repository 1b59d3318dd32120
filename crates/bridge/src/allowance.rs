use alloy::primitives::{Address, U256};
use tracing::{debug, info};

use crate::client::ChainClient;
use crate::error::{classify, BridgeError};

/// Ensures `spender` may move at least `amount` of `token` on behalf of the
/// client's sender.
///
/// The common path reads the current allowance and returns without
/// submitting anything. Only on a shortfall does it approve -- for the full
/// required amount -- and block until that approval is mined. An approval
/// that cannot be confirmed, or confirms with a failure status, surfaces as
/// [`BridgeError::AllowanceApprovalFailed`].
///
/// Two concurrent attempts for the same (owner, token, spender) may both
/// observe a shortfall and both approve; callers needing that guarantee
/// must serialize externally.
pub async fn ensure_allowance(
    client: &dyn ChainClient,
    token: Address,
    spender: Address,
    amount: U256,
) -> Result<(), BridgeError> {
    let owner = client.sender();
    let allowance = client
        .get_allowance(token, owner, spender)
        .await
        .map_err(classify)?;
    debug!(%token, %spender, %allowance, %amount, "checked allowance");

    if allowance >= amount {
        return Ok(());
    }

    let tx = client
        .approve(token, spender, amount)
        .await
        .map_err(classify)?;
    info!(%token, %spender, %amount, %tx, "submitted approval");

    let confirmed = client
        .wait_for_receipt(tx)
        .await
        .map_err(|err| BridgeError::AllowanceApprovalFailed(err.to_string()))?;
    if !confirmed {
        return Err(BridgeError::AllowanceApprovalFailed(format!(
            "approval {tx} reverted"
        )));
    }
    Ok(())
}
