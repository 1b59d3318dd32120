use alloy::primitives::{address, Address, U256};
use alloy::sol_types::SolCall;
use tracing::{debug, info};
use utils::Chain;

use crate::allowance::ensure_allowance;
use crate::client::{ChainClient, ClientError};
use crate::error::{classify, BridgeError};
use crate::normalize::{normalize, NormalizedRequest};
use crate::plan::{delegationFeeCall, select_call, BridgeCallPlan, Direction};
use crate::{BridgeRequest, BridgeResult};

/// Bridge contract deployment for one L1/L2 chain pair.
///
/// Addresses are injected per instance so mainnet and testnet orchestrators
/// can coexist in one process.
#[derive(Debug, Clone, Copy)]
pub struct BridgeConfig {
    pub l1_chain: Chain,
    pub l2_chain: Chain,
    /// Standard bridge proxy on the L1 side; deposits enter here.
    pub l1_bridge: Address,
    /// Withdrawal bot on the L2 side; charges the delegation fee.
    pub l2_bridge: Address,
}

impl BridgeConfig {
    pub fn mainnet() -> Self {
        Self {
            l1_chain: Chain::Bsc,
            l2_chain: Chain::OpBnb,
            l1_bridge: address!("f05f0e4362859c3331cb9395cbc201e3fa6757ea"),
            l2_bridge: address!("4000698e3de52120deb63bff456a9e071c707cf3"),
        }
    }

    pub fn testnet() -> Self {
        Self {
            l1_chain: Chain::BscTestnet,
            l2_chain: Chain::OpBnbTestnet,
            l1_bridge: address!("677311fd2ccc511bbc0f581e8d9a07b033d5e840"),
            l2_bridge: address!("4000698e3de52120deb63bff456a9e071c707cf3"),
        }
    }
}

/// Orchestrates one bridge attempt end to end: normalize, resolve the
/// direction, top up the allowance for token transfers, select the contract
/// entry point, dry-run, submit.
#[derive(Debug)]
pub struct BridgeService<C> {
    config: BridgeConfig,
    client: C,
}

impl<C: ChainClient> BridgeService<C> {
    pub fn new(config: BridgeConfig, client: C) -> Self {
        Self { config, client }
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Supported chain registry, for surfacing through the HTTP layer.
    pub fn get_supported_chains(&self) -> Vec<&'static utils::ChainData> {
        utils::get_supported_chains().values().copied().collect()
    }

    /// Bridges `request`, returning once the bridge transaction has a hash.
    ///
    /// Only the allowance approval waits for a receipt. The bridge
    /// transaction itself is returned on submission: bridge confirmations
    /// take minutes, so callers poll the destination chain separately.
    pub async fn bridge(&self, request: &BridgeRequest) -> Result<BridgeResult, BridgeError> {
        let normalized = normalize(&self.config, request)?;
        debug!(
            direction = ?normalized.direction,
            source = %normalized.source_chain,
            destination = %normalized.destination_chain,
            "normalized bridge request"
        );

        self.client
            .switch_chain(normalized.source_chain)
            .await
            .map_err(classify)?;

        if let Some(token) = normalized.source_token {
            let spender = normalized.direction.contract(&self.config);
            ensure_allowance(&self.client, token, spender, normalized.amount).await?;
        }

        let delegation_fee = match normalized.direction {
            Direction::Deposit => U256::ZERO,
            Direction::Withdrawal => self.delegation_fee().await?,
        };

        let plan = select_call(&self.config, &normalized, delegation_fee)?;
        let transaction_hash = self.execute(&plan).await?;
        info!(
            %transaction_hash,
            function = plan.call.function_name(),
            "bridge transaction submitted"
        );

        Ok(self.result_for(&normalized, transaction_hash))
    }

    /// Reads the withdrawal surcharge from the L2 bridge. Queried fresh for
    /// every withdrawal attempt; the contract owner can change it.
    async fn delegation_fee(&self) -> Result<U256, BridgeError> {
        let calldata = delegationFeeCall {}.abi_encode();
        let raw = self
            .client
            .read(self.config.l2_bridge, calldata.into())
            .await
            .map_err(classify)?;
        let decoded = delegationFeeCall::abi_decode_returns(&raw, true)
            .map_err(|err| BridgeError::Unknown(format!("bad delegationFee response: {err}")))?;
        Ok(decoded._0)
    }

    /// Dry-runs the plan, then broadcasts it.
    ///
    /// A revert during the dry-run fails with
    /// [`BridgeError::SimulationReverted`] and nothing is broadcast. On
    /// success the transaction hash is returned without waiting for a
    /// receipt.
    async fn execute(&self, plan: &BridgeCallPlan) -> Result<String, BridgeError> {
        self.client.switch_chain(plan.chain).await.map_err(classify)?;
        let calldata = plan.call.calldata();

        match self
            .client
            .simulate(plan.contract, calldata.clone(), plan.value)
            .await
        {
            Ok(()) => {}
            Err(ClientError::Reverted { reason }) => {
                return Err(BridgeError::SimulationReverted(reason));
            }
            Err(other) => return Err(classify(other)),
        }

        let tx = self
            .client
            .send(plan.contract, calldata, plan.value)
            .await
            .map_err(classify)?;
        Ok(tx.to_string())
    }

    fn result_for(&self, normalized: &NormalizedRequest, transaction_hash: String) -> BridgeResult {
        let native = normalized.source_chain.data().native_symbol;
        BridgeResult {
            source_chain: normalized.source_chain,
            destination_chain: normalized.destination_chain,
            source_token: normalized
                .source_token
                .map(|token| token.to_string())
                .unwrap_or_else(|| native.to_string()),
            destination_token: normalized
                .destination_token
                .map(|token| token.to_string())
                .unwrap_or_else(|| native.to_string()),
            amount: normalized.amount_text.clone(),
            recipient: normalized
                .recipient
                .unwrap_or_else(|| self.client.sender())
                .to_string(),
            transaction_hash,
        }
    }
}
