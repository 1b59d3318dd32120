//! Recording mock of the chain-client boundary for orchestrator tests.

use std::sync::Mutex;

use alloy::primitives::{address, b256, Address, Bytes, TxHash, U256};
use async_trait::async_trait;
use utils::Chain;

use crate::client::{ChainClient, ClientError};

pub(crate) const SENDER: Address = address!("1111111111111111111111111111111111111111");

const APPROVE_TX: TxHash =
    b256!("00000000000000000000000000000000000000000000000000000000000000a1");
const BRIDGE_TX: TxHash =
    b256!("00000000000000000000000000000000000000000000000000000000000000b2");

/// One operation observed at the client boundary, in invocation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Op {
    SwitchChain(Chain),
    Read {
        to: Address,
    },
    GetAllowance {
        token: Address,
        owner: Address,
        spender: Address,
    },
    Approve {
        token: Address,
        spender: Address,
        amount: U256,
    },
    WaitForReceipt(TxHash),
    Simulate {
        to: Address,
        value: U256,
    },
    Send {
        to: Address,
        value: U256,
    },
}

#[derive(Debug)]
pub(crate) struct MockClient {
    allowance: U256,
    delegation_fee: U256,
    simulate_revert: Option<String>,
    approval_succeeds: bool,
    ops: Mutex<Vec<Op>>,
}

impl MockClient {
    pub(crate) fn new() -> Self {
        Self {
            allowance: U256::ZERO,
            delegation_fee: U256::from(100u64),
            simulate_revert: None,
            approval_succeeds: true,
            ops: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_allowance(mut self, allowance: U256) -> Self {
        self.allowance = allowance;
        self
    }

    pub(crate) fn with_delegation_fee(mut self, fee: U256) -> Self {
        self.delegation_fee = fee;
        self
    }

    pub(crate) fn with_simulate_revert(mut self, reason: &str) -> Self {
        self.simulate_revert = Some(reason.to_string());
        self
    }

    pub(crate) fn with_failing_approval(mut self) -> Self {
        self.approval_succeeds = false;
        self
    }

    pub(crate) fn ops(&self) -> Vec<Op> {
        self.ops.lock().expect("ops lock poisoned").clone()
    }

    /// Number of submitted transactions (approvals + bridge calls).
    pub(crate) fn write_count(&self) -> usize {
        self.ops()
            .iter()
            .filter(|op| matches!(op, Op::Approve { .. } | Op::Send { .. }))
            .count()
    }

    fn record(&self, op: Op) {
        self.ops.lock().expect("ops lock poisoned").push(op);
    }
}

#[async_trait]
impl ChainClient for MockClient {
    fn sender(&self) -> Address {
        SENDER
    }

    async fn switch_chain(&self, chain: Chain) -> Result<(), ClientError> {
        self.record(Op::SwitchChain(chain));
        Ok(())
    }

    async fn read(&self, to: Address, _calldata: Bytes) -> Result<Bytes, ClientError> {
        self.record(Op::Read { to });
        Ok(self.delegation_fee.to_be_bytes::<32>().to_vec().into())
    }

    async fn get_allowance(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
    ) -> Result<U256, ClientError> {
        self.record(Op::GetAllowance {
            token,
            owner,
            spender,
        });
        Ok(self.allowance)
    }

    async fn approve(
        &self,
        token: Address,
        spender: Address,
        amount: U256,
    ) -> Result<TxHash, ClientError> {
        self.record(Op::Approve {
            token,
            spender,
            amount,
        });
        Ok(APPROVE_TX)
    }

    async fn wait_for_receipt(&self, tx: TxHash) -> Result<bool, ClientError> {
        self.record(Op::WaitForReceipt(tx));
        Ok(self.approval_succeeds)
    }

    async fn simulate(
        &self,
        to: Address,
        _calldata: Bytes,
        value: U256,
    ) -> Result<(), ClientError> {
        self.record(Op::Simulate { to, value });
        match &self.simulate_revert {
            Some(reason) => Err(ClientError::Reverted {
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }

    async fn send(&self, to: Address, _calldata: Bytes, value: U256) -> Result<TxHash, ClientError> {
        self.record(Op::Send { to, value });
        Ok(BRIDGE_TX)
    }
}
