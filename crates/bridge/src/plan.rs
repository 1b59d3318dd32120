use alloy::primitives::{address, Address, Bytes, U256};
use alloy::sol;
use alloy::sol_types::SolCall;
use utils::Chain;

use crate::error::BridgeError;
use crate::normalize::NormalizedRequest;
use crate::service::BridgeConfig;

sol! {
    function depositETH(uint32 _minGasLimit, bytes _extraData) external payable;
    function depositETHTo(address _to, uint32 _minGasLimit, bytes _extraData) external payable;
    function depositERC20(address _l1Token, address _l2Token, uint256 _amount, uint32 _minGasLimit, bytes _extraData) external;
    function depositERC20To(address _l1Token, address _l2Token, address _to, uint256 _amount, uint32 _minGasLimit, bytes _extraData) external;
    function withdraw(address _l2Token, uint256 _amount, uint32 _minGasLimit, bytes _extraData) external payable;
    function withdrawTo(address _l2Token, address _to, uint256 _amount, uint32 _minGasLimit, bytes _extraData) external payable;
    function delegationFee() external view returns (uint256);
}

/// Messaging gas budget forwarded with every bridge call. The bridge
/// protocol reserves it for relaying the cross-chain message.
pub const MIN_GAS_LIMIT: u32 = 200_000;

/// opBNB-side representation of native BNB inside ERC-20-shaped withdrawal
/// calls. The L1 side never needs a sentinel: deposits of the native asset
/// go through dedicated entry points.
pub const LEGACY_ERC20_BNB: Address = address!("deaddeaddeaddeaddeaddeaddeaddeaddead0000");

/// Direction of a bridge transfer between the configured chain pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// L1 side to L2 side (BSC -> opBNB).
    Deposit,
    /// L2 side back to L1 (opBNB -> BSC).
    Withdrawal,
}

impl Direction {
    /// Resolves the direction for a `(source, destination)` pair against the
    /// configured chain pair, rejecting everything else.
    pub fn resolve(
        config: &BridgeConfig,
        source: Chain,
        destination: Chain,
    ) -> Result<Self, BridgeError> {
        if source == config.l1_chain && destination == config.l2_chain {
            Ok(Self::Deposit)
        } else if source == config.l2_chain && destination == config.l1_chain {
            Ok(Self::Withdrawal)
        } else {
            Err(BridgeError::UnsupportedDirection {
                source,
                destination,
            })
        }
    }

    /// The bridge contract this direction's calls target.
    pub fn contract(self, config: &BridgeConfig) -> Address {
        match self {
            Self::Deposit => config.l1_bridge,
            Self::Withdrawal => config.l2_bridge,
        }
    }
}

/// The concrete contract entry point selected for one attempt, with exactly
/// the arguments that go on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeCall {
    /// `depositETH`; the amount travels as call value.
    DepositNative,
    /// `depositETHTo`; the amount travels as call value.
    DepositNativeTo { recipient: Address },
    DepositErc20 {
        l1_token: Address,
        l2_token: Address,
        amount: U256,
    },
    DepositErc20To {
        l1_token: Address,
        l2_token: Address,
        recipient: Address,
        amount: U256,
    },
    /// `withdraw` on the L2 bridge; `token` is [`LEGACY_ERC20_BNB`] for the
    /// native asset.
    Withdraw { token: Address, amount: U256 },
    WithdrawTo {
        token: Address,
        recipient: Address,
        amount: U256,
    },
}

impl BridgeCall {
    /// ABI-encodes the call. `extraData` is always empty; the protocol
    /// reserves it for future use.
    pub fn calldata(&self) -> Bytes {
        let extra_data = Bytes::new();
        match self {
            Self::DepositNative => depositETHCall {
                _minGasLimit: MIN_GAS_LIMIT,
                _extraData: extra_data,
            }
            .abi_encode()
            .into(),
            Self::DepositNativeTo { recipient } => depositETHToCall {
                _to: *recipient,
                _minGasLimit: MIN_GAS_LIMIT,
                _extraData: extra_data,
            }
            .abi_encode()
            .into(),
            Self::DepositErc20 {
                l1_token,
                l2_token,
                amount,
            } => depositERC20Call {
                _l1Token: *l1_token,
                _l2Token: *l2_token,
                _amount: *amount,
                _minGasLimit: MIN_GAS_LIMIT,
                _extraData: extra_data,
            }
            .abi_encode()
            .into(),
            Self::DepositErc20To {
                l1_token,
                l2_token,
                recipient,
                amount,
            } => depositERC20ToCall {
                _l1Token: *l1_token,
                _l2Token: *l2_token,
                _to: *recipient,
                _amount: *amount,
                _minGasLimit: MIN_GAS_LIMIT,
                _extraData: extra_data,
            }
            .abi_encode()
            .into(),
            Self::Withdraw { token, amount } => withdrawCall {
                _l2Token: *token,
                _amount: *amount,
                _minGasLimit: MIN_GAS_LIMIT,
                _extraData: extra_data,
            }
            .abi_encode()
            .into(),
            Self::WithdrawTo {
                token,
                recipient,
                amount,
            } => withdrawToCall {
                _l2Token: *token,
                _to: *recipient,
                _amount: *amount,
                _minGasLimit: MIN_GAS_LIMIT,
                _extraData: extra_data,
            }
            .abi_encode()
            .into(),
        }
    }

    /// Solidity function name, for logging.
    pub fn function_name(&self) -> &'static str {
        match self {
            Self::DepositNative => "depositETH",
            Self::DepositNativeTo { .. } => "depositETHTo",
            Self::DepositErc20 { .. } => "depositERC20",
            Self::DepositErc20To { .. } => "depositERC20To",
            Self::Withdraw { .. } => "withdraw",
            Self::WithdrawTo { .. } => "withdrawTo",
        }
    }
}

/// One bridge attempt's target contract, call, and attached value.
/// Lives only between selection and execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeCallPlan {
    pub chain: Chain,
    pub contract: Address,
    pub call: BridgeCall,
    pub value: U256,
}

/// Picks the contract entry point for a normalized request.
///
/// Exhaustive over (direction, asset kind, recipient kind). `delegation_fee`
/// must be freshly read from the L2 bridge for withdrawals; deposits ignore
/// it. Value rules: native deposits send the amount as value; native
/// withdrawals send amount + fee; token withdrawals send the fee only.
pub fn select_call(
    config: &BridgeConfig,
    request: &NormalizedRequest,
    delegation_fee: U256,
) -> Result<BridgeCallPlan, BridgeError> {
    let amount = request.amount;
    let (call, value) = match request.direction {
        Direction::Deposit => match (request.source_token, request.recipient) {
            (None, None) => (BridgeCall::DepositNative, amount),
            (None, Some(recipient)) => (BridgeCall::DepositNativeTo { recipient }, amount),
            (Some(l1_token), None) => (
                BridgeCall::DepositErc20 {
                    l1_token,
                    l2_token: deposit_l2_token(request)?,
                    amount,
                },
                U256::ZERO,
            ),
            (Some(l1_token), Some(recipient)) => (
                BridgeCall::DepositErc20To {
                    l1_token,
                    l2_token: deposit_l2_token(request)?,
                    recipient,
                    amount,
                },
                U256::ZERO,
            ),
        },
        Direction::Withdrawal => {
            let (token, value) = match request.source_token {
                None => (LEGACY_ERC20_BNB, checked_total(amount, delegation_fee)?),
                Some(token) => (token, delegation_fee),
            };
            let call = match request.recipient {
                None => BridgeCall::Withdraw { token, amount },
                Some(recipient) => BridgeCall::WithdrawTo {
                    token,
                    recipient,
                    amount,
                },
            };
            (call, value)
        }
    };

    Ok(BridgeCallPlan {
        chain: request.source_chain,
        contract: request.direction.contract(config),
        call,
        value,
    })
}

fn deposit_l2_token(request: &NormalizedRequest) -> Result<Address, BridgeError> {
    request
        .destination_token
        .ok_or(BridgeError::MissingDestinationToken(request.source_chain))
}

fn checked_total(amount: U256, fee: U256) -> Result<U256, BridgeError> {
    amount
        .checked_add(fee)
        .ok_or_else(|| BridgeError::InvalidAmount("amount + delegation fee overflows".to_string()))
}
