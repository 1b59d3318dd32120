use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;

use alloy::network::{Ethereum, EthereumWallet, TransactionBuilder};
use alloy::primitives::{Address, Bytes, TxHash, U256};
use alloy::providers::fillers::{FillProvider, JoinFill, RecommendedFiller, WalletFiller};
use alloy::providers::{Provider, ProviderBuilder, RootProvider};
use alloy::rpc::types::eth::TransactionRequest;
use alloy::signers::local::LocalWallet;
use alloy::sol;
use alloy::sol_types::SolCall;
use alloy::transports::http::Http;
use async_trait::async_trait;
use tracing::debug;
use utils::Chain;

use crate::client::{decode_revert_reason, ChainClient, ClientError};

sol! {
    function allowance(address _owner, address _spender) external view returns (uint256);
    function approve(address _spender, uint256 _amount) external returns (bool);
}

const RECEIPT_POLL_INTERVAL: Duration = Duration::from_secs(3);
const RECEIPT_POLL_ATTEMPTS: u32 = 60;

/// Environment variable holding the signer's hex private key.
pub const PRIVATE_KEY_ENV: &str = "BNB_PRIVATE_KEY";

type HttpTransport = Http<reqwest::Client>;
type SignerProvider = FillProvider<
    JoinFill<RecommendedFiller, WalletFiller<EthereumWallet>>,
    RootProvider<HttpTransport>,
    HttpTransport,
    Ethereum,
>;

/// JSON-RPC [`ChainClient`] holding one signer and one HTTP provider per
/// supported chain. `switch_chain` flips which provider subsequent calls
/// hit; nothing else is stateful.
#[derive(Debug)]
pub struct RpcClient {
    sender: Address,
    providers: HashMap<Chain, SignerProvider>,
    active: RwLock<Chain>,
}

impl RpcClient {
    /// Builds a provider for each of `chains`, all signing with `signer`.
    pub fn new(signer: LocalWallet, chains: &[Chain]) -> eyre::Result<Self> {
        let active = *chains
            .first()
            .ok_or_else(|| eyre::eyre!("at least one chain is required"))?;
        let sender = signer.address();

        let mut providers = HashMap::new();
        for &chain in chains {
            let rpc_url = reqwest::Url::parse(chain.data().rpc_url)?;
            let provider = ProviderBuilder::new()
                .with_recommended_fillers()
                .wallet(EthereumWallet::from(signer.clone()))
                .on_http(rpc_url);
            providers.insert(chain, provider);
        }

        Ok(Self {
            sender,
            providers,
            active: RwLock::new(active),
        })
    }

    /// Builds a client with the signer key taken from [`PRIVATE_KEY_ENV`].
    pub fn from_env(chains: &[Chain]) -> eyre::Result<Self> {
        let key = std::env::var(PRIVATE_KEY_ENV)
            .map_err(|_| eyre::eyre!("{PRIVATE_KEY_ENV} is not set"))?;
        let signer = key.parse::<LocalWallet>()?;
        Self::new(signer, chains)
    }

    fn provider(&self) -> Result<&SignerProvider, ClientError> {
        let chain = *self.active.read().expect("chain lock poisoned");
        self.providers
            .get(&chain)
            .ok_or(ClientError::UnknownChain(chain))
    }

    fn request(&self, to: Address, calldata: Bytes, value: U256) -> TransactionRequest {
        TransactionRequest::default()
            .with_from(self.sender)
            .with_to(to.into())
            .with_input(calldata)
            .with_value(value)
    }
}

#[async_trait]
impl ChainClient for RpcClient {
    fn sender(&self) -> Address {
        self.sender
    }

    async fn switch_chain(&self, chain: Chain) -> Result<(), ClientError> {
        if !self.providers.contains_key(&chain) {
            return Err(ClientError::UnknownChain(chain));
        }
        *self.active.write().expect("chain lock poisoned") = chain;
        debug!(%chain, "switched active chain");
        Ok(())
    }

    async fn read(&self, to: Address, calldata: Bytes) -> Result<Bytes, ClientError> {
        let tx = self.request(to, calldata, U256::ZERO);
        self.provider()?
            .call(&tx)
            .await
            .map_err(into_client_error)
    }

    async fn get_allowance(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
    ) -> Result<U256, ClientError> {
        let calldata = allowanceCall {
            _owner: owner,
            _spender: spender,
        }
        .abi_encode();
        let raw = self.read(token, calldata.into()).await?;
        let decoded = allowanceCall::abi_decode_returns(&raw, true)
            .map_err(|err| ClientError::Rpc(format!("bad allowance response: {err}")))?;
        Ok(decoded._0)
    }

    async fn approve(
        &self,
        token: Address,
        spender: Address,
        amount: U256,
    ) -> Result<TxHash, ClientError> {
        let calldata = approveCall {
            _spender: spender,
            _amount: amount,
        }
        .abi_encode();
        ChainClient::send(self, token, calldata.into(), U256::ZERO).await
    }

    async fn wait_for_receipt(&self, tx: TxHash) -> Result<bool, ClientError> {
        let provider = self.provider()?;
        for _ in 0..RECEIPT_POLL_ATTEMPTS {
            let receipt = provider
                .get_transaction_receipt(tx)
                .await
                .map_err(into_client_error)?;
            if let Some(receipt) = receipt {
                return Ok(receipt.status());
            }
            tokio::time::sleep(RECEIPT_POLL_INTERVAL).await;
        }
        Err(ClientError::ReceiptTimeout(tx))
    }

    async fn simulate(
        &self,
        to: Address,
        calldata: Bytes,
        value: U256,
    ) -> Result<(), ClientError> {
        let tx = self.request(to, calldata, value);
        self.provider()?
            .call(&tx)
            .await
            .map(|_| ())
            .map_err(into_client_error)
    }

    async fn send(&self, to: Address, calldata: Bytes, value: U256) -> Result<TxHash, ClientError> {
        let tx = self.request(to, calldata, value);
        let pending = self
            .provider()?
            .send_transaction(tx)
            .await
            .map_err(into_client_error)?;
        Ok(*pending.tx_hash())
    }
}

/// Lowers an alloy transport error into [`ClientError`], decoding revert
/// data into [`ClientError::Reverted`] when the response carries any.
fn into_client_error(err: alloy::transports::TransportError) -> ClientError {
    if let Some(reason) = revert_data(&err).as_deref().and_then(decode_revert_reason) {
        return ClientError::Reverted { reason };
    }
    ClientError::Rpc(err.to_string())
}

/// Pulls the hex revert payload out of a JSON-RPC error response, if present.
fn revert_data(err: &alloy::transports::TransportError) -> Option<Vec<u8>> {
    let payload = err.as_error_resp()?;
    let raw = payload.data.as_ref()?;
    let text: String = serde_json::from_str(raw.get()).ok()?;
    hex::decode(text.strip_prefix("0x")?).ok()
}
