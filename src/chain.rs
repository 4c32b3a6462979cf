//! Provider and signer plumbing for the Raindrop contract.
//!
//! `EthClient` is the single gateway to the chain: reads go through a plain
//! HTTP provider, writes additionally need an unlocked local signer. The
//! client is cheap to clone and is shared through `Arc<Mutex<Option<...>>>`
//! so page components can grab a copy and drop the lock before awaiting.

use std::time::Duration;

use alloy::contract::Error as ContractError;
use alloy::network::EthereumWallet;
use alloy::primitives::{Address, B256, U256};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use alloy::sol_types::SolInterface;
use alloy::transports::http::reqwest::Url;
use alloy::transports::{RpcError, TransportErrorKind};
use thiserror::Error;

use crate::config::AppConfig;
use crate::contracts::{IRaindrop, IERC20, RAINDROP_ADDRESS};
use crate::raindrop::RaindropDetails;

const RECEIPT_POLL_INTERVAL: Duration = Duration::from_secs(1);
const RECEIPT_POLL_ATTEMPTS: u32 = 120;

#[derive(Debug, Error)]
pub enum ChainError {
    #[error("invalid RPC URL: {0}")]
    InvalidUrl(String),
    #[error("connected node reports chain id {got}, expected {want}")]
    WrongChain { got: u64, want: u64 },
    #[error("no signing key unlocked")]
    NoSigner,
    /// A revert decoded to one of the contract's named errors.
    #[error("{0}")]
    Revert(String),
    #[error("transaction {0} reverted on chain")]
    Reverted(B256),
    #[error("timed out waiting for receipt of {0}")]
    ReceiptTimeout(B256),
    /// Transport, signing, or otherwise unrecognized failures, reduced to
    /// their shortest human-readable form.
    #[error("{0}")]
    Rpc(String),
}

impl From<RpcError<TransportErrorKind>> for ChainError {
    fn from(err: RpcError<TransportErrorKind>) -> Self {
        Self::Rpc(short_message(&err.to_string()))
    }
}

impl From<ContractError> for ChainError {
    fn from(err: ContractError) -> Self {
        match decode_raindrop_revert(&err) {
            Some(msg) => Self::Revert(msg),
            None => Self::Rpc(short_message(&err.to_string())),
        }
    }
}

/// First line of an error display. Provider errors tend to append multi-line
/// JSON payloads that are useless inline.
fn short_message(display: &str) -> String {
    display.lines().next().unwrap_or(display).trim().to_string()
}

fn decode_raindrop_revert(err: &ContractError) -> Option<String> {
    let data = err.as_revert_data()?;
    let decoded = IRaindrop::IRaindropErrors::abi_decode(&data).ok()?;
    Some(match decoded {
        IRaindrop::IRaindropErrors::AlreadyExists(e) => {
            format!("raindrop \"{}\" already exists", e.raindropId)
        }
        IRaindrop::IRaindropErrors::AlreadyExecuted(_) => "raindrop was already executed".into(),
        IRaindrop::IRaindropErrors::AlreadyCancelled(_) => "raindrop was already cancelled".into(),
        IRaindrop::IRaindropErrors::NotFound(e) => {
            format!("raindrop \"{}\" not found", e.raindropId)
        }
        IRaindrop::IRaindropErrors::NotAuthorized(_) => "only the host may do that".into(),
        IRaindrop::IRaindropErrors::InvalidInput(e) => format!("invalid input: {}", e.reason),
        IRaindrop::IRaindropErrors::InvalidConfiguration(e) => {
            format!("invalid configuration: {}", e.reason)
        }
        IRaindrop::IRaindropErrors::ExecutionFailed(e) => {
            format!("execution failed: {}", e.reason)
        }
    })
}

#[derive(Clone)]
pub struct EthClient {
    rpc_url: Url,
    chain_id: u64,
    signer: Option<PrivateKeySigner>,
}

impl EthClient {
    /// Dial the configured RPC endpoint and verify it serves the expected chain.
    pub async fn connect(config: &AppConfig) -> Result<Self, ChainError> {
        let rpc_url: Url = config
            .rpc_url
            .parse()
            .map_err(|_| ChainError::InvalidUrl(config.rpc_url.clone()))?;
        let client = Self {
            rpc_url,
            chain_id: config.chain_id,
            signer: None,
        };
        let reported = client.provider().get_chain_id().await?;
        if reported != client.chain_id {
            return Err(ChainError::WrongChain {
                got: reported,
                want: client.chain_id,
            });
        }
        tracing::info!(chain_id = reported, url = %client.rpc_url, "connected to RPC endpoint");
        Ok(client)
    }

    /// Attach a signing key; its derived address becomes the connected account.
    pub fn with_signer(mut self, signer: PrivateKeySigner) -> Self {
        self.signer = Some(signer);
        self
    }

    pub fn account(&self) -> Option<Address> {
        self.signer.as_ref().map(|s| s.address())
    }

    fn provider(&self) -> impl Provider + Clone {
        ProviderBuilder::new().connect_http(self.rpc_url.clone())
    }

    fn signing_provider(&self) -> Result<impl Provider + Clone, ChainError> {
        let signer = self.signer.clone().ok_or(ChainError::NoSigner)?;
        Ok(ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect_http(self.rpc_url.clone()))
    }

    // ---- reads ----

    pub async fn raindrop_details(&self, id: &str) -> Result<RaindropDetails, ChainError> {
        let contract = IRaindrop::new(RAINDROP_ADDRESS, self.provider());
        let ret = contract.getRaindropDetails(id.to_string()).call().await?;
        Ok(ret.into())
    }

    pub async fn token_decimals(&self, token: Address) -> Result<u8, ChainError> {
        let erc20 = IERC20::new(token, self.provider());
        Ok(erc20.decimals().call().await?)
    }

    pub async fn token_balance(&self, token: Address, owner: Address) -> Result<U256, ChainError> {
        let erc20 = IERC20::new(token, self.provider());
        Ok(erc20.balanceOf(owner).call().await?)
    }

    pub async fn participants_page(
        &self,
        id: &str,
        cursor: u64,
        size: u64,
    ) -> Result<Vec<Address>, ChainError> {
        let contract = IRaindrop::new(RAINDROP_ADDRESS, self.provider());
        Ok(contract
            .getParticipantsPaginated(id.to_string(), U256::from(cursor), U256::from(size))
            .call()
            .await?)
    }

    // ---- writes ----

    pub async fn approve(&self, token: Address, amount: U256) -> Result<B256, ChainError> {
        let erc20 = IERC20::new(token, self.signing_provider()?);
        let pending = erc20.approve(RAINDROP_ADDRESS, amount).send().await?;
        let hash = *pending.tx_hash();
        tracing::info!(%token, %amount, %hash, "submitted ERC-20 approval");
        Ok(hash)
    }

    pub async fn create_raindrop(
        &self,
        id: &str,
        token: Address,
        amount: U256,
        scheduled_time: u64,
    ) -> Result<B256, ChainError> {
        let contract = IRaindrop::new(RAINDROP_ADDRESS, self.signing_provider()?);
        let pending = contract
            .createRaindrop(id.to_string(), token, amount, U256::from(scheduled_time))
            .send()
            .await?;
        let hash = *pending.tx_hash();
        tracing::info!(id, %hash, "submitted createRaindrop");
        Ok(hash)
    }

    pub async fn add_participants(
        &self,
        id: &str,
        participants: Vec<Address>,
    ) -> Result<B256, ChainError> {
        let contract = IRaindrop::new(RAINDROP_ADDRESS, self.signing_provider()?);
        let count = participants.len();
        let pending = contract
            .addParticipants(id.to_string(), participants)
            .send()
            .await?;
        let hash = *pending.tx_hash();
        tracing::info!(id, count, %hash, "submitted addParticipants");
        Ok(hash)
    }

    pub async fn remove_participants(
        &self,
        id: &str,
        participants: Vec<Address>,
    ) -> Result<B256, ChainError> {
        let contract = IRaindrop::new(RAINDROP_ADDRESS, self.signing_provider()?);
        let count = participants.len();
        let pending = contract
            .removeParticipants(id.to_string(), participants)
            .send()
            .await?;
        let hash = *pending.tx_hash();
        tracing::info!(id, count, %hash, "submitted removeParticipants");
        Ok(hash)
    }

    pub async fn clear_participants(&self, id: &str) -> Result<B256, ChainError> {
        let contract = IRaindrop::new(RAINDROP_ADDRESS, self.signing_provider()?);
        let pending = contract.clearParticipants(id.to_string()).send().await?;
        let hash = *pending.tx_hash();
        tracing::info!(id, %hash, "submitted clearParticipants");
        Ok(hash)
    }

    pub async fn execute_raindrop(&self, id: &str) -> Result<B256, ChainError> {
        let contract = IRaindrop::new(RAINDROP_ADDRESS, self.signing_provider()?);
        let pending = contract.executeRaindrop(id.to_string()).send().await?;
        let hash = *pending.tx_hash();
        tracing::info!(id, %hash, "submitted executeRaindrop");
        Ok(hash)
    }

    pub async fn cancel_raindrop(&self, id: &str) -> Result<B256, ChainError> {
        let contract = IRaindrop::new(RAINDROP_ADDRESS, self.signing_provider()?);
        let pending = contract.cancelRaindrop(id.to_string()).send().await?;
        let hash = *pending.tx_hash();
        tracing::info!(id, %hash, "submitted cancelRaindrop");
        Ok(hash)
    }

    /// Poll until the transaction is terminal: confirmed, reverted, or timed
    /// out. A present receipt with failed status is an error, never a success.
    pub async fn wait_for_receipt(&self, hash: B256) -> Result<(), ChainError> {
        let provider = self.provider();
        for _ in 0..RECEIPT_POLL_ATTEMPTS {
            tokio::time::sleep(RECEIPT_POLL_INTERVAL).await;
            if let Some(receipt) = provider.get_transaction_receipt(hash).await? {
                if receipt.status() {
                    tracing::info!(%hash, "transaction confirmed");
                    return Ok(());
                }
                tracing::warn!(%hash, "transaction reverted");
                return Err(ChainError::Reverted(hash));
            }
        }
        Err(ChainError::ReceiptTimeout(hash))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_message_takes_first_line() {
        let raw = "server returned an error response\n{\"code\":-32000,\"message\":\"...\"}";
        assert_eq!(short_message(raw), "server returned an error response");
        assert_eq!(short_message("plain"), "plain");
        assert_eq!(short_message(""), "");
    }

    #[test]
    fn error_display_is_inline_friendly() {
        let err = ChainError::WrongChain { got: 1, want: 8453 };
        assert_eq!(
            err.to_string(),
            "connected node reports chain id 1, expected 8453"
        );
        assert_eq!(ChainError::NoSigner.to_string(), "no signing key unlocked");
    }
}
