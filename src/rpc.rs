//! # HTTP JSON-RPC Adapter
//!
//! [`ChainClient`] implementation over an ethers-rs HTTP provider.
//!
//! One [`EvmRpcClient`] serves exactly one network. The client is not
//! shared across chains; callers needing concurrent queries should
//! provision one client per uncoordinated caller. Closing the client is
//! idempotent and makes every subsequent call fail with a connection error
//! instead of hanging.

use async_trait::async_trait;
use ethers::providers::{Http, Middleware, Provider};
use ethers::types::{
    Address, Block, BlockId, BlockNumber, Bytes, H256, Transaction, TransactionReceipt, U256,
};
use std::time::Duration;

use crate::client::ChainClient;
use crate::config::{NetworkConfig, NetworkRegistry};
use crate::error::{ChainError, ChainResult};

/// Chain client for one EVM-compatible network over HTTP JSON-RPC.
#[derive(Debug)]
pub struct EvmRpcClient {
    /// The network this client is bound to.
    network: NetworkConfig,
    /// Underlying provider; `None` once the client has been closed.
    provider: Option<Provider<Http>>,
}

impl EvmRpcClient {
    /// Establishes a client for the given network.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::Connection`] if the endpoint URL is malformed
    /// or the network configuration is invalid.
    pub fn connect(network: NetworkConfig) -> ChainResult<Self> {
        network
            .validate()
            .map_err(|e| ChainError::connection(e.to_string()))?;

        let provider = Provider::<Http>::try_from(&network.endpoint)
            .map_err(|e| ChainError::connection(format!("failed to create provider: {e}")))?
            .interval(Duration::from_millis(100));

        tracing::debug!(
            network = %network.display_name,
            chain_id = network.chain_id,
            "connected chain client"
        );

        Ok(Self {
            network,
            provider: Some(provider),
        })
    }

    /// Establishes a client for a named network from a registry.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::Connection`] for unknown network names or
    /// malformed endpoints.
    pub fn connect_named(registry: &NetworkRegistry, name: &str) -> ChainResult<Self> {
        let network = registry
            .get(name)
            .map_err(|e| ChainError::connection(e.to_string()))?;
        Self::connect(network.clone())
    }

    /// Releases the underlying connection.
    ///
    /// Idempotent; safe to call even if construction only partially
    /// succeeded. Every call after `close` fails with a connection error.
    pub fn close(&mut self) {
        if self.provider.take().is_some() {
            tracing::debug!(network = %self.network.display_name, "closed chain client");
        }
    }

    /// Returns the network configuration this client is bound to.
    #[must_use]
    pub fn network(&self) -> &NetworkConfig {
        &self.network
    }

    /// Returns true if the client has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.provider.is_none()
    }

    /// Reconciles the node's reported chain id against the configured one.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::Connection`] if the node is unreachable or
    /// reports a different chain id than configured (endpoint
    /// misconfiguration).
    pub async fn health_check(&self) -> ChainResult<()> {
        let node = ChainClient::chain_id(self).await?;

        if node != self.network.chain_id {
            return Err(ChainError::connection(format!(
                "endpoint misconfigured: configured for chain {}, node reports {}",
                self.network.chain_id, node
            )));
        }

        Ok(())
    }

    fn provider(&self) -> ChainResult<&Provider<Http>> {
        self.provider
            .as_ref()
            .ok_or_else(|| ChainError::connection("client is closed"))
    }

    fn parse_address(address: &str) -> ChainResult<Address> {
        address
            .parse()
            .map_err(|_| ChainError::invalid_address(address.to_string()))
    }

    fn parse_hash(hash: &str) -> ChainResult<H256> {
        hash.parse()
            .map_err(|_| ChainError::invalid_address(format!("malformed transaction hash: {hash}")))
    }
}

#[async_trait]
impl ChainClient for EvmRpcClient {
    async fn chain_id(&self) -> ChainResult<u64> {
        self.provider()?
            .get_chainid()
            .await
            .map(|id| id.as_u64())
            .map_err(|e| ChainError::connection(e.to_string()))
    }

    async fn get_height(&self) -> ChainResult<u64> {
        self.provider()?
            .get_block_number()
            .await
            .map(|n| n.as_u64())
            .map_err(|e| ChainError::connection(e.to_string()))
    }

    async fn get_balance(&self, address: &str) -> ChainResult<U256> {
        let addr = Self::parse_address(address)?;

        self.provider()?
            .get_balance(addr, None)
            .await
            .map_err(|e| ChainError::connection(e.to_string()))
    }

    async fn is_contract(&self, address: &str) -> ChainResult<bool> {
        let addr = Self::parse_address(address)?;

        // A failed lookup propagates; only an empty code response means
        // "externally owned account".
        let code = self
            .provider()?
            .get_code(addr, None)
            .await
            .map_err(|e| ChainError::connection(e.to_string()))?;

        Ok(!code.is_empty())
    }

    async fn get_block_header_by_number(&self, number: u64) -> ChainResult<Block<H256>> {
        self.provider()?
            .get_block(BlockId::Number(BlockNumber::Number(number.into())))
            .await
            .map_err(|e| ChainError::connection(e.to_string()))?
            .ok_or_else(|| ChainError::not_found(format!("block {number}")))
    }

    async fn get_block_info_by_number(&self, number: u64) -> ChainResult<Block<Transaction>> {
        self.provider()?
            .get_block_with_txs(BlockId::Number(BlockNumber::Number(number.into())))
            .await
            .map_err(|e| ChainError::connection(e.to_string()))?
            .ok_or_else(|| ChainError::not_found(format!("block {number}")))
    }

    async fn get_transaction_by_hash(&self, hash: &str) -> ChainResult<(Transaction, bool)> {
        let hash = Self::parse_hash(hash)?;

        let tx = self
            .provider()?
            .get_transaction(hash)
            .await
            .map_err(|e| ChainError::connection(e.to_string()))?
            .ok_or_else(|| ChainError::not_found(format!("transaction {hash:#x}")))?;

        let is_pending = tx.block_number.is_none();
        Ok((tx, is_pending))
    }

    async fn get_transaction_receipt(&self, hash: &str) -> ChainResult<TransactionReceipt> {
        let hash = Self::parse_hash(hash)?;

        let receipt = self
            .provider()?
            .get_transaction_receipt(hash)
            .await
            .map_err(|e| ChainError::connection(e.to_string()))?;

        if let Some(receipt) = receipt {
            return Ok(receipt);
        }

        // No receipt: a transaction sitting in the mempool is pending, an
        // unknown hash is not found. The two must stay distinct.
        match self
            .provider()?
            .get_transaction(hash)
            .await
            .map_err(|e| ChainError::connection(e.to_string()))?
        {
            Some(_) => Err(ChainError::pending(format!(
                "transaction {hash:#x} has no receipt yet"
            ))),
            None => Err(ChainError::not_found(format!("transaction {hash:#x}"))),
        }
    }

    async fn get_nonce(&self, address: Address) -> ChainResult<U256> {
        self.provider()?
            .get_transaction_count(address, None)
            .await
            .map_err(|e| ChainError::connection(e.to_string()))
    }

    async fn suggest_gas_price(&self) -> ChainResult<U256> {
        self.provider()?
            .get_gas_price()
            .await
            .map_err(|e| ChainError::connection(e.to_string()))
    }

    async fn send_raw_transaction(&self, raw: Bytes) -> ChainResult<H256> {
        let pending = self
            .provider()?
            .send_raw_transaction(raw)
            .await
            .map_err(|e| ChainError::rejected(e.to_string()))?;

        let tx_hash = pending.tx_hash();
        tracing::info!(
            network = %self.network.display_name,
            tx_hash = %format!("{tx_hash:#x}"),
            "broadcast raw transaction"
        );

        Ok(tx_hash)
    }
}
