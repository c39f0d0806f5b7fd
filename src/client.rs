//! # Chain Client Trait
//!
//! Port definition for read access to one EVM-compatible network.
//!
//! This module defines the [`ChainClient`] trait that abstracts the chain
//! operations the rest of the crate builds on. The HTTP JSON-RPC adapter
//! lives in [`crate::rpc`]; tests substitute their own implementations.

use async_trait::async_trait;
use ethers::types::{Address, Block, Bytes, H256, Transaction, TransactionReceipt, U256};
use std::fmt;

use crate::error::ChainResult;

/// Trait for per-network chain operations.
///
/// One implementation instance serves exactly one network. All operations
/// are blocking network calls from the caller's point of view; none mutate
/// chain state except [`send_raw_transaction`].
///
/// [`send_raw_transaction`]: ChainClient::send_raw_transaction
#[async_trait]
pub trait ChainClient: Send + Sync + fmt::Debug {
    /// Queries the connected node's reported chain identity.
    ///
    /// Callers must reconcile this against any locally configured chain id
    /// before signing, to detect endpoint misconfiguration.
    ///
    /// # Errors
    ///
    /// Returns an error if the RPC call fails.
    async fn chain_id(&self) -> ChainResult<u64>;

    /// Returns the current chain height as observed by the connected node.
    ///
    /// # Errors
    ///
    /// Returns an error if the RPC call fails.
    async fn get_height(&self) -> ChainResult<u64>;

    /// Returns the balance of an address in wei.
    ///
    /// A freshly generated, never-funded address yields zero, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::InvalidAddress`] for malformed addresses.
    ///
    /// [`ChainError::InvalidAddress`]: crate::error::ChainError::InvalidAddress
    async fn get_balance(&self, address: &str) -> ChainResult<U256>;

    /// Determines whether the address has deployed bytecode.
    ///
    /// "No code" is `false`; a failed lookup is an error and must never be
    /// silently reported as `false`.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::InvalidAddress`] for malformed addresses, or a
    /// connection error if the lookup fails.
    ///
    /// [`ChainError::InvalidAddress`]: crate::error::ChainError::InvalidAddress
    async fn is_contract(&self, address: &str) -> ChainResult<bool>;

    /// Returns the block header at the given height.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::NotFound`] if no block exists at that height.
    ///
    /// [`ChainError::NotFound`]: crate::error::ChainError::NotFound
    async fn get_block_header_by_number(&self, number: u64) -> ChainResult<Block<H256>>;

    /// Returns the full block (with transaction bodies) at the given height.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::NotFound`] if no block exists at that height.
    ///
    /// [`ChainError::NotFound`]: crate::error::ChainError::NotFound
    async fn get_block_info_by_number(&self, number: u64) -> ChainResult<Block<Transaction>>;

    /// Returns a transaction by hash together with its pending status.
    ///
    /// `is_pending` is `true` for a transaction that has been broadcast but
    /// not yet mined.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::NotFound`] if the transaction does not exist.
    ///
    /// [`ChainError::NotFound`]: crate::error::ChainError::NotFound
    async fn get_transaction_by_hash(&self, hash: &str) -> ChainResult<(Transaction, bool)>;

    /// Returns the receipt of a mined transaction.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::Pending`] if the transaction exists but has not
    /// been mined, and [`ChainError::NotFound`] if it does not exist at all.
    ///
    /// [`ChainError::Pending`]: crate::error::ChainError::Pending
    /// [`ChainError::NotFound`]: crate::error::ChainError::NotFound
    async fn get_transaction_receipt(&self, hash: &str) -> ChainResult<TransactionReceipt>;

    /// Returns the next pending nonce for an address.
    ///
    /// # Errors
    ///
    /// Returns an error if the RPC call fails.
    async fn get_nonce(&self, address: Address) -> ChainResult<U256>;

    /// Returns the node's suggested gas price in wei.
    ///
    /// # Errors
    ///
    /// Returns an error if the RPC call fails.
    async fn suggest_gas_price(&self) -> ChainResult<U256>;

    /// Broadcasts a signed, RLP-encoded transaction.
    ///
    /// Returns the transaction hash without waiting for it to be mined.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::Rejected`] if the network refuses the
    /// transaction.
    ///
    /// [`ChainError::Rejected`]: crate::error::ChainError::Rejected
    async fn send_raw_transaction(&self, raw: Bytes) -> ChainResult<H256>;
}
