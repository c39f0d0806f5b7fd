//! # Error Types
//!
//! Error taxonomy for chain client and deployment operations.
//!
//! Every fallible operation in this crate returns [`ChainError`], so callers
//! always see which precondition or remote condition failed. [`Pending`] and
//! [`NotFound`] are deliberately distinct: a transaction that exists but has
//! not been mined must never be reported as absent.
//!
//! [`Pending`]: ChainError::Pending
//! [`NotFound`]: ChainError::NotFound

use thiserror::Error;

/// Error type for chain client and deployment operations.
#[derive(Debug, Error)]
pub enum ChainError {
    /// RPC endpoint unreachable, malformed, or the client has been closed.
    #[error("connection error: {0}")]
    Connection(String),

    /// Malformed chain address supplied by the caller.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Malformed private key supplied by the caller.
    #[error("invalid private key: {0}")]
    InvalidKey(String),

    /// Queried entity (block, transaction, receipt) does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Entity exists but has not been mined yet.
    #[error("pending: {0}")]
    Pending(String),

    /// Signing authority was derived for a different chain than the one the
    /// client is connected to.
    #[error("chain id mismatch: signer is bound to {signer}, node reports {node}")]
    ChainIdMismatch {
        /// Chain id the signing authority was derived with.
        signer: u64,
        /// Chain id reported by the connected node.
        node: u64,
    },

    /// Non-positive or otherwise unusable gas parameters.
    #[error("invalid gas parameters: {0}")]
    InvalidGasParams(String),

    /// Broadcast rejected by the network (insufficient funds, nonce
    /// conflict, ...).
    #[error("broadcast rejected: {0}")]
    Rejected(String),

    /// Internal invariant violation.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ChainError {
    /// Creates a connection error.
    #[must_use]
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Creates an invalid-address error.
    #[must_use]
    pub fn invalid_address(msg: impl Into<String>) -> Self {
        Self::InvalidAddress(msg.into())
    }

    /// Creates an invalid-key error.
    #[must_use]
    pub fn invalid_key(msg: impl Into<String>) -> Self {
        Self::InvalidKey(msg.into())
    }

    /// Creates a not-found error.
    #[must_use]
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Creates a pending error.
    #[must_use]
    pub fn pending(msg: impl Into<String>) -> Self {
        Self::Pending(msg.into())
    }

    /// Creates an invalid-gas-parameters error.
    #[must_use]
    pub fn invalid_gas_params(msg: impl Into<String>) -> Self {
        Self::InvalidGasParams(msg.into())
    }

    /// Creates a broadcast-rejected error.
    #[must_use]
    pub fn rejected(msg: impl Into<String>) -> Self {
        Self::Rejected(msg.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns true for errors raised before any state-changing broadcast.
    ///
    /// Useful for callers that want to retry a deployment knowing the chain
    /// was left untouched.
    #[must_use]
    pub const fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::InvalidAddress(_)
                | Self::InvalidKey(_)
                | Self::ChainIdMismatch { .. }
                | Self::InvalidGasParams(_)
        )
    }
}

/// Result type for chain operations.
pub type ChainResult<T> = Result<T, ChainError>;
