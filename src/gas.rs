//! # Gas Pricing
//!
//! Gas price configuration for contract deployment transactions.
//!
//! Supports both legacy gas pricing and EIP-1559 dynamic fees. Estimation
//! strategy is deliberately out of scope; callers obtain a price from the
//! node via [`ChainClient::suggest_gas_price`] or supply their own.
//!
//! [`ChainClient::suggest_gas_price`]: crate::client::ChainClient::suggest_gas_price

use serde::{Deserialize, Serialize};
use std::fmt;

/// Generous gas limit for contract-creation transactions.
pub const SUGGESTED_HIGH_GAS_LIMIT: u64 = 6_000_000;

/// Gas price configuration.
///
/// Gas prices are stored as u64 (wei), which is sufficient for practical
/// gas prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GasPrice {
    /// Legacy gas price in wei.
    Legacy {
        /// Gas price in wei.
        gas_price: u64,
    },
    /// EIP-1559 dynamic fee.
    Eip1559 {
        /// Maximum fee per gas in wei.
        max_fee_per_gas: u64,
        /// Maximum priority fee per gas in wei.
        max_priority_fee_per_gas: u64,
    },
}

impl GasPrice {
    /// Creates a legacy gas price.
    #[must_use]
    pub const fn legacy(gas_price: u64) -> Self {
        Self::Legacy { gas_price }
    }

    /// Creates an EIP-1559 gas price.
    #[must_use]
    pub const fn eip1559(max_fee_per_gas: u64, max_priority_fee_per_gas: u64) -> Self {
        Self::Eip1559 {
            max_fee_per_gas,
            max_priority_fee_per_gas,
        }
    }

    /// Returns the effective gas price for cost estimation.
    ///
    /// For legacy transactions, returns the gas price.
    /// For EIP-1559, returns the max fee per gas.
    #[must_use]
    pub const fn effective_price(&self) -> u64 {
        match self {
            Self::Legacy { gas_price } => *gas_price,
            Self::Eip1559 {
                max_fee_per_gas, ..
            } => *max_fee_per_gas,
        }
    }

    /// Returns whether this is an EIP-1559 gas price.
    #[must_use]
    pub const fn is_eip1559(&self) -> bool {
        matches!(self, Self::Eip1559 { .. })
    }
}

impl fmt::Display for GasPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Legacy { gas_price } => write!(f, "legacy: {} wei", gas_price),
            Self::Eip1559 {
                max_fee_per_gas,
                max_priority_fee_per_gas,
            } => write!(
                f,
                "eip1559: max_fee={} wei, priority_fee={} wei",
                max_fee_per_gas, max_priority_fee_per_gas
            ),
        }
    }
}
