//! # EVM Governance RPC
//!
//! Multi-chain EVM JSON-RPC client and governance contract deployment
//! toolkit.
//!
//! ## Architecture
//!
//! Two loosely coupled components:
//!
//! - **Chain client** (`client`, `rpc`): a per-network handle with uniform
//!   read access to one EVM-compatible network. The [`ChainClient`] trait is
//!   the port; [`EvmRpcClient`] is the HTTP JSON-RPC adapter.
//! - **Governance deployer** (`deploy`): a stateless routine that signs and
//!   broadcasts the governance contract-creation transaction and returns the
//!   offline-computed contract address.
//!
//! Supporting modules: `config` (startup network registry), `signer`
//! (key-to-address derivation and the chain-bound [`SigningAuthority`]),
//! `gas` (gas pricing inputs), `error`, and `logging`.
//!
//! ## Example
//!
//! ```rust,ignore
//! use evm_gov_rpc::{
//!     ChainClient, EvmRpcClient, GasPrice, NetworkRegistry, SUGGESTED_HIGH_GAS_LIMIT,
//!     SigningAuthority, deploy_governance_contract,
//! };
//!
//! let registry = NetworkRegistry::builtin();
//! let client = EvmRpcClient::connect_named(&registry, "bsc")?;
//! let authority = SigningAuthority::from_private_key(&key, client.network().chain_id)?;
//!
//! let suggested = client.suggest_gas_price().await?;
//! let result = deploy_governance_contract(
//!     &client,
//!     &authority,
//!     GasPrice::legacy(suggested.as_u64()),
//!     SUGGESTED_HIGH_GAS_LIMIT,
//! )
//! .await?;
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod client;
pub mod config;
pub mod deploy;
pub mod error;
pub mod gas;
pub mod logging;
pub mod rpc;
pub mod signer;

pub use client::ChainClient;
pub use config::{NetworkConfig, NetworkRegistry};
pub use deploy::{DeploymentResult, deploy_governance_contract};
pub use error::{ChainError, ChainResult};
pub use gas::{GasPrice, SUGGESTED_HIGH_GAS_LIMIT};
pub use rpc::EvmRpcClient;
pub use signer::{SigningAuthority, private_key_to_address};
