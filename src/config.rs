//! # Network Configuration
//!
//! Per-chain network configuration and the startup registry.
//!
//! Network definitions live in an explicit [`NetworkRegistry`] built once at
//! process start and passed by reference into client constructors, so there
//! is a single source of truth and no hidden global state. Arbitrary
//! endpoints are supported through [`NetworkConfig::custom`].
//!
//! # Examples
//!
//! ```ignore
//! use evm_gov_rpc::config::NetworkRegistry;
//!
//! let registry = NetworkRegistry::builtin();
//! let bsc = registry.get("bsc")?;
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Network not found in the registry.
    #[error("network not found: {0}")]
    NetworkNotFound(String),

    /// Invalid configuration value.
    #[error("invalid configuration: {0}")]
    Invalid(String),

    /// Missing required field.
    #[error("missing required field: {0}")]
    MissingField(String),

    /// Environment variable not set.
    #[error("environment variable not set: {0}")]
    EnvVarNotSet(String),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParse(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration for a single EVM-compatible network.
///
/// Immutable value object; one instance per supported chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Human-readable network name.
    pub display_name: String,
    /// Network-unique chain identifier preventing cross-chain replay.
    pub chain_id: u64,
    /// HTTP(S) JSON-RPC endpoint URL.
    pub endpoint: String,
}

impl NetworkConfig {
    /// Creates a new network configuration.
    #[must_use]
    pub fn new(display_name: impl Into<String>, chain_id: u64, endpoint: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            chain_id,
            endpoint: endpoint.into(),
        }
    }

    /// Creates a configuration for an arbitrary endpoint by raw URL.
    ///
    /// The display name is derived from the chain id.
    #[must_use]
    pub fn custom(endpoint: impl Into<String>, chain_id: u64) -> Self {
        Self {
            display_name: format!("chain-{chain_id}"),
            chain_id,
            endpoint: endpoint.into(),
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is empty, not HTTP(S), or the chain
    /// id is zero.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.endpoint.is_empty() {
            return Err(ConfigError::MissingField("endpoint".to_string()));
        }

        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(ConfigError::Invalid(format!(
                "endpoint must be an HTTP(S) URL: {}",
                self.endpoint
            )));
        }

        if self.chain_id == 0 {
            return Err(ConfigError::Invalid(
                "chain_id must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Registry mapping logical network names to their configurations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkRegistry {
    /// Network configurations indexed by logical name.
    #[serde(flatten)]
    networks: HashMap<String, NetworkConfig>,
}

impl NetworkRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry seeded with the built-in networks.
    ///
    /// Covers Ethereum mainnet and the Sepolia testnet, BSC, Avalanche
    /// C-chain, Polygon, and Aurora.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::new();

        registry.insert(
            "ethereum",
            NetworkConfig::new("Ethereum", 1, "https://eth.llamarpc.com"),
        );
        registry.insert(
            "sepolia",
            NetworkConfig::new("Sepolia", 11_155_111, "https://sepolia.drpc.org"),
        );
        registry.insert(
            "bsc",
            NetworkConfig::new("BSC", 56, "https://bsc-dataseed1.binance.org"),
        );
        registry.insert(
            "avalanche",
            NetworkConfig::new("Avalanche", 43_114, "https://api.avax.network/ext/bc/C/rpc"),
        );
        registry.insert(
            "polygon",
            NetworkConfig::new("Polygon", 137, "https://polygon-rpc.com"),
        );
        registry.insert(
            "aurora",
            NetworkConfig::new("Aurora", 1_313_161_554, "https://mainnet.aurora.dev"),
        );

        registry
    }

    /// Adds or replaces a network configuration.
    pub fn insert(&mut self, name: impl Into<String>, config: NetworkConfig) {
        self.networks.insert(name.into(), config);
    }

    /// Gets a network configuration by logical name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NetworkNotFound`] for unknown names.
    pub fn get(&self, name: &str) -> ConfigResult<&NetworkConfig> {
        self.networks
            .get(name)
            .ok_or_else(|| ConfigError::NetworkNotFound(name.to_string()))
    }

    /// Gets a network configuration by chain id.
    #[must_use]
    pub fn get_by_chain_id(&self, chain_id: u64) -> Option<&NetworkConfig> {
        self.networks.values().find(|c| c.chain_id == chain_id)
    }

    /// Returns all registered network names.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.networks.keys().map(String::as_str).collect()
    }

    /// Returns the number of registered networks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.networks.len()
    }

    /// Returns true if no networks are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }

    /// Validates all registered networks.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first invalid network.
    pub fn validate(&self) -> ConfigResult<()> {
        for (name, config) in &self.networks {
            config
                .validate()
                .map_err(|e| ConfigError::Invalid(format!("network '{name}': {e}")))?;
        }
        Ok(())
    }
}

/// Substitutes environment variables in a string.
///
/// Replaces `${VAR_NAME}` patterns with the corresponding environment
/// variable value, so RPC credentials can be kept out of config files.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set.
pub fn substitute_env_vars(input: &str) -> ConfigResult<String> {
    let mut result = input.to_string();
    let mut start = 0;

    while let Some(var_start) = result[start..].find("${") {
        let abs_start = start + var_start;
        if let Some(var_end) = result[abs_start..].find('}') {
            let abs_end = abs_start + var_end;
            let var_name = &result[abs_start + 2..abs_end];

            let var_value = std::env::var(var_name)
                .map_err(|_| ConfigError::EnvVarNotSet(var_name.to_string()))?;

            result.replace_range(abs_start..abs_end + 1, &var_value);
            start = abs_start + var_value.len();
        } else {
            break;
        }
    }

    Ok(result)
}

/// Parses a TOML string into a network registry.
///
/// # Errors
///
/// Returns an error if parsing fails.
pub fn parse_registry(toml_str: &str) -> ConfigResult<NetworkRegistry> {
    toml::from_str(toml_str).map_err(|e| ConfigError::TomlParse(e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn builtin_registry_covers_supported_chains() {
        let registry = NetworkRegistry::builtin();

        assert_eq!(registry.get("ethereum").unwrap().chain_id, 1);
        assert_eq!(registry.get("bsc").unwrap().chain_id, 56);
        assert_eq!(registry.get("avalanche").unwrap().chain_id, 43_114);
        assert_eq!(registry.get("polygon").unwrap().chain_id, 137);
        assert_eq!(registry.get("aurora").unwrap().chain_id, 1_313_161_554);
        assert_eq!(registry.get("sepolia").unwrap().chain_id, 11_155_111);
    }

    #[test]
    fn builtin_registry_validates() {
        assert!(NetworkRegistry::builtin().validate().is_ok());
    }

    #[test]
    fn unknown_network_is_an_error() {
        let registry = NetworkRegistry::builtin();
        let err = registry.get("starknet").unwrap_err();
        assert_eq!(err.to_string(), "network not found: starknet");
    }

    #[test]
    fn get_by_chain_id() {
        let registry = NetworkRegistry::builtin();
        assert_eq!(
            registry.get_by_chain_id(137).map(|c| c.display_name.as_str()),
            Some("Polygon")
        );
        assert!(registry.get_by_chain_id(999_999).is_none());
    }

    #[test]
    fn custom_network_by_raw_url() {
        let config = NetworkConfig::custom("http://validator.internal:8545", 31_337);
        assert_eq!(config.display_name, "chain-31337");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_non_http_endpoint() {
        let config = NetworkConfig::new("Bad", 1, "ws://eth.example.com");
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_chain_id() {
        let config = NetworkConfig::new("Bad", 0, "https://eth.example.com");
        assert!(config.validate().is_err());
    }

    #[test]
    fn parse_registry_from_toml() {
        let registry = parse_registry(
            r#"
            [ethereum]
            display_name = "Ethereum"
            chain_id = 1
            endpoint = "https://eth.example.com"

            [bsc]
            display_name = "BSC"
            chain_id = 56
            endpoint = "https://bsc.example.com"
            "#,
        )
        .unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("bsc").unwrap().chain_id, 56);
    }

    #[test]
    fn substitute_env_vars_no_vars() {
        let result = substitute_env_vars("https://example.com").unwrap();
        assert_eq!(result, "https://example.com");
    }

    #[test]
    fn substitute_env_vars_with_var() {
        // HOME is always set on Unix systems
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
        let result = substitute_env_vars("prefix/${HOME}/suffix").unwrap();
        assert_eq!(result, format!("prefix/{home}/suffix"));
    }

    #[test]
    fn substitute_env_vars_missing_var() {
        let result = substitute_env_vars("https://rpc.example.com/${__NO_SUCH_VAR_314159__}");
        assert!(result.is_err());
    }
}
