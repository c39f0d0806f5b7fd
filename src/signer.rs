//! # Key Derivation and Signing Authority
//!
//! Private-key-to-address derivation and the chain-bound transaction signer.
//!
//! A [`SigningAuthority`] binds a key to exactly one chain id at
//! construction so a signature produced for one network can never be
//! replayed against another. Authorities are constructed per deployment
//! call and not persisted.

use ethers::signers::{LocalWallet, Signer};
use ethers::types::transaction::eip2718::TypedTransaction;
use ethers::types::{Address, Bytes};

use crate::error::{ChainError, ChainResult};

/// Derives the account address for a private key.
///
/// Deterministic, pure function: the same key always yields the same
/// address. Accepts the key as hex, with or without a `0x` prefix.
///
/// # Errors
///
/// Returns [`ChainError::InvalidKey`] for malformed keys.
pub fn private_key_to_address(private_key: &str) -> ChainResult<Address> {
    let wallet = parse_wallet(private_key)?;
    Ok(wallet.address())
}

fn parse_wallet(private_key: &str) -> ChainResult<LocalWallet> {
    let key = private_key.strip_prefix("0x").unwrap_or(private_key);
    key.parse::<LocalWallet>()
        .map_err(|e| ChainError::invalid_key(e.to_string()))
}

/// A transaction signer bound to exactly one chain.
///
/// The bound chain id flows into every signature, which is what prevents
/// cross-chain replay; [`deploy_governance_contract`] additionally refuses
/// to use an authority against a client reporting a different chain id.
///
/// [`deploy_governance_contract`]: crate::deploy::deploy_governance_contract
#[derive(Debug, Clone)]
pub struct SigningAuthority {
    wallet: LocalWallet,
    chain_id: u64,
}

impl SigningAuthority {
    /// Creates a signing authority from a private key and a chain id.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::InvalidKey`] for malformed keys.
    pub fn from_private_key(private_key: &str, chain_id: u64) -> ChainResult<Self> {
        let wallet = parse_wallet(private_key)?.with_chain_id(chain_id);
        Ok(Self { wallet, chain_id })
    }

    /// Returns the account address of the signing key.
    #[must_use]
    pub fn address(&self) -> Address {
        self.wallet.address()
    }

    /// Returns the chain id this authority was derived with.
    #[must_use]
    pub const fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Signs a transaction and returns the raw RLP-encoded bytes ready for
    /// broadcast.
    ///
    /// # Errors
    ///
    /// Returns an error if signing fails.
    pub fn sign_transaction(&self, tx: &TypedTransaction) -> ChainResult<Bytes> {
        let signature = self
            .wallet
            .sign_transaction_sync(tx)
            .map_err(|e| ChainError::internal(format!("signing failed: {e}")))?;

        Ok(tx.rlp_signed(&signature))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use ethers::types::TransactionRequest;
    use proptest::prelude::*;

    // Well-known development key, safe to embed.
    const DEV_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const DEV_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

    #[test]
    fn derives_known_address() {
        let address = private_key_to_address(DEV_KEY).unwrap();
        assert_eq!(address, DEV_ADDRESS.parse::<Address>().unwrap());
    }

    #[test]
    fn accepts_0x_prefixed_key() {
        let plain = private_key_to_address(DEV_KEY).unwrap();
        let prefixed = private_key_to_address(&format!("0x{DEV_KEY}")).unwrap();
        assert_eq!(plain, prefixed);
    }

    #[test]
    fn malformed_key_is_invalid_key_error() {
        let err = private_key_to_address("not-a-key").unwrap_err();
        assert!(matches!(err, ChainError::InvalidKey(_)));

        let err = SigningAuthority::from_private_key("deadbeef", 1).unwrap_err();
        assert!(matches!(err, ChainError::InvalidKey(_)));
    }

    #[test]
    fn authority_binds_chain_id() {
        let authority = SigningAuthority::from_private_key(DEV_KEY, 56).unwrap();
        assert_eq!(authority.chain_id(), 56);
        assert_eq!(authority.address(), DEV_ADDRESS.parse::<Address>().unwrap());
    }

    #[test]
    fn signs_contract_creation_transaction() {
        let authority = SigningAuthority::from_private_key(DEV_KEY, 137).unwrap();
        let tx: TypedTransaction = TransactionRequest::new()
            .data(vec![0x60, 0x80, 0x60, 0x40])
            .gas(100_000u64)
            .gas_price(1_000_000_000u64)
            .nonce(0u64)
            .chain_id(137u64)
            .into();

        let raw = authority.sign_transaction(&tx).unwrap();
        assert!(!raw.is_empty());
    }

    proptest! {
        #[test]
        fn derivation_is_deterministic(scalar in 1u128..) {
            // Left-padded u128 scalars are always valid secp256k1 keys.
            let key = format!("{scalar:064x}");
            let first = private_key_to_address(&key).unwrap();
            let second = private_key_to_address(&key).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
