//! # Governance Contract Deployment
//!
//! Stateless routine submitting the governance contract-creation
//! transaction and reporting its outcome.
//!
//! The routine is parameterized purely by a [`ChainClient`] and a
//! [`SigningAuthority`]; it never branches on chain identity, so the same
//! code path deploys to every supported network. It does not wait for
//! mining: the contract address is computed offline from sender and nonce,
//! and callers needing confirmation poll
//! [`ChainClient::get_transaction_receipt`] separately.

use ethers::types::transaction::eip2718::TypedTransaction;
use ethers::types::{Address, Bytes, Eip1559TransactionRequest, H256, TransactionRequest};
use ethers::utils::get_contract_address;
use serde::{Deserialize, Serialize};

use crate::client::ChainClient;
use crate::error::{ChainError, ChainResult};
use crate::gas::GasPrice;
use crate::signer::SigningAuthority;

/// Creation bytecode of the governance contract, deployed once per network.
const GOVERNANCE_BYTECODE_HEX: &str = concat!(
    "608060405234801561001057600080fd5b50336000806101000a81548173ffff",
    "ffffffffffffffffffffffffffffffffffff021916908373ffffffffffffffff",
    "ffffffffffffffffffffffff1602179055506102d8806100606000396000f3fe",
    "608060405234801561001057600080fd5b50600436106100415760003560e01c",
    "80638da5cb5b14610046578063a6f9dae114610064578063d4ee1d9014610080",
    "575b600080fd5b61004e61009e565b60405161005b91906101f3565b60405180",
    "910390f35b61007e6004803603810190610079919061018d565b6100c2565b00",
    "5b61008861019c565b60405161009591906101f3565b60405180910390f35b60",
    "008060009054906101000a900473ffffffffffffffffffffffffffffffffffff",
    "ffff1690509056fea26469706673582212200b1f4d6e8a2c9b7e3d5a1c8f6e4b",
    "2d9a7c5e3f1b8d6a4c2e9f7b5d3a1c8e6f64736f6c63430008110033"
);

/// Outcome of a successful governance deployment.
///
/// Ownership passes to the caller, who is responsible for persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentResult {
    /// Address the contract will live at once the transaction is mined.
    pub contract_address: Address,
    /// Hash of the broadcast contract-creation transaction.
    pub transaction_hash: H256,
}

/// Deploys the governance contract through the given client.
///
/// Signs a contract-creation transaction with `authority` and broadcasts
/// it. The returned address is the deterministic function of sender address
/// and nonce; the call returns as soon as the broadcast is accepted, before
/// the transaction is mined. Not idempotent: one state-changing transaction
/// is submitted per successful call.
///
/// # Errors
///
/// Returns, without broadcasting anything:
/// - [`ChainError::InvalidGasParams`] for a zero gas price or gas limit
/// - [`ChainError::ChainIdMismatch`] if the authority's chain id disagrees
///   with the chain id the node reports
///
/// Returns [`ChainError::Rejected`] if the network refuses the broadcast
/// (insufficient funds, nonce conflict, ...).
pub async fn deploy_governance_contract<C>(
    client: &C,
    authority: &SigningAuthority,
    gas_price: GasPrice,
    gas_limit: u64,
) -> ChainResult<DeploymentResult>
where
    C: ChainClient + ?Sized,
{
    if gas_price.effective_price() == 0 {
        return Err(ChainError::invalid_gas_params(format!(
            "gas price must be positive, got {gas_price}"
        )));
    }
    if gas_limit == 0 {
        return Err(ChainError::invalid_gas_params(
            "gas limit must be positive",
        ));
    }

    // Reconcile chain identity before signing anything; a mismatch here
    // must never be discovered via a rejected broadcast.
    let node_chain_id = client.chain_id().await?;
    if node_chain_id != authority.chain_id() {
        return Err(ChainError::ChainIdMismatch {
            signer: authority.chain_id(),
            node: node_chain_id,
        });
    }

    let sender = authority.address();
    let nonce = client.get_nonce(sender).await?;
    let tx = build_creation_tx(authority, gas_price, gas_limit, nonce.as_u64())?;

    let raw = authority.sign_transaction(&tx)?;
    let transaction_hash = client.send_raw_transaction(raw).await?;

    let contract_address = get_contract_address(sender, nonce);

    tracing::info!(
        chain_id = node_chain_id,
        contract = %format!("{contract_address:#x}"),
        tx_hash = %format!("{transaction_hash:#x}"),
        "governance contract deployment broadcast"
    );

    Ok(DeploymentResult {
        contract_address,
        transaction_hash,
    })
}

fn build_creation_tx(
    authority: &SigningAuthority,
    gas_price: GasPrice,
    gas_limit: u64,
    nonce: u64,
) -> ChainResult<TypedTransaction> {
    let data = governance_bytecode()?;

    let tx = match gas_price {
        GasPrice::Legacy { gas_price } => TransactionRequest::new()
            .data(data)
            .gas(gas_limit)
            .gas_price(gas_price)
            .nonce(nonce)
            .chain_id(authority.chain_id())
            .into(),
        GasPrice::Eip1559 {
            max_fee_per_gas,
            max_priority_fee_per_gas,
        } => Eip1559TransactionRequest::new()
            .data(data)
            .gas(gas_limit)
            .max_fee_per_gas(max_fee_per_gas)
            .max_priority_fee_per_gas(max_priority_fee_per_gas)
            .nonce(nonce)
            .chain_id(authority.chain_id())
            .into(),
    };

    Ok(tx)
}

fn governance_bytecode() -> ChainResult<Bytes> {
    hex::decode(GOVERNANCE_BYTECODE_HEX)
        .map(Bytes::from)
        .map_err(|e| ChainError::internal(format!("embedded governance bytecode: {e}")))
}
