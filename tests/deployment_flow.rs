//! End-to-end governance deployment against a mocked JSON-RPC endpoint.

#![allow(clippy::unwrap_used)]

use ethers::utils::get_contract_address;
use evm_gov_rpc::{
    ChainClient, ChainError, EvmRpcClient, GasPrice, NetworkConfig, SUGGESTED_HIGH_GAS_LIMIT,
    SigningAuthority, deploy_governance_contract,
};
use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

// Well-known development key, safe to embed.
const DEV_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
const BROADCAST_HASH: &str = "0xf900253477a50a1cd808f61058f68eb2e73afcb0161c31e82ecafa034d7c8eec";

async fn mock_rpc(server: &MockServer, rpc_method: &str, result: Value) {
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "method": rpc_method })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": result,
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn deployment_broadcasts_and_returns_derived_address() {
    let server = MockServer::start().await;
    mock_rpc(&server, "eth_chainId", json!("0x7a69")).await;
    mock_rpc(&server, "eth_getTransactionCount", json!("0x7")).await;
    mock_rpc(&server, "eth_sendRawTransaction", json!(BROADCAST_HASH)).await;

    let client = EvmRpcClient::connect(NetworkConfig::custom(server.uri(), 31_337)).unwrap();
    let authority = SigningAuthority::from_private_key(DEV_KEY, 31_337).unwrap();

    let result = deploy_governance_contract(
        &client,
        &authority,
        GasPrice::legacy(1_000_000_000),
        SUGGESTED_HIGH_GAS_LIMIT,
    )
    .await
    .unwrap();

    assert_eq!(result.transaction_hash, BROADCAST_HASH.parse().unwrap());
    assert_eq!(
        result.contract_address,
        get_contract_address(authority.address(), 7)
    );
}

#[tokio::test]
async fn deployed_address_reports_as_contract_once_mined() {
    let server = MockServer::start().await;
    mock_rpc(&server, "eth_chainId", json!("0x7a69")).await;
    mock_rpc(&server, "eth_getTransactionCount", json!("0x0")).await;
    mock_rpc(&server, "eth_sendRawTransaction", json!(BROADCAST_HASH)).await;
    // Once mined, the derived address carries the governance runtime code.
    mock_rpc(&server, "eth_getCode", json!("0x6080604052348015600f57600080fd5b50")).await;

    let client = EvmRpcClient::connect(NetworkConfig::custom(server.uri(), 31_337)).unwrap();
    let authority = SigningAuthority::from_private_key(DEV_KEY, 31_337).unwrap();

    let result = deploy_governance_contract(
        &client,
        &authority,
        GasPrice::legacy(1_000_000_000),
        SUGGESTED_HIGH_GAS_LIMIT,
    )
    .await
    .unwrap();

    let deployed = client
        .is_contract(&format!("{:#x}", result.contract_address))
        .await
        .unwrap();
    assert!(deployed);
}

#[tokio::test]
async fn mismatched_chain_id_fails_before_broadcast() {
    let server = MockServer::start().await;
    // Node reports BSC; the authority is bound to Ethereum mainnet.
    mock_rpc(&server, "eth_chainId", json!("0x38")).await;

    let client = EvmRpcClient::connect(NetworkConfig::custom(server.uri(), 56)).unwrap();
    let authority = SigningAuthority::from_private_key(DEV_KEY, 1).unwrap();

    let err = deploy_governance_contract(
        &client,
        &authority,
        GasPrice::legacy(1_000_000_000),
        SUGGESTED_HIGH_GAS_LIMIT,
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err,
        ChainError::ChainIdMismatch { signer: 1, node: 56 }
    ));

    // No broadcast (or even a nonce fetch) may have reached the endpoint.
    let requests = server.received_requests().await.unwrap();
    for request in &requests {
        let body: Value = serde_json::from_slice(&request.body).unwrap();
        assert_eq!(body["method"], "eth_chainId");
    }
}
