//! Deployments through the JSON-RPC client, against a local node that answers with scripted
//! responses and records every request it gets.

use std::{path::PathBuf, str::FromStr, sync::Arc};

use alloy_provider::ProviderBuilder;
use alloy_signer_local::PrivateKeySigner;
use assert2::{assert, let_assert};
use axum::{extract::State, routing::post, Json, Router};
use commit_reveal_contract::{
    alloy_primitives::{address, b256, Address, TxHash},
    deploy_commit_reveal,
    providers::{create_node_signing_provider, create_provider_with_signers},
    show_deployer_address, ArtifactStore, CommitRevealError, RpcChainClient, DEV_ACCOUNT,
};
use parking_lot::Mutex;
use rstest::{fixture, rstest};
use serde_json::{json, Value};
use tokio::net::TcpListener;

const NODE_ACCOUNT: Address = address!("70997970C51812dc3A010C7d01b50e0d17dc79C8");
const OTHER_NODE_ACCOUNT: Address = address!("3C44CdDdB6a900fa2b585dd299e03d12FA4293BC");
const DEPLOYED: Address = address!("5FbDB2315678afecb367f032d93F642f64180aa3");
const TX_HASH: TxHash = b256!("8b1c1d0bd5b2ae2ed0f0b7b3c7e8f9a5d4c3b2a1908f7e6d5c4b3a2918f7e6d5");
const DEV_ACCOUNT_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// Creation bytecode of the `CommitReveal` fixture artifact.
const FIXTURE_BYTECODE: &str = "6001600c60003960016000f300";

/// `(180, 180, 3)` as three ABI words.
fn constructor_args_hex() -> String {
    format!("{:064x}{:064x}{:064x}", 180, 180, 3)
}

#[derive(Copy, Clone, Debug)]
enum ReceiptOutcome {
    Deployed,
    Reverted,
    NoContractAddress,
}

struct ScriptedNode {
    outcome: ReceiptOutcome,
    requests: Mutex<Vec<Value>>,
}

impl ScriptedNode {
    fn result_for(&self, method: &str) -> Option<Value> {
        match method {
            "eth_accounts" => Some(json!([NODE_ACCOUNT, OTHER_NODE_ACCOUNT])),
            "eth_chainId" => Some(json!("0x7a69")),
            "eth_getTransactionCount" => Some(json!("0x0")),
            "eth_estimateGas" => Some(json!("0x100000")),
            "eth_gasPrice" | "eth_maxPriorityFeePerGas" => Some(json!("0x3b9aca00")),
            "eth_feeHistory" => Some(json!({
                "oldestBlock": "0x1",
                "baseFeePerGas": ["0x3b9aca00", "0x3b9aca00"],
                "gasUsedRatio": [0.5],
                "reward": [["0x3b9aca00"]],
            })),
            "eth_sendTransaction" | "eth_sendRawTransaction" => Some(json!(TX_HASH)),
            "eth_getTransactionReceipt" => Some(self.receipt()),
            _ => None,
        }
    }

    fn receipt(&self) -> Value {
        let (status, contract_address) = match self.outcome {
            ReceiptOutcome::Deployed => ("0x1", Some(DEPLOYED)),
            ReceiptOutcome::Reverted => ("0x0", None),
            ReceiptOutcome::NoContractAddress => ("0x1", None),
        };
        json!({
            "type": "0x2",
            "status": status,
            "cumulativeGasUsed": "0x5208",
            "logs": [],
            "logsBloom": format!("0x{}", "0".repeat(512)),
            "transactionHash": TX_HASH,
            "transactionIndex": "0x0",
            "blockHash": format!("0x{}", "11".repeat(32)),
            "blockNumber": "0x1",
            "gasUsed": "0x5208",
            "effectiveGasPrice": "0x3b9aca00",
            "from": NODE_ACCOUNT,
            "to": null,
            "contractAddress": contract_address,
        })
    }

    fn calls_of(&self, method: &str) -> Vec<Value> {
        self.requests
            .lock()
            .iter()
            .filter(|request| request["method"] == method)
            .map(|request| request["params"].clone())
            .collect()
    }
}

async fn handle_rpc(
    State(node): State<Arc<ScriptedNode>>,
    Json(request): Json<Value>,
) -> Json<Value> {
    node.requests.lock().push(request.clone());
    let id = request["id"].clone();
    let method = request["method"].as_str().unwrap_or_default();

    Json(match node.result_for(method) {
        Some(result) => json!({ "jsonrpc": "2.0", "id": id, "result": result }),
        None => json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": { "code": -32601, "message": format!("method {method} not supported") },
        }),
    })
}

/// Start a scripted node on a free local port and return its URL.
async fn start_node(outcome: ReceiptOutcome) -> (String, Arc<ScriptedNode>) {
    let node = Arc::new(ScriptedNode {
        outcome,
        requests: Mutex::new(vec![]),
    });
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());

    let app = Router::new()
        .route("/", post(handle_rpc))
        .with_state(node.clone());
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

    (url, node)
}

#[fixture]
fn artifacts() -> ArtifactStore {
    let fixtures = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    ArtifactStore::new(fixtures.join("artifacts"), fixtures.join("contracts"))
}

async fn node_accounts_client(
    url: &str,
    artifacts: ArtifactStore,
) -> RpcChainClient<impl alloy_provider::Provider + Clone> {
    let provider = ProviderBuilder::new().on_builtin(url).await.unwrap();
    RpcChainClient::with_node_accounts(provider, artifacts)
}

#[rstest]
#[tokio::test]
async fn signers_fall_back_to_node_accounts(artifacts: ArtifactStore) {
    let (url, node) = start_node(ReceiptOutcome::Deployed).await;
    let client = node_accounts_client(&url, artifacts).await;

    let reported = show_deployer_address(&client).await.unwrap();

    assert!(reported.0 == NODE_ACCOUNT);
    assert!(node.calls_of("eth_accounts").len() == 1);
}

#[rstest]
#[tokio::test]
async fn deployment_is_sent_from_first_node_account(artifacts: ArtifactStore) {
    let (url, node) = start_node(ReceiptOutcome::Deployed).await;
    let client = node_accounts_client(&url, artifacts).await;

    let deployed = deploy_commit_reveal(&client).await.unwrap();
    assert!(deployed.address == DEPLOYED);

    let sent = node.calls_of("eth_sendTransaction");
    assert!(sent.len() == 1);
    let tx = &sent[0][0];
    assert!(Address::from_str(tx["from"].as_str().unwrap()).unwrap() == NODE_ACCOUNT);
    assert!(tx["to"].is_null());

    let input = tx["input"].as_str().or(tx["data"].as_str()).unwrap();
    assert!(input == format!("0x{FIXTURE_BYTECODE}{}", constructor_args_hex()));
}

#[rstest]
#[tokio::test]
async fn failed_receipt_status_is_a_revert(artifacts: ArtifactStore) {
    let (url, _node) = start_node(ReceiptOutcome::Reverted).await;
    let client = node_accounts_client(&url, artifacts).await;

    let_assert!(
        Err(CommitRevealError::DeploymentReverted(hash)) = deploy_commit_reveal(&client).await
    );
    assert!(hash == TX_HASH);
}

#[rstest]
#[tokio::test]
async fn receipt_without_contract_address_fails(artifacts: ArtifactStore) {
    let (url, _node) = start_node(ReceiptOutcome::NoContractAddress).await;
    let client = node_accounts_client(&url, artifacts).await;

    let_assert!(
        Err(CommitRevealError::MissingContractAddress(hash)) = deploy_commit_reveal(&client).await
    );
    assert!(hash == TX_HASH);
}

#[rstest]
#[tokio::test]
async fn node_signing_provider_fills_the_transaction(artifacts: ArtifactStore) {
    let (url, node) = start_node(ReceiptOutcome::Deployed).await;
    let provider = create_node_signing_provider(&url).await.unwrap();
    let client = RpcChainClient::with_node_accounts(provider, artifacts);

    let deployed = deploy_commit_reveal(&client).await.unwrap();
    assert!(deployed.address == DEPLOYED);

    let sent = node.calls_of("eth_sendTransaction");
    assert!(sent.len() == 1);
    let tx = &sent[0][0];
    assert!(Address::from_str(tx["from"].as_str().unwrap()).unwrap() == NODE_ACCOUNT);
    assert!(tx["nonce"] == "0x0");
    assert!(tx["chainId"] == "0x7a69");
}

#[rstest]
#[tokio::test]
async fn local_signers_submit_raw_transactions(artifacts: ArtifactStore) {
    let (url, node) = start_node(ReceiptOutcome::Deployed).await;
    let signer = PrivateKeySigner::from_str(DEV_ACCOUNT_KEY).unwrap();
    let provider = create_provider_with_signers(&url, &[signer]).await.unwrap();
    let client = RpcChainClient::with_local_signers(provider, vec![DEV_ACCOUNT], artifacts);

    let deployed = deploy_commit_reveal(&client).await.unwrap();
    assert!(deployed.address == DEPLOYED);

    assert!(node.calls_of("eth_sendTransaction").is_empty());
    assert!(node.calls_of("eth_accounts").is_empty());
    let raw = node.calls_of("eth_sendRawTransaction");
    assert!(raw.len() == 1);
    let encoded = raw[0][0].as_str().unwrap();
    assert!(encoded.contains(&format!("{FIXTURE_BYTECODE}{}", constructor_args_hex())));
}

#[tokio::test]
async fn provider_with_signers_needs_a_key() {
    let result = create_provider_with_signers("http://127.0.0.1:8545", &[]).await;

    assert!(let Err(CommitRevealError::NoSigners) = result);
}
