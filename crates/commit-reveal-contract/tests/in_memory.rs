use std::path::PathBuf;

use assert2::{assert, let_assert};
use commit_reveal_contract::{
    alloy_primitives::{address, Address},
    deploy_commit_reveal, show_deployer_address, ArtifactStore, CommitRevealError,
    InMemoryChainClient, DEV_ACCOUNT,
};
use rstest::{fixture, rstest};

const SECOND_ACCOUNT: Address = address!("70997970C51812dc3A010C7d01b50e0d17dc79C8");

#[fixture]
fn artifacts() -> ArtifactStore {
    let fixtures = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    ArtifactStore::new(fixtures.join("artifacts"), fixtures.join("contracts"))
}

#[rstest]
#[tokio::test]
async fn deploys_commit_reveal_into_embedded_evm(artifacts: ArtifactStore) {
    let client = InMemoryChainClient::with_dev_account(artifacts);

    let deployed = deploy_commit_reveal(&client).await.unwrap();

    assert!(client.code_size(deployed.address).unwrap() == 1);
    assert!(deployed
        .to_string()
        .starts_with("CommitReveal deployed to: 0x"));
}

#[rstest]
#[tokio::test]
async fn every_run_creates_a_new_instance(artifacts: ArtifactStore) {
    let client = InMemoryChainClient::with_dev_account(artifacts);

    let first = deploy_commit_reveal(&client).await.unwrap();
    let second = deploy_commit_reveal(&client).await.unwrap();

    assert!(first.address != second.address);
    assert!(client.nonce(DEV_ACCOUNT).unwrap() == 2);
}

#[rstest]
#[tokio::test]
async fn reports_first_signer(artifacts: ArtifactStore) {
    let client = InMemoryChainClient::new(vec![SECOND_ACCOUNT, DEV_ACCOUNT], artifacts);

    let reported = show_deployer_address(&client).await.unwrap();

    assert!(reported.0 == SECOND_ACCOUNT);
}

#[rstest]
#[tokio::test]
async fn deployment_without_signers_fails(artifacts: ArtifactStore) {
    let client = InMemoryChainClient::new(vec![], artifacts);

    let_assert!(Err(CommitRevealError::NoSigners) = deploy_commit_reveal(&client).await);
}

#[tokio::test]
async fn missing_artifact_fails_before_deploying() {
    let client = InMemoryChainClient::with_dev_account(ArtifactStore::new(
        "/nonexistent/artifacts",
        "/nonexistent/contracts",
    ));

    let_assert!(
        Err(CommitRevealError::FactoryResolution { .. }) = deploy_commit_reveal(&client).await
    );
}
