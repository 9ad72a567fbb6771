use std::{fmt::Display, future::Future, str::FromStr};

use alloy_signer_local::PrivateKeySigner;
use anyhow::{anyhow, Result};
use commit_reveal_contract::{
    deploy_commit_reveal,
    providers::{create_node_signing_provider, create_provider_with_signers},
    show_deployer_address, ArtifactStore, ChainClient, CommitRevealDeployed, ContractResult,
    DeployerAddress, InMemoryChainClient, RpcChainClient,
};
use tracing::info;

use crate::config::{Network, ScriptConfig};

/// A script body, runnable against any chain client.
pub trait Procedure {
    type Output: Display;

    fn run<C: ChainClient>(
        &self,
        client: &C,
    ) -> impl Future<Output = ContractResult<Self::Output>>;
}

/// Deploy a new `CommitReveal` instance.
#[derive(Copy, Clone, Debug)]
pub struct Deploy;

impl Procedure for Deploy {
    type Output = CommitRevealDeployed;

    async fn run<C: ChainClient>(&self, client: &C) -> ContractResult<CommitRevealDeployed> {
        deploy_commit_reveal(client).await
    }
}

/// Print the address that signs deployments.
#[derive(Copy, Clone, Debug)]
pub struct ShowAddress;

impl Procedure for ShowAddress {
    type Output = DeployerAddress;

    async fn run<C: ChainClient>(&self, client: &C) -> ContractResult<DeployerAddress> {
        show_deployer_address(client).await
    }
}

/// Build the chain client described by `config` and run `procedure` against it.
pub async fn execute<P: Procedure>(procedure: &P, config: &ScriptConfig) -> Result<P::Output> {
    let chain = &config.chain;
    let signers = parse_signers(&config.keys.signing_keys)?;
    let addresses = signers.iter().map(|signer| signer.address()).collect();
    let artifacts = ArtifactStore::new(&chain.artifacts_dir, &chain.contracts_dir);

    let output = match (chain.network, signers.is_empty()) {
        (Network::InMemory, true) => {
            info!("Using the embedded EVM with the default development account");
            let client = InMemoryChainClient::with_dev_account(artifacts);
            procedure.run(&client).await
        }
        (Network::InMemory, false) => {
            info!("Using the embedded EVM with configured signers");
            let client = InMemoryChainClient::new(addresses, artifacts);
            procedure.run(&client).await
        }
        (Network::Rpc, true) => {
            info!(url = %chain.node_rpc_url, "Using node-managed accounts");
            let provider = create_node_signing_provider(&chain.node_rpc_url).await?;
            let client = RpcChainClient::with_node_accounts(provider, artifacts);
            procedure.run(&client).await
        }
        (Network::Rpc, false) => {
            info!(url = %chain.node_rpc_url, "Signing locally");
            let provider = create_provider_with_signers(&chain.node_rpc_url, &signers).await?;
            let client = RpcChainClient::with_local_signers(provider, addresses, artifacts);
            procedure.run(&client).await
        }
    };

    Ok(output?)
}

fn parse_signers(keys: &[String]) -> Result<Vec<PrivateKeySigner>> {
    keys.iter()
        .enumerate()
        .map(|(index, key)| {
            PrivateKeySigner::from_str(key)
                .map_err(|e| anyhow!("Invalid signing key #{index}: {e}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use assert2::{assert, let_assert};

    use super::parse_signers;

    #[test]
    fn signing_keys_are_parsed_in_order() {
        let signers = parse_signers(&[
            "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80".to_string(),
            "59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d".to_string(),
        ])
        .unwrap();

        assert!(signers[0].address().to_string() == "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
        assert!(signers[1].address().to_string() == "0x70997970C51812dc3A010C7d01b50e0d17dc79C8");
    }

    #[test]
    fn invalid_key_is_rejected() {
        let_assert!(Err(error) = parse_signers(&["not a key".to_string()]));
        assert!(error.to_string().starts_with("Invalid signing key #0"));
    }
}
