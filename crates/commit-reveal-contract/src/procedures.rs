use std::fmt::{self, Display, Formatter};

use alloy_primitives::{Address, U256};
use tracing::info;

use crate::{ChainClient, CommitRevealError, ContractResult, PendingDeployment};

/// Name of the compiled contract deployed by [`deploy_commit_reveal`].
pub const COMMIT_REVEAL_CONTRACT: &str = "CommitReveal";

/// Constructor parameters of the `CommitReveal` contract, in positional order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DeploymentParameters {
    pub commit_duration_secs: u64,
    pub reveal_duration_secs: u64,
    pub max_choice: u64,
}

impl DeploymentParameters {
    /// Three minutes for each phase, options `1..=3`.
    pub const COMMIT_REVEAL: Self = Self {
        commit_duration_secs: 3 * 60,
        reveal_duration_secs: 3 * 60,
        max_choice: 3,
    };

    pub fn constructor_args(&self) -> [U256; 3] {
        [
            U256::from(self.commit_duration_secs),
            U256::from(self.reveal_duration_secs),
            U256::from(self.max_choice),
        ]
    }
}

/// Outcome of [`deploy_commit_reveal`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CommitRevealDeployed {
    pub address: Address,
}

impl Display for CommitRevealDeployed {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{COMMIT_REVEAL_CONTRACT} deployed to: {}", self.address)
    }
}

/// Outcome of [`show_deployer_address`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DeployerAddress(pub Address);

impl Display for DeployerAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Deploying with address: {}", self.0)
    }
}

/// Deploy a fresh `CommitReveal` instance and wait until it is on chain.
pub async fn deploy_commit_reveal(
    client: &impl ChainClient,
) -> ContractResult<CommitRevealDeployed> {
    let factory = client.contract_factory(COMMIT_REVEAL_CONTRACT).await?;
    let params = DeploymentParameters::COMMIT_REVEAL;

    info!(contract = factory.name(), ?params, "Submitting deployment");
    let pending = client.deploy(&factory, &params.constructor_args()).await?;

    let address = pending.wait_for_deployment().await?;
    info!(%address, "Deployment confirmed");

    Ok(CommitRevealDeployed { address })
}

/// Report the address of the first configured signer.
pub async fn show_deployer_address(client: &impl ChainClient) -> ContractResult<DeployerAddress> {
    client
        .signers()
        .await?
        .first()
        .copied()
        .map(DeployerAddress)
        .ok_or(CommitRevealError::NoSigners)
}
