pub use alloy_primitives;
pub use artifacts::ArtifactStore;
pub use client::{ChainClient, Deployed, PendingDeployment};
pub use errors::{CommitRevealError, FactoryResolutionError};
pub use factory::ContractFactory;
pub use in_memory::{InMemoryChainClient, DEV_ACCOUNT};
pub use procedures::{
    deploy_commit_reveal, show_deployer_address, CommitRevealDeployed, DeployerAddress,
    DeploymentParameters, COMMIT_REVEAL_CONTRACT,
};
pub use rpc::{PendingRpcDeployment, RpcChainClient};

mod artifacts;
mod client;
mod errors;
mod factory;
mod in_memory;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
mod procedures;
pub mod providers;
mod rpc;

pub type ContractResult<T> = Result<T, CommitRevealError>;
