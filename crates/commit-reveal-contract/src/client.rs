use std::future::Future;

use alloy_primitives::{Address, U256};

use crate::{ContractFactory, ContractResult};

/// Everything the deployment procedures need from a chain: contract factories, deployments and
/// signer identities.
pub trait ChainClient {
    type Pending: PendingDeployment;

    /// Resolve a compiled contract by name.
    fn contract_factory(
        &self,
        name: &str,
    ) -> impl Future<Output = ContractResult<ContractFactory>> + Send;

    /// Submit a creation transaction for `factory` with positional constructor arguments.
    fn deploy(
        &self,
        factory: &ContractFactory,
        args: &[U256],
    ) -> impl Future<Output = ContractResult<Self::Pending>> + Send;

    /// Addresses of the configured signer identities. The first one signs deployments.
    fn signers(&self) -> impl Future<Output = ContractResult<Vec<Address>>> + Send;
}

/// A submitted deployment.
pub trait PendingDeployment {
    /// Wait until the creation transaction is confirmed and return the contract address.
    fn wait_for_deployment(self) -> impl Future<Output = ContractResult<Address>> + Send;
}

/// Deployment that is confirmed as soon as it is submitted.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Deployed(pub Address);

impl PendingDeployment for Deployed {
    async fn wait_for_deployment(self) -> ContractResult<Address> {
        Ok(self.0)
    }
}
