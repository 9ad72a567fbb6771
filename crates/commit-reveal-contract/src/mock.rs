//! Scripted chain client for exercising the procedures without a node.

use std::collections::VecDeque;

use alloy_primitives::{bytes, Address, TxHash, U256};
use parking_lot::Mutex;

use crate::{
    ChainClient, CommitRevealError, ContractFactory, ContractResult, Deployed,
    FactoryResolutionError, DEV_ACCOUNT,
};

/// Arguments of a single `deploy` call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeployCall {
    pub contract: String,
    pub args: Vec<U256>,
}

#[derive(Debug)]
enum DeployBehavior {
    /// Hand out these addresses, one per deployment.
    Succeed(VecDeque<Address>),
    Revert,
}

#[derive(Debug)]
pub struct MockChainClient {
    factory_available: bool,
    deploy_behavior: Mutex<DeployBehavior>,
    signers: Vec<Address>,
    deploy_calls: Mutex<Vec<DeployCall>>,
}

impl MockChainClient {
    fn new(
        factory_available: bool,
        deploy_behavior: DeployBehavior,
        signers: Vec<Address>,
    ) -> Self {
        Self {
            factory_available,
            deploy_behavior: Mutex::new(deploy_behavior),
            signers,
            deploy_calls: Mutex::new(vec![]),
        }
    }

    /// Deployments succeed and return `addresses` in order.
    pub fn deploying_to(addresses: Vec<Address>) -> Self {
        Self::new(
            true,
            DeployBehavior::Succeed(addresses.into()),
            vec![DEV_ACCOUNT],
        )
    }

    /// Every deployment reverts.
    pub fn failing_deploy() -> Self {
        Self::new(true, DeployBehavior::Revert, vec![DEV_ACCOUNT])
    }

    /// No contract can be resolved.
    pub fn without_factory() -> Self {
        Self::new(
            false,
            DeployBehavior::Succeed(VecDeque::new()),
            vec![DEV_ACCOUNT],
        )
    }

    pub fn with_signers(signers: Vec<Address>) -> Self {
        Self::new(true, DeployBehavior::Succeed(VecDeque::new()), signers)
    }

    pub fn deploy_calls(&self) -> Vec<DeployCall> {
        self.deploy_calls.lock().clone()
    }
}

impl ChainClient for MockChainClient {
    type Pending = Deployed;

    async fn contract_factory(&self, name: &str) -> ContractResult<ContractFactory> {
        match self.factory_available {
            true => Ok(ContractFactory::new(name, bytes!("00"), None)),
            false => Err(FactoryResolutionError::NotFound.for_contract(name)),
        }
    }

    async fn deploy(&self, factory: &ContractFactory, args: &[U256]) -> ContractResult<Deployed> {
        self.deploy_calls.lock().push(DeployCall {
            contract: factory.name().to_string(),
            args: args.to_vec(),
        });

        match &mut *self.deploy_behavior.lock() {
            DeployBehavior::Succeed(addresses) => addresses
                .pop_front()
                .map(Deployed)
                .ok_or_else(|| CommitRevealError::MissingContractAddress(TxHash::ZERO)),
            DeployBehavior::Revert => Err(CommitRevealError::DeploymentReverted(TxHash::ZERO)),
        }
    }

    async fn signers(&self) -> ContractResult<Vec<Address>> {
        Ok(self.signers.clone())
    }
}
