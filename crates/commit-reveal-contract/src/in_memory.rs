use alloy_primitives::{address, Address, U256};
use evm_utils::EvmRunner;
use parking_lot::Mutex;
use tracing::{debug, info};

use crate::{
    ArtifactStore, ChainClient, CommitRevealError, ContractFactory, ContractResult, Deployed,
};

/// First of the well-known development accounts (Anvil, Hardhat Network).
pub const DEV_ACCOUNT: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

/// Chain client backed by an embedded EVM. Every signer account is endowed with the maximal
/// balance, and deployments are final as soon as they are executed.
#[derive(Debug)]
pub struct InMemoryChainClient {
    evm: Mutex<EvmRunner>,
    signers: Vec<Address>,
    artifacts: ArtifactStore,
}

impl InMemoryChainClient {
    pub fn new(signers: Vec<Address>, artifacts: ArtifactStore) -> Self {
        let mut evm = EvmRunner::new();
        for signer in &signers {
            evm.endow_account(*signer, U256::MAX);
        }

        Self {
            evm: Mutex::new(evm),
            signers,
            artifacts,
        }
    }

    /// Client with the single default development account as its signer.
    pub fn with_dev_account(artifacts: ArtifactStore) -> Self {
        Self::new(vec![DEV_ACCOUNT], artifacts)
    }

    /// Number of transactions sent from `address`.
    pub fn nonce(&self, address: Address) -> ContractResult<u64> {
        Ok(self.evm.lock().get_nonce(address)?)
    }

    /// Size of the runtime code stored under `address`.
    pub fn code_size(&self, address: Address) -> ContractResult<usize> {
        Ok(self.evm.lock().code_size(address)?)
    }
}

impl ChainClient for InMemoryChainClient {
    type Pending = Deployed;

    async fn contract_factory(&self, name: &str) -> ContractResult<ContractFactory> {
        self.artifacts.contract_factory(name)
    }

    async fn deploy(&self, factory: &ContractFactory, args: &[U256]) -> ContractResult<Deployed> {
        let code = factory.deployment_code(args)?;
        let deployer = *self.signers.first().ok_or(CommitRevealError::NoSigners)?;

        let mut evm = self.evm.lock();
        let (balance, nonce) = (evm.get_balance(deployer)?, evm.get_nonce(deployer)?);
        debug!(%deployer, %balance, nonce, "Deployer account state");
        let address = evm.create(code.to_vec(), Some(deployer))?;
        drop(evm);
        info!(%deployer, %address, "Deployment executed in the embedded EVM");

        Ok(Deployed(address))
    }

    async fn signers(&self) -> ContractResult<Vec<Address>> {
        Ok(self.signers.clone())
    }
}
