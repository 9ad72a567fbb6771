use alloy_network::{Ethereum, ReceiptResponse, TransactionBuilder};
use alloy_primitives::{Address, U256};
use alloy_provider::{PendingTransactionBuilder, Provider};
use alloy_rpc_types::TransactionRequest;
use alloy_transport::BoxTransport;
use tracing::info;

use crate::{
    ArtifactStore, ChainClient, CommitRevealError, ContractFactory, ContractResult,
    PendingDeployment,
};

/// Chain client talking JSON-RPC to a node.
///
/// When constructed with an explicit list of signer addresses (matching the provider's wallet),
/// those are used as signer identities. Otherwise the node's own accounts (`eth_accounts`) are.
#[derive(Clone)]
pub struct RpcChainClient<P> {
    provider: P,
    signers: Option<Vec<Address>>,
    artifacts: ArtifactStore,
}

impl<P: Provider + Clone> RpcChainClient<P> {
    /// Use a provider that signs locally with the keys behind `signers`.
    pub fn with_local_signers(
        provider: P,
        signers: Vec<Address>,
        artifacts: ArtifactStore,
    ) -> Self {
        Self {
            provider,
            signers: Some(signers),
            artifacts,
        }
    }

    /// Use a provider that relies on accounts managed by the node.
    pub fn with_node_accounts(provider: P, artifacts: ArtifactStore) -> Self {
        Self {
            provider,
            signers: None,
            artifacts,
        }
    }

    async fn deployer(&self) -> ContractResult<Address> {
        self.signers()
            .await?
            .first()
            .copied()
            .ok_or(CommitRevealError::NoSigners)
    }
}

impl<P: Provider + Clone> ChainClient for RpcChainClient<P> {
    type Pending = PendingRpcDeployment;

    async fn contract_factory(&self, name: &str) -> ContractResult<ContractFactory> {
        self.artifacts.contract_factory(name)
    }

    async fn deploy(
        &self,
        factory: &ContractFactory,
        args: &[U256],
    ) -> ContractResult<PendingRpcDeployment> {
        let code = factory.deployment_code(args)?;
        let deployer = self.deployer().await?;

        let tx = TransactionRequest::default()
            .with_from(deployer)
            .with_deploy_code(code);
        let pending = self.provider.send_transaction(tx).await?;
        info!(tx_hash = %pending.tx_hash(), %deployer, "Deployment transaction submitted");

        Ok(PendingRpcDeployment { pending })
    }

    async fn signers(&self) -> ContractResult<Vec<Address>> {
        match &self.signers {
            Some(signers) => Ok(signers.clone()),
            None => Ok(self.provider.get_accounts().await?),
        }
    }
}

/// Deployment transaction sent to the node, not yet included in a block.
pub struct PendingRpcDeployment {
    pending: PendingTransactionBuilder<BoxTransport, Ethereum>,
}

impl PendingDeployment for PendingRpcDeployment {
    async fn wait_for_deployment(self) -> ContractResult<Address> {
        let receipt = self.pending.get_receipt().await?;
        let tx_hash = receipt.transaction_hash;

        if !receipt.status() {
            return Err(CommitRevealError::DeploymentReverted(tx_hash));
        }
        receipt
            .contract_address
            .ok_or(CommitRevealError::MissingContractAddress(tx_hash))
    }
}
