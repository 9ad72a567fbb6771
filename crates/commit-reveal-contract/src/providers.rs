use alloy_network::{Ethereum, EthereumWallet, Network};
use alloy_provider::{
    fillers::{FillerControlFlow, TxFiller, WalletFiller},
    Provider, ProviderBuilder, SendableTx,
};
use alloy_signer_local::PrivateKeySigner;
use alloy_transport::{Transport, TransportResult};

use crate::{CommitRevealError, ContractResult};

/// Creates a provider for the given RPC URL, without a local wallet. Transactions are submitted
/// with `eth_sendTransaction`, so the node must manage the sending accounts itself (which is the
/// case for development nodes like Anvil or Hardhat Network).
pub async fn create_node_signing_provider(rpc_url: &str) -> ContractResult<impl Provider + Clone> {
    ProviderBuilder::new()
        .with_recommended_fillers()
        .filler(LoggingFiller::default())
        .on_builtin(rpc_url)
        .await
        .map_err(CommitRevealError::ProviderError)
}

/// Creates a provider for the given RPC URL, with the given signers. This provider signs
/// transactions locally, with the key matching the transaction's `from` field (or the first
/// signer when `from` is not set).
///
/// Note: The nonce is fetched before every transaction.
pub async fn create_provider_with_signers(
    rpc_url: &str,
    signers: &[PrivateKeySigner],
) -> ContractResult<impl Provider + Clone> {
    let mut signers = signers.iter().cloned();
    let mut wallet = EthereumWallet::from(signers.next().ok_or(CommitRevealError::NoSigners)?);
    for signer in signers {
        wallet.register_signer(signer);
    }

    ProviderBuilder::new()
        .with_recommended_fillers()
        .filler(WalletFiller::new(wallet))
        .filler(LoggingFiller::default())
        .on_builtin(rpc_url)
        .await
        .map_err(CommitRevealError::ProviderError)
}

/// A noop filler that reports transaction details once it is prepared, just before sending. For
/// debugging purposes.
#[derive(Copy, Clone, Debug, Default)]
pub struct LoggingFiller {}

impl TxFiller for LoggingFiller {
    type Fillable = ();

    fn status(&self, _tx: &<Ethereum as Network>::TransactionRequest) -> FillerControlFlow {
        FillerControlFlow::Finished
    }

    fn fill_sync(&self, tx: &mut SendableTx<Ethereum>) {
        match tx {
            SendableTx::Builder(tx) => {
                tracing::info!(
                    sender = ?tx.from,
                    to = ?tx.to,
                    nonce = tx.nonce,
                    input_len = tx.input.input().map_or(0, |input| input.len()),
                    "Sending a transaction"
                );
            }
            SendableTx::Envelope(_) => {} // Transactions are always built by the fillers here.
        }
    }

    async fn prepare<P: Provider<T, Ethereum>, T: Transport + Clone>(
        &self,
        _provider: &P,
        _tx: &<Ethereum as Network>::TransactionRequest,
    ) -> TransportResult<Self::Fillable> {
        Ok(())
    }

    async fn fill(
        &self,
        _fillable: Self::Fillable,
        tx: SendableTx<Ethereum>,
    ) -> TransportResult<SendableTx<Ethereum>> {
        Ok(tx)
    }
}
