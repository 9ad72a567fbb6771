use std::{io, path::PathBuf};

use alloy_primitives::TxHash;
use alloy_provider::PendingTransactionError;
use alloy_transport::TransportError;
use evm_utils::{compilation::CompilationError, EvmRunnerError};
use thiserror::Error;

/// Any failure of a deployment or a signer query. None of them is recoverable locally.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CommitRevealError {
    #[error("Contract factory for `{name}` could not be resolved")]
    FactoryResolution {
        name: String,
        #[source]
        reason: FactoryResolutionError,
    },

    #[error("`{contract}` constructor expects {expected} argument(s), got {actual}")]
    ConstructorArity {
        contract: String,
        expected: usize,
        actual: usize,
    },

    #[error("Provider error")]
    ProviderError(#[from] TransportError),

    #[error("Couldn't track the deployment transaction")]
    WatchError(#[from] PendingTransactionError),

    #[error("Deployment transaction {0} reverted")]
    DeploymentReverted(TxHash),

    #[error("Receipt of transaction {0} carries no contract address")]
    MissingContractAddress(TxHash),

    #[error("No signer identity is available")]
    NoSigners,

    #[error("Embedded EVM execution failed")]
    Evm(#[from] EvmRunnerError),
}

/// Reasons why a contract name could not be turned into deployable bytecode.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FactoryResolutionError {
    #[error("no artifact or Solidity source found")]
    NotFound,

    #[error("multiple artifacts match, use a fully qualified name: {}", .0.join(", "))]
    Ambiguous(Vec<String>),

    #[error("cannot read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed artifact {}", .path.display())]
    MalformedArtifact {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("artifact describes contract `{0}`")]
    NameMismatch(String),

    #[error("contract is abstract or an interface, it has no creation bytecode")]
    Abstract,

    #[error("bytecode needs unlinked libraries: {}", .0.join(", "))]
    UnlinkedLibraries(Vec<String>),

    #[error("invalid bytecode")]
    InvalidBytecode(#[from] hex::FromHexError),

    #[error("compilation failed")]
    Compilation(#[from] CompilationError),
}

impl FactoryResolutionError {
    pub fn for_contract(self, name: &str) -> CommitRevealError {
        CommitRevealError::FactoryResolution {
            name: name.to_string(),
            reason: self,
        }
    }
}
