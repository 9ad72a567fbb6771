use std::convert::Infallible;

use revm::{
    primitives::{address, Address, EVMError, ExecutionResult, Output, TxKind, U256},
    Evm, InMemoryDB,
};
use revm_primitives::{AccountInfo, KECCAK_EMPTY};
use thiserror::Error;

/// Evm runner errors
#[derive(Debug, Error)]
#[error(transparent)]
#[non_exhaustive]
#[allow(missing_docs)]
pub enum EvmRunnerError {
    #[error("Evm transaction reverted")]
    Revert(ExecutionResult),

    #[error("Evm transaction trapped")]
    Halt(ExecutionResult),

    #[error("Account does not exist")]
    AccountDoesNotExists(Address),

    #[error("Address does not have bytecode")]
    AddressDoesNotHaveBytecode(Address),

    #[error("Evm execution error")]
    EvmExecution(#[from] EVMError<Infallible>),
}

/// In-process EVM backed by an in-memory state database. Transactions are applied immediately,
/// so there is no notion of pending or unconfirmed state.
#[derive(Debug, Default)]
pub struct EvmRunner {
    pub db: InMemoryDB,
}

impl EvmRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create (or overwrite) a plain account at `address` holding `balance`.
    pub fn endow_account(&mut self, address: Address, balance: U256) {
        self.db.insert_account_info(
            address,
            AccountInfo {
                nonce: 0_u64,
                balance,
                code_hash: KECCAK_EMPTY,
                code: None,
            },
        );
    }

    /// Return code size of given address.
    pub fn code_size(&self, address: Address) -> Result<usize, EvmRunnerError> {
        Ok(self
            .db
            .accounts
            .get(&address)
            .ok_or(EvmRunnerError::AccountDoesNotExists(address))?
            .info
            .code
            .clone()
            .ok_or(EvmRunnerError::AddressDoesNotHaveBytecode(address))?
            .len())
    }

    /// Apply `create` transaction with given `bytecode` as creation bytecode. Return created
    /// `address`.
    pub fn create(
        &mut self,
        bytecode: Vec<u8>,
        caller: Option<Address>,
    ) -> Result<Address, EvmRunnerError> {
        let mut evm = Evm::builder()
            .with_db(&mut self.db)
            .modify_tx_env(|tx| {
                tx.caller = caller.unwrap_or(address!("0000000000000000000000000000000000000000"));
                tx.gas_limit = u64::MAX;
                tx.transact_to = TxKind::Create;
                tx.data = bytecode.into();
                tx.chain_id = Some(1);
            })
            .build();

        let result = evm.transact_commit()?;

        match result {
            ExecutionResult::Success {
                output: Output::Create(_, Some(address)),
                ..
            } => Ok(address),
            ExecutionResult::Success { .. } => unreachable!("create transaction yields an address"),
            ExecutionResult::Revert { .. } => Err(EvmRunnerError::Revert(result)),
            ExecutionResult::Halt { .. } => Err(EvmRunnerError::Halt(result)),
        }
    }

    pub fn get_balance(&self, address: Address) -> Result<U256, EvmRunnerError> {
        Ok(self
            .db
            .accounts
            .get(&address)
            .ok_or(EvmRunnerError::AccountDoesNotExists(address))?
            .info
            .balance)
    }

    pub fn get_nonce(&self, address: Address) -> Result<u64, EvmRunnerError> {
        Ok(self
            .db
            .accounts
            .get(&address)
            .ok_or(EvmRunnerError::AccountDoesNotExists(address))?
            .info
            .nonce)
    }
}
