use alloy_primitives::{Bytes, U256};

use crate::{CommitRevealError, ContractResult};

/// A resolved, deployable contract.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContractFactory {
    name: String,
    bytecode: Bytes,
    constructor_arity: Option<usize>,
}

impl ContractFactory {
    /// `constructor_arity` is `None` when the contract ABI is unknown (e.g. bytecode compiled
    /// straight from source), in which case arguments are not checked.
    pub fn new(name: impl Into<String>, bytecode: Bytes, constructor_arity: Option<usize>) -> Self {
        Self {
            name: name.into(),
            bytecode,
            constructor_arity,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytecode(&self) -> &Bytes {
        &self.bytecode
    }

    pub fn constructor_arity(&self) -> Option<usize> {
        self.constructor_arity
    }

    /// Creation bytecode followed by the ABI-encoded constructor arguments.
    ///
    /// Integer arguments are static, so their encoding is just one 32-byte big-endian word each.
    /// This is the same for every `uintN` parameter type.
    pub fn deployment_code(&self, args: &[U256]) -> ContractResult<Bytes> {
        if let Some(expected) = self.constructor_arity {
            if expected != args.len() {
                return Err(CommitRevealError::ConstructorArity {
                    contract: self.name.clone(),
                    expected,
                    actual: args.len(),
                });
            }
        }

        let mut code = self.bytecode.to_vec();
        for arg in args {
            code.extend_from_slice(&arg.to_be_bytes::<32>());
        }
        Ok(code.into())
    }
}
