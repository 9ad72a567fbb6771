pub use evm_runner::{EvmRunner, EvmRunnerError};
pub use revm_primitives;

pub mod compilation;
mod evm_runner;
