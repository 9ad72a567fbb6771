use crate::config::{LoggingFormat, Network};

pub const DEFAULT_LOGGING_FORMAT: LoggingFormat = LoggingFormat::Text;
pub const DEFAULT_NETWORK: Network = Network::Rpc;
pub const DEFAULT_NODE_RPC_URL: &str = "http://localhost:8545";
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";
pub const DEFAULT_CONTRACTS_DIR: &str = "contracts";
