use std::path::PathBuf;

use clap::Parser;

use crate::{
    config::{
        defaults::*,
        enums::{LoggingFormat, Network},
    },
    ARTIFACTS_DIR_ENV, CONTRACTS_DIR_ENV, DEPLOYER_SIGNING_KEYS_ENV, LOGGING_FORMAT_ENV,
    NETWORK_ENV, NODE_RPC_URL_ENV,
};

/// Configuration for the deployment scripts through the command line arguments.
///
/// All fields are optional, as they can be provided either through environment variables or
/// through default values.
#[derive(Clone, Debug, Parser)]
pub struct CLIConfig {
    #[clap(
        long,
        value_enum,
        help = "Logging format configuration.",
        long_help = format!("Logging format configuration. If not provided, the value from the \
            environment variable `{LOGGING_FORMAT_ENV}` will be used. If that is not set, the \
            default value is `{DEFAULT_LOGGING_FORMAT:?}`.")
    )]
    pub logging_format: Option<LoggingFormat>,

    #[clap(
        long,
        value_enum,
        help = "Chain to deploy to.",
        long_help = format!("Chain to deploy to: a node reachable over JSON-RPC, or an embedded \
            EVM that lives only as long as the process. If not provided, the value from the \
            environment variable `{NETWORK_ENV}` will be used. If that is not set, the default \
            value is `{DEFAULT_NETWORK:?}`.")
    )]
    pub network: Option<Network>,

    #[clap(
        long,
        help = "URL of the Ethereum RPC node.",
        long_help = format!("URL of the Ethereum RPC node. If not provided, the value from the \
            environment variable `{NODE_RPC_URL_ENV}` will be used. If that is not set, the \
            default value is `{DEFAULT_NODE_RPC_URL}`.")
    )]
    pub node_rpc_url: Option<String>,

    #[clap(
        long,
        help = "Signing keys of the deployer.",
        long_help = format!("Signing keys of the deployer. The first one signs the deployment. \
            If not provided, the value from the environment variable \
            `{DEPLOYER_SIGNING_KEYS_ENV}` (comma-separated) will be used. If that is not set, \
            the accounts managed by the node are used."),
        num_args = 1..
    )]
    pub signing_keys: Option<Vec<String>>,

    #[clap(
        long,
        help = "Directory with compiled contract artifacts.",
        long_help = format!("Directory with Hardhat compilation artifacts. If not provided, the \
            value from the environment variable `{ARTIFACTS_DIR_ENV}` will be used. If that is \
            not set, the default value is `{DEFAULT_ARTIFACTS_DIR}`.")
    )]
    pub artifacts_dir: Option<PathBuf>,

    #[clap(
        long,
        help = "Directory with Solidity sources.",
        long_help = format!("Directory with Solidity sources, compiled with `solc` when no \
            artifact matches. If not provided, the value from the environment variable \
            `{CONTRACTS_DIR_ENV}` will be used. If that is not set, the default value is \
            `{DEFAULT_CONTRACTS_DIR}`.")
    )]
    pub contracts_dir: Option<PathBuf>,
}
