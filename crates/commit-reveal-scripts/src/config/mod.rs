use std::{path::PathBuf, str::FromStr};

use anyhow::{anyhow, Result};
use clap::Parser;
use cli::CLIConfig;
use defaults::{
    DEFAULT_ARTIFACTS_DIR, DEFAULT_CONTRACTS_DIR, DEFAULT_LOGGING_FORMAT, DEFAULT_NETWORK,
    DEFAULT_NODE_RPC_URL,
};
pub use enums::{LoggingFormat, Network};

use crate::{
    ARTIFACTS_DIR_ENV, CONTRACTS_DIR_ENV, DEPLOYER_SIGNING_KEYS_ENV, LOGGING_FORMAT_ENV,
    NETWORK_ENV, NODE_RPC_URL_ENV,
};

mod cli;
mod defaults;
mod display;
mod enums;

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ChainConfig {
    pub network: Network,
    pub node_rpc_url: String,
    pub artifacts_dir: PathBuf,
    pub contracts_dir: PathBuf,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct KeyConfig {
    /// Empty when the chain's own accounts should be used.
    pub signing_keys: Vec<String>,
}

/// Resolved configuration for the deployment scripts. Order of precedence is:
/// 1. Command line arguments (`CLIConfig`).
/// 2. Environment variables.
/// 3. Default values.
///
/// For field documentation, see their counterparts in `CLIConfig`.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ScriptConfig {
    pub logging_format: LoggingFormat,
    pub chain: ChainConfig,
    pub keys: KeyConfig,
}

/// Resolves the configuration using the command line arguments, environment variables, and
/// default values.
pub fn resolve_config() -> Result<ScriptConfig> {
    resolve_config_from_cli_config(CLIConfig::parse())
}

fn resolve_config_from_cli_config(
    CLIConfig {
        logging_format,
        network,
        node_rpc_url,
        signing_keys,
        artifacts_dir,
        contracts_dir,
    }: CLIConfig,
) -> Result<ScriptConfig> {
    let signing_keys = match signing_keys {
        Some(keys) => keys,
        None => std::env::var(DEPLOYER_SIGNING_KEYS_ENV)
            .map(|keys| {
                keys.split(',')
                    .map(str::trim)
                    .filter(|key| !key.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default(),
    };

    let chain_config = ChainConfig {
        network: resolve_value(network, NETWORK_ENV, DEFAULT_NETWORK)?,
        node_rpc_url: resolve_value(
            node_rpc_url,
            NODE_RPC_URL_ENV,
            DEFAULT_NODE_RPC_URL.to_string(),
        )?,
        artifacts_dir: resolve_value(
            artifacts_dir,
            ARTIFACTS_DIR_ENV,
            PathBuf::from(DEFAULT_ARTIFACTS_DIR),
        )?,
        contracts_dir: resolve_value(
            contracts_dir,
            CONTRACTS_DIR_ENV,
            PathBuf::from(DEFAULT_CONTRACTS_DIR),
        )?,
    };

    Ok(ScriptConfig {
        logging_format: resolve_value(logging_format, LOGGING_FORMAT_ENV, DEFAULT_LOGGING_FORMAT)?,
        chain: chain_config,
        keys: KeyConfig { signing_keys },
    })
}

fn resolve_value<T: FromStr>(value: Option<T>, env_var: &str, default: T) -> Result<T> {
    if let Some(value) = value {
        return Ok(value);
    }
    match std::env::var(env_var) {
        Ok(raw) => T::from_str(&raw).map_err(|_| anyhow!("Invalid value of `{env_var}`: {raw}")),
        Err(_) => Ok(default),
    }
}
