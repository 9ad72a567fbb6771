use anyhow::Result;
use tracing::info;

use crate::{
    config::resolve_config,
    logging::init_logging,
    procedure::{execute, Procedure},
};

pub mod config;
pub mod exit;
pub mod logging;
pub mod procedure;

pub const NETWORK_ENV: &str = "DEPLOY_NETWORK";
pub const NODE_RPC_URL_ENV: &str = "NODE_RPC_URL";
pub const DEPLOYER_SIGNING_KEYS_ENV: &str = "DEPLOYER_SIGNING_KEYS";
pub const ARTIFACTS_DIR_ENV: &str = "ARTIFACTS_DIR";
pub const CONTRACTS_DIR_ENV: &str = "CONTRACTS_DIR";
pub const LOGGING_FORMAT_ENV: &str = "LOGGING_FORMAT";

/// Resolve configuration, set up logging and run `procedure` against the configured chain.
pub async fn run<P: Procedure>(procedure: P) -> Result<P::Output> {
    let config = resolve_config()?;
    init_logging(config.logging_format)?;

    info!("Script configuration:\n{}", config.print_safe_config());

    execute(&procedure, &config).await
}
