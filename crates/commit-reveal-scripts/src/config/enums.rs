use std::str::FromStr;

use clap::ValueEnum;

#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, ValueEnum)]
pub enum LoggingFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LoggingFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(()),
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, ValueEnum)]
pub enum Network {
    /// A node reachable over JSON-RPC.
    #[default]
    Rpc,
    /// An embedded EVM, discarded when the process exits.
    InMemory,
}

impl FromStr for Network {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rpc" => Ok(Self::Rpc),
            "in-memory" | "in_memory" => Ok(Self::InMemory),
            _ => Err(()),
        }
    }
}
