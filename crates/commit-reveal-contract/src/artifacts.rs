use std::{
    fs,
    path::{Path, PathBuf},
};

use alloy_primitives::Bytes;
use evm_utils::compilation::source_to_bytecode;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::{ContractFactory, ContractResult, FactoryResolutionError};

/// Directory with per-compilation metadata; it never holds contract artifacts.
const BUILD_INFO_DIR: &str = "build-info";

/// Hardhat compilation artifact (`hh-sol-artifact-1`).
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HardhatArtifact {
    contract_name: String,
    source_name: String,
    abi: Vec<AbiItem>,
    bytecode: String,
    #[serde(default)]
    link_references: Map<String, Value>,
}

#[derive(Clone, Debug, Deserialize)]
struct AbiItem {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    inputs: Vec<Value>,
}

impl HardhatArtifact {
    fn constructor_arity(&self) -> usize {
        self.abi
            .iter()
            .find(|item| item.kind == "constructor")
            .map_or(0, |constructor| constructor.inputs.len())
    }

    fn into_factory(self, requested_name: &str) -> Result<ContractFactory, FactoryResolutionError> {
        if self.contract_name != requested_name {
            return Err(FactoryResolutionError::NameMismatch(self.contract_name));
        }
        if !self.link_references.is_empty() {
            let libraries = self
                .link_references
                .iter()
                .flat_map(|(source, libraries)| {
                    libraries
                        .as_object()
                        .into_iter()
                        .flat_map(|libraries| libraries.keys())
                        .map(move |library| format!("{source}:{library}"))
                })
                .collect();
            return Err(FactoryResolutionError::UnlinkedLibraries(libraries));
        }

        let bytecode = hex::decode(self.bytecode.trim_start_matches("0x"))?;
        if bytecode.is_empty() {
            return Err(FactoryResolutionError::Abstract);
        }

        let arity = self.constructor_arity();
        Ok(ContractFactory::new(self.contract_name, Bytes::from(bytecode), Some(arity)))
    }
}

/// Locates compiled contracts: first among Hardhat artifacts, then by compiling a Solidity
/// source of the same name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArtifactStore {
    artifacts_dir: PathBuf,
    contracts_dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(artifacts_dir: impl Into<PathBuf>, contracts_dir: impl Into<PathBuf>) -> Self {
        Self {
            artifacts_dir: artifacts_dir.into(),
            contracts_dir: contracts_dir.into(),
        }
    }

    /// Resolve `name`, either bare (`CommitReveal`) or fully qualified
    /// (`contracts/CommitReveal.sol:CommitReveal`).
    pub fn contract_factory(&self, name: &str) -> ContractResult<ContractFactory> {
        self.resolve(name).map_err(|reason| reason.for_contract(name))
    }

    fn resolve(&self, name: &str) -> Result<ContractFactory, FactoryResolutionError> {
        let (source, contract_name) = match name.rsplit_once(':') {
            Some((source, contract_name)) => (Some(source), contract_name),
            None => (None, name),
        };

        let artifact_path = match source {
            Some(source) => {
                let path = self
                    .artifacts_dir
                    .join(source)
                    .join(format!("{contract_name}.json"));
                path.is_file().then_some(path)
            }
            None => self.find_bare_artifact(contract_name)?,
        };

        match artifact_path {
            Some(path) => {
                debug!(path = %path.display(), "Using contract artifact");
                read_artifact(&path)?.into_factory(contract_name)
            }
            None => self.compile_from_source(source, contract_name),
        }
    }

    fn find_bare_artifact(
        &self,
        contract_name: &str,
    ) -> Result<Option<PathBuf>, FactoryResolutionError> {
        let file_name = format!("{contract_name}.json");
        let mut candidates = vec![];
        if self.artifacts_dir.is_dir() {
            collect_artifacts(&self.artifacts_dir, &file_name, &mut candidates)?;
        }
        debug!(
            dir = %self.artifacts_dir.display(),
            found = candidates.len(),
            "Searched for contract artifacts"
        );

        match candidates.len() {
            0 => Ok(None),
            1 => Ok(candidates.pop()),
            _ => {
                let mut names = candidates
                    .iter()
                    .map(|path| self.qualified_name(path, contract_name))
                    .collect::<Vec<_>>();
                names.sort();
                Err(FactoryResolutionError::Ambiguous(names))
            }
        }
    }

    fn qualified_name(&self, artifact_path: &Path, contract_name: &str) -> String {
        let source = artifact_path
            .parent()
            .and_then(|dir| dir.strip_prefix(&self.artifacts_dir).ok())
            .unwrap_or(artifact_path);
        format!("{}:{contract_name}", source.display())
    }

    fn compile_from_source(
        &self,
        source: Option<&str>,
        contract_name: &str,
    ) -> Result<ContractFactory, FactoryResolutionError> {
        let source_path = match source {
            Some(source) => self
                .contracts_dir
                .parent()
                .unwrap_or(Path::new(""))
                .join(source),
            None => self.contracts_dir.join(format!("{contract_name}.sol")),
        };
        if !source_path.is_file() {
            return Err(FactoryResolutionError::NotFound);
        }

        debug!(path = %source_path.display(), "Compiling contract source");
        let solidity = fs::read(&source_path).map_err(|source| FactoryResolutionError::Io {
            path: source_path.clone(),
            source,
        })?;
        let bytecode = source_to_bytecode(solidity, contract_name, &self.contracts_dir)?;

        Ok(ContractFactory::new(contract_name, Bytes::from(bytecode), None))
    }
}

fn read_artifact(path: &Path) -> Result<HardhatArtifact, FactoryResolutionError> {
    let contents = fs::read_to_string(path).map_err(|source| FactoryResolutionError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let artifact: HardhatArtifact =
        serde_json::from_str(&contents).map_err(|source| FactoryResolutionError::MalformedArtifact {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(source = %artifact.source_name, "Parsed contract artifact");
    Ok(artifact)
}

fn collect_artifacts(
    dir: &Path,
    file_name: &str,
    found: &mut Vec<PathBuf>,
) -> Result<(), FactoryResolutionError> {
    let io_error = |source| FactoryResolutionError::Io {
        path: dir.to_path_buf(),
        source,
    };

    for entry in fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        if path.is_dir() {
            if path.file_name().is_some_and(|name| name == BUILD_INFO_DIR) {
                continue;
            }
            collect_artifacts(&path, file_name, found)?;
        } else if path.file_name().is_some_and(|name| name == file_name) {
            found.push(path);
        }
    }
    Ok(())
}
