use std::{
    io,
    io::Write,
    path::Path,
    process::{Command, Stdio},
};

use thiserror::Error;

/// Errors raised while turning Solidity sources into creation bytecode.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompilationError {
    #[error("Command 'solc' not found")]
    SolcNotFound,

    #[error("Failed to run 'solc'")]
    Process(#[from] io::Error),

    #[error("Compilation error: {0}")]
    Solc(String),

    #[error("Compiler output is not valid UTF-8")]
    InvalidOutput(#[from] std::string::FromUtf8Error),

    #[error("Compiler output has no binary for contract `{0}`")]
    MissingBinary(String),
}

/// Composition of `compile_solidity` and `find_binary` functions.
pub fn source_to_bytecode(
    solidity_code: impl AsRef<[u8]>,
    contract_name: &str,
    base_path: &Path,
) -> Result<Vec<u8>, CompilationError> {
    let compilation_output = compile_solidity(solidity_code, base_path)?;
    find_binary(&compilation_output, contract_name)
        .ok_or_else(|| CompilationError::MissingBinary(contract_name.to_string()))
}

/// Given solc compilation output returns the hex-decoded bytecode of `contract_name`.
pub fn find_binary(input: &str, contract_name: &str) -> Option<Vec<u8>> {
    let search_str = format!("======= <stdin>:{contract_name} =======\nBinary:\n");

    let start = input.find(&search_str)?;

    // Find the end of the hex blob.
    let end = input[start + search_str.len()..]
        .find('\n')
        .map(|pos| pos + start + search_str.len())
        .unwrap_or(input.len());

    let binary_section = &input[start + search_str.len()..end].trim();

    hex::decode(binary_section).ok()
}

/// Compile Solidity read from stdin and return the raw `solc --bin` output.
///
/// Imports are resolved against `base_path` and, when present, its sibling `node_modules`
/// directory.
pub fn compile_solidity(
    solidity: impl AsRef<[u8]>,
    base_path: &Path,
) -> Result<String, CompilationError> {
    let mut command = Command::new("solc");
    command
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .arg("--bin")
        .arg("--optimize")
        .arg("--base-path")
        .arg(base_path);

    if let Some(node_modules) = base_path
        .parent()
        .map(|root| root.join("node_modules"))
        .filter(|dir| dir.is_dir())
    {
        command.arg("--include-path").arg(node_modules);
    }

    let mut process = match command.arg("-").spawn() {
        Ok(process) => process,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(CompilationError::SolcNotFound)
        }
        Err(err) => return Err(CompilationError::Process(err)),
    };

    if let Some(mut stdin) = process.stdin.take() {
        stdin.write_all(solidity.as_ref())?;
    }
    let output = process.wait_with_output()?;

    let stderr = String::from_utf8(output.stderr)?;
    if !output.status.success() || stderr.contains("Error") {
        return Err(CompilationError::Solc(stderr));
    }

    Ok(String::from_utf8(output.stdout)?)
}
