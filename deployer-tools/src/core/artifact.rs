// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Loading compiled contract artifacts and the sources needed to verify them.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use alloy::{json_abi::JsonAbi, primitives::Bytes};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::{
    core::compiler_input::{CompilerInput, SourceStrategy},
    utils::color::Color,
};

/// Compiled output of a single contract.
#[derive(Clone, Debug)]
pub struct Artifact {
    pub contract_name: String,
    pub abi: JsonAbi,
    pub bytecode: Bytes,
    pub compiler: CompilerInfo,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CompilerInfo {
    #[serde(default)]
    pub name: Option<String>,
    pub version: String,
    #[serde(default)]
    pub settings: Map<String, Value>,
}

/// Everything the pipeline needs to deploy and verify one contract.
#[derive(Clone, Debug)]
pub struct ContractBundle {
    pub artifact: Artifact,
    pub compiler_input: CompilerInput,
    pub constructor_args: Vec<String>,
}

impl ContractBundle {
    pub fn name(&self) -> &str {
        &self.artifact.contract_name
    }

    pub fn with_constructor_args(mut self, args: Vec<String>) -> Self {
        self.constructor_args = args;
        self
    }
}

// On-disk artifact layout.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ArtifactFile {
    contract_name: String,
    compiler_output: CompilerOutput,
    compiler: CompilerInfo,
}

#[derive(Deserialize)]
struct CompilerOutput {
    abi: JsonAbi,
    evm: EvmOutput,
}

#[derive(Deserialize)]
struct EvmOutput {
    bytecode: BytecodeOutput,
}

#[derive(Deserialize)]
struct BytecodeOutput {
    object: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("no compiled artifact for contract {} at {}", .contract.red(), .path.display())]
    NotFound { contract: String, path: PathBuf },
    #[error("no verification source for contract {} at {}", .contract.red(), .path.display())]
    SourceNotFound { contract: String, path: PathBuf },
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("artifact at {} is for contract {found}, expected {}", .path.display(), .expected.red())]
    NameMismatch {
        path: PathBuf,
        expected: String,
        found: String,
    },
    #[error("contract {} has invalid bytecode (unlinked libraries?): {source}", .contract.red())]
    InvalidBytecode {
        contract: String,
        #[source]
        source: hex::FromHexError,
    },
}

/// Loads artifacts from a build directory, keyed by contract name.
#[derive(Clone, Debug)]
pub struct ArtifactStore {
    artifacts_dir: PathBuf,
    sources: SourceStrategy,
}

impl ArtifactStore {
    pub fn new(artifacts_dir: impl Into<PathBuf>, sources: SourceStrategy) -> Self {
        Self {
            artifacts_dir: artifacts_dir.into(),
            sources,
        }
    }

    pub fn artifact_path(&self, contract_name: &str) -> PathBuf {
        self.artifacts_dir.join(format!("{contract_name}.json"))
    }

    /// Loads every named contract, failing on the first one that is missing.
    pub fn load_all<S: AsRef<str>>(
        &self,
        contract_names: &[S],
    ) -> Result<Vec<ContractBundle>, ArtifactError> {
        contract_names
            .iter()
            .map(|name| self.load(name.as_ref()))
            .collect()
    }

    pub fn load(&self, contract_name: &str) -> Result<ContractBundle, ArtifactError> {
        let artifact = self.load_artifact(contract_name)?;
        let compiler_input = self.load_compiler_input(&artifact)?;
        debug!(@grey, "loaded artifact for {}", contract_name);
        Ok(ContractBundle {
            artifact,
            compiler_input,
            constructor_args: Vec::new(),
        })
    }

    pub fn load_artifact(&self, contract_name: &str) -> Result<Artifact, ArtifactError> {
        let path = self.artifact_path(contract_name);
        let text = read(&path).map_err(|err| match err {
            ArtifactError::Io { source, path } if source.kind() == io::ErrorKind::NotFound => {
                ArtifactError::NotFound {
                    contract: contract_name.to_owned(),
                    path,
                }
            }
            err => err,
        })?;
        let file: ArtifactFile = parse(&path, &text)?;
        if file.contract_name != contract_name {
            return Err(ArtifactError::NameMismatch {
                path,
                expected: contract_name.to_owned(),
                found: file.contract_name,
            });
        }
        let bytecode = crate::utils::decode0x(&file.compiler_output.evm.bytecode.object)
            .map_err(|source| ArtifactError::InvalidBytecode {
                contract: contract_name.to_owned(),
                source,
            })?;
        Ok(Artifact {
            contract_name: file.contract_name,
            abi: file.compiler_output.abi,
            bytecode: bytecode.into(),
            compiler: file.compiler,
        })
    }

    fn load_compiler_input(&self, artifact: &Artifact) -> Result<CompilerInput, ArtifactError> {
        let name = &artifact.contract_name;
        match &self.sources {
            SourceStrategy::Flattened { dir } => {
                let path = dir.join(format!("{name}.sol"));
                let code = read_source(name, &path)?;
                Ok(CompilerInput::from_flattened(artifact, code))
            }
            SourceStrategy::StandardJson { dir } => {
                let path = dir.join(format!("{name}.json"));
                let text = read_source(name, &path)?;
                parse(&path, &text)
            }
        }
    }
}

fn read(path: &Path) -> Result<String, ArtifactError> {
    fs::read_to_string(path).map_err(|source| ArtifactError::Io {
        path: path.to_owned(),
        source,
    })
}

fn read_source(contract_name: &str, path: &Path) -> Result<String, ArtifactError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Err(ArtifactError::SourceNotFound {
            contract: contract_name.to_owned(),
            path: path.to_owned(),
        }),
        Err(source) => Err(ArtifactError::Io {
            path: path.to_owned(),
            source,
        }),
    }
}

fn parse<T: for<'de> Deserialize<'de>>(path: &Path, text: &str) -> Result<T, ArtifactError> {
    serde_json::from_str(text).map_err(|source| ArtifactError::Parse {
        path: path.to_owned(),
        source,
    })
}
