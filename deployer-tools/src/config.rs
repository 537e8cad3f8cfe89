// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Deployment plan and secrets.
//!
//! The plan is a TOML file naming the contracts, the networks and the artifact layout. Secrets are
//! kept apart from it and are never printed: their `Debug` output is redacted.

use std::{
    collections::BTreeMap,
    fmt, fs,
    path::{Path, PathBuf},
    time::Duration,
};

use alloy::{primitives::B256, signers::local::PrivateKeySigner};
use serde::Deserialize;

use crate::{
    core::{
        artifact::ArtifactStore,
        compiler_input::SourceKind,
        deployment::{DeploymentConfig, DEFAULT_GAS_PRICE_BONUS},
        network::{check_networks, Network, NetworkError, DEFAULT_EXPLORER_HOST},
        verification::DEFAULT_LICENSE_TYPE,
    },
    utils::{check_gas_price_bonus, color::Color, decode0x, InvalidBonus},
};

/// Plan file looked up when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "deploy.toml";

/// Seconds to wait before verifying, giving the explorer time to index the deployment.
pub const DEFAULT_VERIFICATION_DELAY_SECS: u64 = 90;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid deployment plan: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid secrets file: {0}")]
    Secrets(#[from] serde_json::Error),
    #[error("{0}")]
    Network(#[from] NetworkError),
    #[error("{0}")]
    InvalidBonus(#[from] InvalidBonus),

    #[error("deployment plan lists no {0}")]
    Empty(&'static str),
    #[error("network {} is not in the deployment plan", .0.red())]
    UnknownNetwork(String),
    #[error("contract {} is not in the deployment plan", .0.red())]
    UnknownContract(String),
    #[error("missing secret: {0}")]
    MissingSecret(&'static str),
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),
}

/// A string that is never shown in logs or debug output.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct SecretString(String);

impl SecretString {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

impl From<String> for SecretString {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Signing key for deployments and API key for the explorer.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Secrets {
    #[serde(default)]
    pub deployer_key: SecretString,
    #[serde(default)]
    pub etherscan_key: SecretString,
}

impl Secrets {
    pub fn new(deployer_key: impl Into<String>, etherscan_key: impl Into<String>) -> Self {
        Self {
            deployer_key: SecretString::new(deployer_key),
            etherscan_key: SecretString::new(etherscan_key),
        }
    }

    /// Reads `{"deployerKey": .., "etherscanKey": ..}`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = read(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn signer(&self) -> Result<PrivateKeySigner, ConfigError> {
        if self.deployer_key.is_empty() {
            return Err(ConfigError::MissingSecret("deployer key"));
        }
        let bytes = decode0x(self.deployer_key.expose())
            .map_err(|err| ConfigError::InvalidPrivateKey(err.to_string()))?;
        let key = B256::try_from(bytes.as_slice()).map_err(|_| {
            ConfigError::InvalidPrivateKey(format!("expected 32 bytes, got {}", bytes.len()))
        })?;
        PrivateKeySigner::from_bytes(&key)
            .map_err(|err| ConfigError::InvalidPrivateKey(err.to_string()))
    }

    pub fn check_etherscan_key(&self) -> Result<(), ConfigError> {
        if self.etherscan_key.is_empty() {
            return Err(ConfigError::MissingSecret("etherscan api key"));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeployConfig {
    pub contracts: Vec<String>,
    #[serde(default = "default_gas_price_bonus")]
    pub gas_price_bonus: f64,
    /// Seconds.
    #[serde(default = "default_verification_delay")]
    pub verification_delay: u64,
    #[serde(default = "default_explorer_host")]
    pub explorer_host: String,
    #[serde(default = "default_license_type")]
    pub license_type: u8,
    pub artifacts: ArtifactsConfig,
    pub networks: Vec<Network>,
    #[serde(default)]
    pub constructor_args: BTreeMap<String, Vec<String>>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArtifactsConfig {
    pub dir: PathBuf,
    #[serde(default)]
    pub source: SourceKind,
    pub source_dir: PathBuf,
}

fn default_gas_price_bonus() -> f64 {
    DEFAULT_GAS_PRICE_BONUS
}

fn default_verification_delay() -> u64 {
    DEFAULT_VERIFICATION_DELAY_SECS
}

fn default_explorer_host() -> String {
    DEFAULT_EXPLORER_HOST.to_owned()
}

fn default_license_type() -> u8 {
    DEFAULT_LICENSE_TYPE
}

impl DeployConfig {
    /// Reads a plan, resolving relative artifact paths against the plan's directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let mut config: Self = read(path)?.parse()?;
        if let Some(base) = path.parent() {
            config.artifacts.dir = base.join(&config.artifacts.dir);
            config.artifacts.source_dir = base.join(&config.artifacts.source_dir);
        }
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.contracts.is_empty() {
            return Err(ConfigError::Empty("contracts"));
        }
        if self.networks.is_empty() {
            return Err(ConfigError::Empty("networks"));
        }
        check_networks(&self.networks)?;
        check_gas_price_bonus(self.gas_price_bonus)?;
        if let Some(name) = self
            .constructor_args
            .keys()
            .find(|name| !self.contracts.contains(name))
        {
            return Err(ConfigError::UnknownContract(name.clone()));
        }
        Ok(())
    }

    pub fn verification_delay(&self) -> Duration {
        Duration::from_secs(self.verification_delay)
    }

    pub fn deployment_config(&self) -> DeploymentConfig {
        DeploymentConfig {
            gas_price_bonus: self.gas_price_bonus,
        }
    }

    pub fn artifact_store(&self) -> ArtifactStore {
        ArtifactStore::new(
            &self.artifacts.dir,
            self.artifacts.source.strategy(&self.artifacts.source_dir),
        )
    }

    pub fn constructor_args(&self, contract: &str) -> Vec<String> {
        self.constructor_args
            .get(contract)
            .cloned()
            .unwrap_or_default()
    }

    pub fn network(&self, name: &str) -> Result<&Network, ConfigError> {
        self.networks
            .iter()
            .find(|network| network.name == name)
            .ok_or_else(|| ConfigError::UnknownNetwork(name.to_owned()))
    }

    /// Keeps only the named networks, in plan order. An empty filter keeps everything.
    pub fn retain_networks(&mut self, names: &[String]) -> Result<(), ConfigError> {
        if let Some(name) = names.iter().find(|name| self.network(name).is_err()) {
            return Err(ConfigError::UnknownNetwork(name.clone()));
        }
        if !names.is_empty() {
            self.networks.retain(|network| names.contains(&network.name));
        }
        Ok(())
    }

    /// Keeps only the named contracts, in plan order. An empty filter keeps everything.
    pub fn retain_contracts(&mut self, names: &[String]) -> Result<(), ConfigError> {
        if let Some(name) = names.iter().find(|name| !self.contracts.contains(name)) {
            return Err(ConfigError::UnknownContract(name.clone()));
        }
        if !names.is_empty() {
            self.contracts.retain(|contract| names.contains(contract));
            self.constructor_args
                .retain(|contract, _| names.contains(contract));
        }
        Ok(())
    }
}

impl std::str::FromStr for DeployConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

fn read(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_owned(),
        source,
    })
}
