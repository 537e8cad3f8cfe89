// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::{fmt, fs, path::PathBuf};

use deployer_tools::{config::DEFAULT_CONFIG_FILE, DeployConfig, Secrets};
use eyre::Context;

use crate::constants::{ETHERSCAN_API_KEY_ENV, PRIVATE_KEY_ENV};

#[derive(clap::Args)]
pub struct AuthArgs {
    /// File path to a text file containing a hex-encoded private key
    #[arg(long)]
    private_key_path: Option<PathBuf>,
    /// Private key as a hex string. Warning: this exposes your key to shell history
    #[arg(long, env = PRIVATE_KEY_ENV, hide_env_values = true)]
    private_key: Option<String>,
    /// JSON file with `deployerKey` and `etherscanKey`
    #[arg(long)]
    secrets_path: Option<PathBuf>,
    /// Block explorer API key
    #[arg(long, env = ETHERSCAN_API_KEY_ENV, hide_env_values = true)]
    etherscan_api_key: Option<String>,
}

impl fmt::Debug for AuthArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redacted = |value: &Option<String>| value.as_ref().map(|_| "<redacted>");
        f.debug_struct("AuthArgs")
            .field("private_key_path", &self.private_key_path)
            .field("private_key", &redacted(&self.private_key))
            .field("secrets_path", &self.secrets_path)
            .field("etherscan_api_key", &redacted(&self.etherscan_api_key))
            .finish()
    }
}

impl AuthArgs {
    /// Collects secrets from the secrets file first, then lets flags and env override them.
    pub fn secrets(&self) -> eyre::Result<Secrets> {
        let mut secrets = match &self.secrets_path {
            Some(path) => Secrets::from_file(path)?,
            None => Secrets::default(),
        };

        if let Some(key) = &self.private_key {
            secrets.deployer_key = key.clone().into();
        } else if let Some(file) = &self.private_key_path {
            let key = fs::read_to_string(file).wrap_err("could not open private key file")?;
            secrets.deployer_key = key.trim().to_string().into();
        }

        if let Some(key) = &self.etherscan_api_key {
            secrets.etherscan_key = key.clone().into();
        }
        Ok(secrets)
    }
}

#[derive(Debug, clap::Args)]
pub struct ConfigArgs {
    /// Deployment plan (TOML)
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,
}

impl ConfigArgs {
    pub fn load(&self) -> eyre::Result<DeployConfig> {
        let config = DeployConfig::load(&self.config)?;
        log::debug!("loaded deployment plan from {}", self.config.display());
        Ok(config)
    }
}
