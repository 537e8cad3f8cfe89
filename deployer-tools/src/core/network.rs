// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Networks a deployment targets and the explorer API each one verifies against.

use serde::Deserialize;

use crate::utils::color::Color;

/// Explorer host used when the plan does not name one.
pub const DEFAULT_EXPLORER_HOST: &str = "etherscan.io";

/// Names accepted for the primary network. Its explorer API lives on `api.<host>`.
pub const PRIMARY_NETWORKS: [&str; 2] = ["main", "mainnet"];

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Network {
    pub name: String,
    pub rpc_url: String,
    /// Overrides the explorer API URL derived from the network name.
    #[serde(default)]
    pub explorer_api_url: Option<String>,
}

impl Network {
    pub fn is_primary(&self) -> bool {
        PRIMARY_NETWORKS.contains(&self.name.as_str())
    }

    /// Resolves the verification endpoint for this network.
    pub fn explorer_api_url(&self, explorer_host: &str) -> String {
        match &self.explorer_api_url {
            Some(url) => url.clone(),
            None => explorer_api_url(&self.name, explorer_host),
        }
    }
}

/// `https://api.<host>/api` for the primary network, `https://api-<name>.<host>/api` otherwise.
pub fn explorer_api_url(network: &str, explorer_host: &str) -> String {
    if PRIMARY_NETWORKS.contains(&network) {
        format!("https://api.{explorer_host}/api")
    } else {
        format!("https://api-{network}.{explorer_host}/api")
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    #[error("network name must not be empty")]
    EmptyName,
    #[error("network name {} is not a valid host label", .0.red())]
    InvalidName(String),
    #[error("network {} is listed more than once", .0.red())]
    Duplicate(String),
    #[error("network {} has no rpc url", .0.red())]
    MissingRpcUrl(String),
}

/// Rejects names that cannot be turned into an explorer host.
pub fn check_network(network: &Network) -> Result<(), NetworkError> {
    let name = network.name.as_str();
    if name.is_empty() {
        return Err(NetworkError::EmptyName);
    }
    let valid_label = name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-')
        && !name.starts_with('-')
        && !name.ends_with('-');
    if !valid_label && network.explorer_api_url.is_none() {
        return Err(NetworkError::InvalidName(name.to_string()));
    }
    if network.rpc_url.trim().is_empty() {
        return Err(NetworkError::MissingRpcUrl(name.to_string()));
    }
    Ok(())
}

pub fn check_networks(networks: &[Network]) -> Result<(), NetworkError> {
    for (i, network) in networks.iter().enumerate() {
        check_network(network)?;
        if networks[..i].iter().any(|n| n.name == network.name) {
            return Err(NetworkError::Duplicate(network.name.clone()));
        }
    }
    Ok(())
}
