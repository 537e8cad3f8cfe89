// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! High-level operations wiring the plan and secrets to real networks and explorers.

use alloy::{
    network::EthereumWallet,
    providers::{Provider, ProviderBuilder, WalletProvider},
    signers::Signer,
};

use crate::{
    config::{DeployConfig, Secrets},
    core::{
        artifact::ContractBundle,
        network::Network,
        verification::EtherscanVerifier,
    },
    Result,
};

pub use deploy::{deploy, estimate};
pub use verify::{verify, verify_status};

mod deploy;
mod verify;

/// Loads every planned contract before any network is touched.
pub fn load_bundles(config: &DeployConfig) -> Result<Vec<ContractBundle>> {
    let store = config.artifact_store();
    let bundles = store
        .load_all(&config.contracts)?
        .into_iter()
        .map(|bundle| {
            let args = config.constructor_args(bundle.name());
            bundle.with_constructor_args(args)
        })
        .collect();
    Ok(bundles)
}

/// Connects to a network with the deployer key as the wallet.
pub async fn connect(
    network: &Network,
    secrets: &Secrets,
) -> Result<impl Provider + WalletProvider + Clone> {
    let provider = ProviderBuilder::new().connect(&network.rpc_url).await?;
    let chain_id = provider.get_chain_id().await?;
    debug!(@grey, "connected to {} (chain id {})", network.name, chain_id);
    let signer = secrets.signer()?.with_chain_id(Some(chain_id));
    let provider = ProviderBuilder::new()
        .wallet(EthereumWallet::new(signer))
        .connect(&network.rpc_url)
        .await?;
    Ok(provider)
}

pub fn explorer(config: &DeployConfig, network: &Network, secrets: &Secrets) -> EtherscanVerifier {
    EtherscanVerifier::new(network.explorer_api_url(&config.explorer_host), secrets)
        .with_license_type(config.license_type)
}
