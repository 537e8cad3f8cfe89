// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Manual follow-up for verifications that failed during a deployment.

use alloy::primitives::Address;

use crate::{
    config::{DeployConfig, Secrets},
    core::verification::{CheckStatus, SourceVerifier, VerificationOutcome, VerificationRequest},
    ops::explorer,
    utils::color::DebugColor,
};

/// Submits verification for an already deployed contract, without waiting first.
pub async fn verify(
    config: &DeployConfig,
    secrets: &Secrets,
    network: &str,
    contract: &str,
    address: Address,
) -> eyre::Result<VerificationOutcome> {
    secrets.check_etherscan_key()?;
    let network = config.network(network)?;
    let bundle = config.artifact_store().load(contract)?;
    let verifier = explorer(config, network, secrets);

    info!(@grey,
        "verifying source code for {} on {} at {}...",
        contract.lavender(),
        network.name,
        address.debug_mint()
    );
    let outcome = verifier
        .verify(&VerificationRequest {
            address,
            contract_name: bundle.name(),
            compiler_input: &bundle.compiler_input,
            compiler_version: &bundle.artifact.compiler.version,
        })
        .await?;
    mintln!(
        "submitted {} on {} for verification (ref: {})",
        contract,
        network.name,
        outcome.reference_id.as_deref().unwrap_or("-")
    );
    Ok(outcome)
}

/// Checks once on a submitted verification.
pub async fn verify_status(
    config: &DeployConfig,
    secrets: &Secrets,
    network: &str,
    guid: &str,
) -> eyre::Result<CheckStatus> {
    secrets.check_etherscan_key()?;
    let network = config.network(network)?;
    let status = explorer(config, network, secrets).check_status(guid).await?;
    match &status {
        CheckStatus::Verified(result) => mintln!("{}", result),
        CheckStatus::Pending(result) => greyln!("{}", result.yellow()),
        CheckStatus::Failed(result) => greyln!("{}", result.red()),
    }
    Ok(status)
}
