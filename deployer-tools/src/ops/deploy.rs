// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Contract deployment.

use alloy::primitives::utils::format_units;

use crate::{
    config::{DeployConfig, Secrets},
    core::{
        deployment::RpcDeployer,
        pipeline::{NetworkReport, NetworkTarget, Orchestrator, VerificationStatus},
    },
    ops::{connect, explorer, load_bundles},
    utils::color::DebugColor,
};

/// Deploys every planned contract to every planned network, verifying sources unless
/// `verify_sources` is off.
pub async fn deploy(
    config: &DeployConfig,
    secrets: &Secrets,
    verify_sources: bool,
) -> eyre::Result<Vec<NetworkReport>> {
    config.validate()?;
    if verify_sources {
        secrets.check_etherscan_key()?;
    }
    let bundles = load_bundles(config)?;

    let mut targets = Vec::with_capacity(config.networks.len());
    for network in &config.networks {
        let provider = connect(network, secrets).await?;
        let deployer = RpcDeployer::new(&network.name, provider, config.deployment_config());
        targets.push(NetworkTarget::new(deployer, explorer(config, network, secrets)));
    }

    let reports = Orchestrator::builder()
        .bundles(bundles)
        .verification_delay(config.verification_delay())
        .verify_sources(verify_sources)
        .build()
        .run(targets)
        .await?;
    print_summary(&reports);
    Ok(reports)
}

/// Prints the expected cost of each deployment without sending anything.
pub async fn estimate(config: &DeployConfig, secrets: &Secrets) -> eyre::Result<()> {
    config.validate()?;
    let bundles = load_bundles(config)?;

    for network in &config.networks {
        let provider = connect(network, secrets).await?;
        let deployer = RpcDeployer::new(&network.name, provider, config.deployment_config());
        greyln!("estimates for {}", network.name.lavender());
        for bundle in &bundles {
            let estimate = deployer
                .estimate(&bundle.artifact, &bundle.constructor_args)
                .await?;
            greyln!(
                "{} deployment tx gas: {}",
                bundle.name(),
                estimate.gas.debug_lavender()
            );
            greyln!(
                "gas price (with bonus): {} gwei",
                format_units(estimate.gas_price, "gwei")?.debug_lavender()
            );
            greyln!(
                "deployment tx total cost: {} ETH",
                format_units(estimate.total_cost(), "ether")?.debug_lavender()
            );
        }
    }
    Ok(())
}

fn print_summary(reports: &[NetworkReport]) {
    for report in reports {
        for contract in &report.contracts {
            let address = contract.deployment.address;
            match &contract.verification {
                VerificationStatus::Verified { .. } => mintln!(
                    "{} on {}: {} (verified)",
                    contract.deployment.contract_name,
                    report.network,
                    address
                ),
                VerificationStatus::Skipped => greyln!(
                    "{} on {}: {} (verification skipped)",
                    contract.deployment.contract_name,
                    report.network,
                    address
                ),
                VerificationStatus::Failed { reason } => greyln!(
                    "{} on {}: {} ({})",
                    contract.deployment.contract_name,
                    report.network,
                    address,
                    format!("not verified: {reason}").yellow()
                ),
            }
        }
    }
}
