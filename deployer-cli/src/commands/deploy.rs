// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use deployer_tools::ops;

use crate::{
    common_args::{AuthArgs, ConfigArgs},
    error::DeployerCliResult,
};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Only perform gas estimation.
    #[arg(long)]
    estimate_gas: bool,
    /// Deploy without submitting source verification.
    #[arg(long)]
    skip_verification: bool,
    /// Seconds to wait after each deployment before verifying (overrides the plan).
    #[arg(long, value_name = "SECS")]
    verification_delay: Option<u64>,
    /// Only deploy to these networks from the plan.
    #[arg(long)]
    network: Vec<String>,
    /// Only deploy these contracts from the plan.
    #[arg(long)]
    contract: Vec<String>,

    #[command(flatten)]
    config: ConfigArgs,
    /// Wallet and explorer credentials.
    #[command(flatten)]
    auth: AuthArgs,
}

pub async fn exec(args: Args) -> DeployerCliResult {
    let mut config = args.config.load()?;
    config.retain_networks(&args.network)?;
    config.retain_contracts(&args.contract)?;
    if let Some(delay) = args.verification_delay {
        config.verification_delay = delay;
    }
    let secrets = args.auth.secrets()?;

    if args.estimate_gas {
        ops::estimate(&config, &secrets).await?;
    } else {
        ops::deploy(&config, &secrets, !args.skip_verification).await?;
    }
    Ok(())
}
