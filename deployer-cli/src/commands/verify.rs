// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use alloy::primitives::Address;
use deployer_tools::ops;

use crate::{
    common_args::{AuthArgs, ConfigArgs},
    error::DeployerCliResult,
};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Network the contract was deployed to.
    #[arg(long)]
    network: String,
    /// Name of the contract's artifact.
    #[arg(long)]
    contract: String,
    /// Address of the deployed contract.
    #[arg(long)]
    address: Address,

    #[command(flatten)]
    config: ConfigArgs,
    #[command(flatten)]
    auth: AuthArgs,
}

pub async fn exec(args: Args) -> DeployerCliResult {
    let config = args.config.load()?;
    let secrets = args.auth.secrets()?;
    ops::verify(&config, &secrets, &args.network, &args.contract, args.address).await?;
    Ok(())
}
