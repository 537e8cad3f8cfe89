// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use deployer_tools::{core::verification::CheckStatus, ops};
use eyre::eyre;

use crate::{
    common_args::{AuthArgs, ConfigArgs},
    error::DeployerCliResult,
};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Network the verification was submitted on.
    #[arg(long)]
    network: String,
    /// Reference returned when the verification was submitted.
    #[arg(long)]
    guid: String,

    #[command(flatten)]
    config: ConfigArgs,
    #[command(flatten)]
    auth: AuthArgs,
}

pub async fn exec(args: Args) -> DeployerCliResult {
    let config = args.config.load()?;
    let secrets = args.auth.secrets()?;
    match ops::verify_status(&config, &secrets, &args.network, &args.guid).await? {
        CheckStatus::Failed(reason) => Err(eyre!("verification failed: {reason}").into()),
        CheckStatus::Pending(_) | CheckStatus::Verified(_) => Ok(()),
    }
}
