// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use crate::error::DeployerCliResult;

mod deploy;
mod verify;
mod verify_status;

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Deploy the planned contracts to every planned network and verify their sources
    #[clap(visible_alias = "d")]
    Deploy(deploy::Args),
    /// Submit source verification for an already deployed contract
    Verify(verify::Args),
    /// Check the status of a submitted verification
    VerifyStatus(verify_status::Args),
}

pub async fn exec(cmd: Command) -> DeployerCliResult {
    match cmd {
        Command::Deploy(args) => deploy::exec(args).await,
        Command::Verify(args) => verify::exec(args).await,
        Command::VerifyStatus(args) => verify_status::exec(args).await,
    }
}
