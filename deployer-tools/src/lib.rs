// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Tools for deploying compiled Solidity contracts to EVM networks and verifying their sources
//! with an Etherscan-style block explorer.

#[macro_use]
mod macros;

pub mod config;
pub mod core;
pub(crate) mod error;
pub mod ops;
pub mod utils;

pub use config::{DeployConfig, Secrets};
pub use error::{Error, Result};
