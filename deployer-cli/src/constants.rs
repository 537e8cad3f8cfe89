// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

/// Environment variable holding the hex-encoded deployer private key.
pub const PRIVATE_KEY_ENV: &str = "DEPLOYER_PRIVATE_KEY";

/// Environment variable holding the block explorer API key.
pub const ETHERSCAN_API_KEY_ENV: &str = "ETHERSCAN_API_KEY";
