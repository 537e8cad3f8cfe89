// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

pub mod artifact;
pub mod compiler_input;
pub mod deployment;
pub mod network;
pub mod pipeline;
pub mod verification;
