// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::future::Future;

use alloy::providers::{Provider, WalletProvider};

use super::{
    creation_code, DeploymentConfig, DeploymentError, DeploymentRequest, DeploymentResult,
    GasEstimate,
};
use crate::{
    core::artifact::Artifact,
    utils::{color::DebugColor, format_gas},
};

/// Publishes contracts to a single network.
pub trait ContractDeployer: Send + Sync {
    fn network(&self) -> &str;

    fn deploy(
        &self,
        artifact: &Artifact,
        constructor_args: &[String],
    ) -> impl Future<Output = Result<DeploymentResult, DeploymentError>> + Send;
}

/// Deploys through a JSON-RPC provider whose wallet holds the signing key.
#[derive(Clone, Debug)]
pub struct RpcDeployer<P> {
    network: String,
    provider: P,
    config: DeploymentConfig,
}

impl<P> RpcDeployer<P>
where
    P: Provider + WalletProvider,
{
    pub fn new(network: impl Into<String>, provider: P, config: DeploymentConfig) -> Self {
        Self {
            network: network.into(),
            provider,
            config,
        }
    }

    fn request(
        &self,
        artifact: &Artifact,
        constructor_args: &[String],
    ) -> Result<DeploymentRequest, DeploymentError> {
        let code = creation_code(artifact, constructor_args)?;
        Ok(DeploymentRequest::new(
            self.provider.default_signer_address(),
            code,
            self.config.gas_price_bonus,
        ))
    }

    /// Estimates the deployment without sending anything.
    pub async fn estimate(
        &self,
        artifact: &Artifact,
        constructor_args: &[String],
    ) -> Result<GasEstimate, DeploymentError> {
        self.request(artifact, constructor_args)?
            .estimate(&self.provider)
            .await
    }
}

impl<P> ContractDeployer for RpcDeployer<P>
where
    P: Provider + WalletProvider + Send + Sync,
{
    fn network(&self) -> &str {
        &self.network
    }

    async fn deploy(
        &self,
        artifact: &Artifact,
        constructor_args: &[String],
    ) -> Result<DeploymentResult, DeploymentError> {
        let req = self.request(artifact, constructor_args)?;
        debug!(@grey,
            "sender address: {}",
            self.provider.default_signer_address().debug_lavender()
        );
        let receipt = req.exec(&self.provider).await?;
        let result =
            DeploymentResult::from_receipt(&self.network, &artifact.contract_name, receipt)?;
        debug!(@grey, "gas used: {}", format_gas(result.gas_used.into()));
        info!(@grey, "deployment tx hash: {}", result.tx_hash.debug_lavender());
        Ok(result)
    }
}
