// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Deploys every contract to every network, verifying each one after a delay.
//!
//! Networks run concurrently, one task each. Within a network contracts are handled one at a
//! time: a contract is deployed, then (after waiting for the explorer to index it) verified,
//! before the next one is deployed. A failed deployment aborts the whole run; a failed
//! verification is logged and recorded in the report.

use std::{fmt, sync::Arc, time::Duration};

use tokio::task::JoinSet;
use typed_builder::TypedBuilder;

use crate::{
    config::DEFAULT_VERIFICATION_DELAY_SECS,
    core::{
        artifact::ContractBundle,
        deployment::{ContractDeployer, DeploymentError, DeploymentResult},
        verification::{SourceVerifier, VerificationRequest},
    },
    utils::color::{Color, DebugColor},
};

/// Where a single contract is in its deploy/verify sequence on one network.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContractStage {
    Pending,
    Deploying,
    Deployed,
    Delaying,
    Verifying,
    Verified,
    VerificationFailed,
    Failed,
}

impl fmt::Display for ContractStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage = match self {
            Self::Pending => "pending",
            Self::Deploying => "deploying",
            Self::Deployed => "deployed",
            Self::Delaying => "waiting for explorer",
            Self::Verifying => "verifying",
            Self::Verified => "verified",
            Self::VerificationFailed => "verification failed",
            Self::Failed => "failed",
        };
        f.write_str(stage)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VerificationStatus {
    Skipped,
    Verified { reference_id: Option<String> },
    Failed { reason: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContractReport {
    pub deployment: DeploymentResult,
    pub verification: VerificationStatus,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetworkReport {
    pub network: String,
    pub contracts: Vec<ContractReport>,
}

/// A network's deployer paired with its explorer.
#[derive(Debug)]
pub struct NetworkTarget<D, V> {
    pub deployer: D,
    pub verifier: V,
}

impl<D, V> NetworkTarget<D, V> {
    pub fn new(deployer: D, verifier: V) -> Self {
        Self { deployer, verifier }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("deploying {} on {network} failed: {source}", .contract.red())]
    Deployment {
        network: String,
        contract: String,
        #[source]
        source: DeploymentError,
    },
    #[error("network task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[derive(Debug, TypedBuilder)]
pub struct Orchestrator {
    #[builder(setter(transform = |bundles: Vec<ContractBundle>| Arc::new(bundles)))]
    bundles: Arc<Vec<ContractBundle>>,
    #[builder(default = Duration::from_secs(DEFAULT_VERIFICATION_DELAY_SECS))]
    verification_delay: Duration,
    #[builder(default = true)]
    verify_sources: bool,
}

impl Orchestrator {
    /// Runs every target to completion, returning reports in target order.
    pub async fn run<D, V>(
        &self,
        targets: Vec<NetworkTarget<D, V>>,
    ) -> Result<Vec<NetworkReport>, PipelineError>
    where
        D: ContractDeployer + 'static,
        V: SourceVerifier + 'static,
    {
        let mut tasks = JoinSet::new();
        for (index, target) in targets.into_iter().enumerate() {
            let bundles = Arc::clone(&self.bundles);
            let delay = self.verification_delay;
            let verify_sources = self.verify_sources;
            tasks.spawn(async move {
                run_network(target, &bundles, delay, verify_sources)
                    .await
                    .map(|report| (index, report))
            });
        }

        let mut reports = Vec::with_capacity(tasks.len());
        while let Some(joined) = tasks.join_next().await {
            // Returning drops the set, which aborts the networks still running.
            reports.push(joined??);
        }
        reports.sort_by_key(|(index, _)| *index);
        Ok(reports.into_iter().map(|(_, report)| report).collect())
    }
}

fn log_stage(network: &str, contract: &str, stage: ContractStage) {
    debug!(@grey, "{}/{}: {}", network, contract, stage);
}

async fn run_network<D, V>(
    target: NetworkTarget<D, V>,
    bundles: &[ContractBundle],
    delay: Duration,
    verify_sources: bool,
) -> Result<NetworkReport, PipelineError>
where
    D: ContractDeployer,
    V: SourceVerifier,
{
    let network = target.deployer.network().to_owned();
    for bundle in bundles {
        log_stage(&network, bundle.name(), ContractStage::Pending);
    }

    let mut contracts = Vec::with_capacity(bundles.len());
    for bundle in bundles {
        let name = bundle.name();
        log_stage(&network, name, ContractStage::Deploying);
        info!(@grey, "deploying {} on {}...", name.lavender(), network);
        let deployment = match target
            .deployer
            .deploy(&bundle.artifact, &bundle.constructor_args)
            .await
        {
            Ok(deployment) => deployment,
            Err(source) => {
                log_stage(&network, name, ContractStage::Failed);
                warn!(@red, "failed to deploy {} on {}: {}", name, network, source);
                return Err(PipelineError::Deployment {
                    network,
                    contract: name.to_owned(),
                    source,
                });
            }
        };
        log_stage(&network, name, ContractStage::Deployed);
        info!(@grey,
            "deployed {} on {}: {}",
            name.lavender(),
            network,
            deployment.address.debug_mint()
        );

        let verification = if verify_sources {
            verify_contract(&target.verifier, bundle, &deployment, delay).await
        } else {
            VerificationStatus::Skipped
        };
        contracts.push(ContractReport {
            deployment,
            verification,
        });
    }
    Ok(NetworkReport { network, contracts })
}

async fn verify_contract(
    verifier: &impl SourceVerifier,
    bundle: &ContractBundle,
    deployment: &DeploymentResult,
    delay: Duration,
) -> VerificationStatus {
    let network = &deployment.network;
    let name = bundle.name();

    log_stage(network, name, ContractStage::Delaying);
    tokio::time::sleep(delay).await;

    log_stage(network, name, ContractStage::Verifying);
    info!(@grey,
        "verifying source code for {} on {} at {}...",
        name.lavender(),
        network,
        deployment.address.debug_mint()
    );
    let request = VerificationRequest {
        address: deployment.address,
        contract_name: name,
        compiler_input: &bundle.compiler_input,
        compiler_version: &bundle.artifact.compiler.version,
    };
    let failure = match verifier.verify(&request).await {
        Ok(outcome) if outcome.success => {
            log_stage(network, name, ContractStage::Verified);
            info!(@grey,
                "successfully verified {} on {} (ref: {})",
                name.lavender(),
                network,
                outcome.reference_id.as_deref().unwrap_or("-")
            );
            return VerificationStatus::Verified {
                reference_id: outcome.reference_id,
            };
        }
        Ok(outcome) => outcome.message,
        Err(err) => err.to_string(),
    };
    log_stage(network, name, ContractStage::VerificationFailed);
    warn!(@yellow, "failed to verify {} on {}: {}", name, network, failure);
    VerificationStatus::Failed { reason: failure }
}
