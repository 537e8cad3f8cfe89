// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Deployment transaction request.

use alloy::{
    network::TransactionBuilder,
    primitives::{Address, Bytes, TxHash, U256},
    providers::Provider,
    rpc::types::{TransactionReceipt, TransactionRequest},
};

use super::{DeploymentError, ReceiptSummary};
use crate::utils::{apply_gas_price_bonus, check_gas_price_bonus, color::DebugColor};

/// Gas figures for a deployment that was not sent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GasEstimate {
    pub gas: u64,
    pub gas_price: u128,
}

impl GasEstimate {
    pub fn total_cost(&self) -> U256 {
        U256::from(self.gas_price).saturating_mul(U256::from(self.gas))
    }
}

#[derive(Debug)]
pub struct DeploymentRequest {
    tx: TransactionRequest,
    gas_price_bonus: f64,
}

impl DeploymentRequest {
    pub fn new(sender: Address, code: Bytes, gas_price_bonus: f64) -> Self {
        Self {
            tx: TransactionRequest::default()
                .with_from(sender)
                .with_deploy_code(code),
            gas_price_bonus,
        }
    }

    pub async fn estimate_gas(&self, provider: &impl Provider) -> Result<u64, DeploymentError> {
        Ok(provider.estimate_gas(self.tx.clone()).await?)
    }

    /// Suggested gas price with the bonus applied.
    pub async fn gas_price(&self, provider: &impl Provider) -> Result<u128, DeploymentError> {
        let bonus = check_gas_price_bonus(self.gas_price_bonus)?;
        let suggested = provider.get_gas_price().await?;
        Ok(apply_gas_price_bonus(suggested, bonus))
    }

    pub async fn estimate(&self, provider: &impl Provider) -> Result<GasEstimate, DeploymentError> {
        Ok(GasEstimate {
            gas: self.estimate_gas(provider).await?,
            gas_price: self.gas_price(provider).await?,
        })
    }

    /// Sends the transaction and blocks until it has a receipt.
    pub async fn exec(self, provider: &impl Provider) -> Result<ReceiptSummary, DeploymentError> {
        let GasEstimate { gas, gas_price } = self.estimate(provider).await?;

        let mut tx = self.tx;
        tx.gas = Some(gas);
        tx.gas_price = Some(gas_price);

        let tx = provider.send_transaction(tx).await?;
        let tx_hash = *tx.tx_hash();
        debug!(@grey, "sent deploy tx: {}", tx_hash.debug_lavender());

        let receipt = wait_for_receipt(provider, tx_hash)
            .await
            .or(Err(DeploymentError::FailedToComplete { tx_hash }))?;
        Ok(ReceiptSummary::from(&receipt))
    }
}

/// Polls for the receipt at the client's poll interval until the tx is mined.
async fn wait_for_receipt(
    provider: &impl Provider,
    tx_hash: TxHash,
) -> Result<TransactionReceipt, DeploymentError> {
    let interval = provider.client().poll_interval();
    loop {
        if let Some(receipt) = provider.get_transaction_receipt(tx_hash).await? {
            return Ok(receipt);
        }
        tokio::time::sleep(interval).await;
    }
}
