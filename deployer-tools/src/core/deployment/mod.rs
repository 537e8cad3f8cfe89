// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Contract-creation transactions.

use alloy::{
    dyn_abi::{DynSolValue, JsonAbiExt, Specifier},
    primitives::{Address, Bytes, TxHash},
    rpc::types::TransactionReceipt,
};

use crate::{
    core::artifact::Artifact,
    utils::{
        color::{Color, DebugColor},
        InvalidBonus,
    },
};

pub use deployer::{ContractDeployer, RpcDeployer};
pub use request::{DeploymentRequest, GasEstimate};

pub mod deployer;
pub mod request;

/// Default multiplier over the suggested gas price, applied as `1 + bonus`.
pub const DEFAULT_GAS_PRICE_BONUS: f64 = 0.85;

#[derive(Clone, Debug)]
pub struct DeploymentConfig {
    pub gas_price_bonus: f64,
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        Self {
            gas_price_bonus: DEFAULT_GAS_PRICE_BONUS,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DeploymentError {
    #[error("rpc error: {0}")]
    Rpc(#[from] alloy::transports::RpcError<alloy::transports::TransportErrorKind>),
    #[error("{0}")]
    InvalidBonus(#[from] InvalidBonus),

    #[error("deploy tx {} failed to complete", .tx_hash.debug_red())]
    FailedToComplete { tx_hash: TxHash },
    #[error("failed to deploy {} on {network}: tx {} reverted", .contract.red(), .tx_hash.debug_red())]
    Reverted {
        contract: String,
        network: String,
        tx_hash: TxHash,
    },
    #[error("receipt for {} on {network} has no contract address", .contract.red())]
    NoContractAddress { contract: String, network: String },
    #[error("invalid constructor for {}: {reason}", .contract.red())]
    InvalidConstructor { contract: String, reason: String },
}

/// Outcome of a confirmed contract-creation transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeploymentResult {
    pub network: String,
    pub contract_name: String,
    pub address: Address,
    pub tx_hash: TxHash,
    pub gas_used: u64,
}

/// The parts of a receipt that decide whether a deployment succeeded.
#[derive(Clone, Copy, Debug)]
pub struct ReceiptSummary {
    pub tx_hash: TxHash,
    pub status: bool,
    pub contract_address: Option<Address>,
    pub gas_used: u64,
}

impl From<&TransactionReceipt> for ReceiptSummary {
    fn from(receipt: &TransactionReceipt) -> Self {
        Self {
            tx_hash: receipt.transaction_hash,
            status: receipt.status(),
            contract_address: receipt.contract_address,
            gas_used: receipt.gas_used,
        }
    }
}

impl DeploymentResult {
    pub fn from_receipt(
        network: &str,
        contract_name: &str,
        receipt: ReceiptSummary,
    ) -> Result<Self, DeploymentError> {
        if !receipt.status {
            return Err(DeploymentError::Reverted {
                contract: contract_name.to_owned(),
                network: network.to_owned(),
                tx_hash: receipt.tx_hash,
            });
        }
        let address = receipt
            .contract_address
            .ok_or_else(|| DeploymentError::NoContractAddress {
                contract: contract_name.to_owned(),
                network: network.to_owned(),
            })?;
        Ok(Self {
            network: network.to_owned(),
            contract_name: contract_name.to_owned(),
            address,
            tx_hash: receipt.tx_hash,
            gas_used: receipt.gas_used,
        })
    }
}

/// Appends ABI-encoded constructor arguments to the artifact bytecode.
pub fn creation_code(artifact: &Artifact, args: &[String]) -> Result<Bytes, DeploymentError> {
    let invalid = |reason: String| DeploymentError::InvalidConstructor {
        contract: artifact.contract_name.clone(),
        reason,
    };
    let Some(constructor) = &artifact.abi.constructor else {
        if !args.is_empty() {
            return Err(invalid(format!(
                "no constructor in abi but {} args given",
                args.len()
            )));
        }
        return Ok(artifact.bytecode.clone());
    };
    if args.len() != constructor.inputs.len() {
        return Err(invalid(format!(
            "mismatch number of constructor arguments (want {}; got {})",
            constructor.inputs.len(),
            args.len(),
        )));
    }

    let mut values = Vec::<DynSolValue>::with_capacity(args.len());
    for (arg, param) in args.iter().zip(constructor.inputs.iter()) {
        let ty = param
            .resolve()
            .map_err(|err| invalid(format!("could not resolve {param}: {err}")))?;
        let value = ty
            .coerce_str(arg)
            .map_err(|err| invalid(format!("could not parse {param}: {err}")))?;
        values.push(value);
    }
    let encoded = constructor
        .abi_encode_input_raw(&values)
        .map_err(|err| invalid(err.to_string()))?;

    let mut code = artifact.bytecode.to_vec();
    code.extend(encoded);
    Ok(code.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::{
        json_abi::{Constructor, JsonAbi, Param, StateMutability},
        primitives::{address, b256},
    };
    use serde_json::Map;

    use crate::core::artifact::CompilerInfo;

    const TX_HASH: TxHash =
        b256!("0x1111111111111111111111111111111111111111111111111111111111111111");
    const CONTRACT: Address = address!("0xabc0000000000000000000000000000000000001");

    fn artifact(constructor: Option<Constructor>) -> Artifact {
        Artifact {
            contract_name: "Foo".to_owned(),
            abi: JsonAbi {
                constructor,
                ..Default::default()
            },
            bytecode: Bytes::from_static(&[0x60, 0x80]),
            compiler: CompilerInfo {
                name: None,
                version: "0.8.20".to_owned(),
                settings: Map::new(),
            },
        }
    }

    fn param(ty: &str, name: &str) -> Param {
        Param {
            ty: ty.to_owned(),
            name: name.to_owned(),
            components: vec![],
            internal_type: None,
        }
    }

    #[test]
    fn successful_receipt_yields_address() {
        let receipt = ReceiptSummary {
            tx_hash: TX_HASH,
            status: true,
            contract_address: Some(CONTRACT),
            gas_used: 21_000,
        };
        let result = DeploymentResult::from_receipt("main", "Foo", receipt).unwrap();
        assert_eq!(result.address, CONTRACT);
        assert_eq!(result.network, "main");
        assert_eq!(result.contract_name, "Foo");
        assert_eq!(result.tx_hash, TX_HASH);
    }

    #[test]
    fn failed_receipt_is_fatal() {
        let receipt = ReceiptSummary {
            tx_hash: TX_HASH,
            status: false,
            contract_address: Some(CONTRACT),
            gas_used: 21_000,
        };
        let err = DeploymentResult::from_receipt("kovan", "Foo", receipt).unwrap_err();
        assert!(matches!(
            err,
            DeploymentError::Reverted { contract, network, tx_hash }
                if contract == "Foo" && network == "kovan" && tx_hash == TX_HASH
        ));
    }

    #[test]
    fn receipt_without_address() {
        let receipt = ReceiptSummary {
            tx_hash: TX_HASH,
            status: true,
            contract_address: None,
            gas_used: 0,
        };
        assert!(matches!(
            DeploymentResult::from_receipt("main", "Foo", receipt),
            Err(DeploymentError::NoContractAddress { .. })
        ));
    }

    #[test]
    fn creation_code_without_args() {
        let code = creation_code(&artifact(None), &[]).unwrap();
        assert_eq!(code.as_ref(), &[0x60, 0x80]);
        assert!(creation_code(&artifact(None), &["1".to_owned()]).is_err());
    }

    #[test]
    fn creation_code_appends_encoded_args() {
        let constructor = Constructor {
            inputs: vec![param("uint256", "amount"), param("address", "owner")],
            state_mutability: StateMutability::NonPayable,
        };
        let args = vec![
            "7".to_owned(),
            "0xabc0000000000000000000000000000000000001".to_owned(),
        ];
        let code = creation_code(&artifact(Some(constructor)), &args).unwrap();
        assert_eq!(code.len(), 2 + 64);
        assert_eq!(&code[..2], &[0x60, 0x80]);
        assert_eq!(code[2 + 31], 7);
        assert_eq!(&code[2 + 44..2 + 64], CONTRACT.as_slice());
    }

    #[test]
    fn creation_code_checks_args() {
        let constructor = Constructor {
            inputs: vec![param("uint256", "amount")],
            state_mutability: StateMutability::NonPayable,
        };
        let foo = artifact(Some(constructor));
        assert!(matches!(
            creation_code(&foo, &[]),
            Err(DeploymentError::InvalidConstructor { .. })
        ));
        assert!(matches!(
            creation_code(&foo, &["not a number".to_owned()]),
            Err(DeploymentError::InvalidConstructor { .. })
        ));
    }
}
