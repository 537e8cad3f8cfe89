// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Source verification against an Etherscan-style explorer API.

use std::{fmt, future::Future};

use alloy::primitives::Address;
use serde::Deserialize;
use serde_json::Value;

use crate::{
    config::{SecretString, Secrets},
    core::compiler_input::{compiler_version, CompilerInput},
    utils::color::{Color, DebugColor},
};

/// Status the explorer reports for an accepted request.
pub const SUCCESS_STATUS: &str = "1";
pub const CODE_FORMAT: &str = "solidity-standard-json-input";
/// Result the explorer gives for a contract whose source is already public.
pub const ALREADY_VERIFIED: &str = "Already Verified";
/// Explorer license code; 12 is Apache-2.0.
pub const DEFAULT_LICENSE_TYPE: u8 = 12;

/// A deployed contract and the sources it was compiled from.
#[derive(Clone, Copy, Debug)]
pub struct VerificationRequest<'a> {
    pub address: Address,
    pub contract_name: &'a str,
    pub compiler_input: &'a CompilerInput,
    /// Raw version string from the artifact, trimmed before submission.
    pub compiler_version: &'a str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerificationOutcome {
    pub success: bool,
    pub message: String,
    pub reference_id: Option<String>,
}

/// Result of polling a submitted verification once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CheckStatus {
    Pending(String),
    Verified(String),
    Failed(String),
}

#[derive(Debug, thiserror::Error)]
pub enum VerificationError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no source path ending in {}.sol in compiler input", .0.red())]
    ContractPathNotFound(String),
    #[error("unrecognized compiler version {}", .0.debug_red())]
    InvalidCompilerVersion(String),
    #[error("Verification failed: {message}: {result}")]
    Rejected { message: String, result: String },
}

#[derive(Debug, Deserialize)]
struct ExplorerResponse {
    status: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    result: Value,
}

impl ExplorerResponse {
    fn result_text(&self) -> String {
        match &self.result {
            Value::String(text) => text.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }

    fn succeeded(&self) -> bool {
        self.status == SUCCESS_STATUS
    }
}

/// Submits contract sources for verification on one network's explorer.
pub trait SourceVerifier: Send + Sync {
    fn verify(
        &self,
        request: &VerificationRequest<'_>,
    ) -> impl Future<Output = Result<VerificationOutcome, VerificationError>> + Send;
}

#[derive(Clone)]
pub struct EtherscanVerifier {
    api_url: String,
    api_key: SecretString,
    license_type: u8,
    client: reqwest::Client,
}

impl fmt::Debug for EtherscanVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EtherscanVerifier")
            .field("api_url", &self.api_url)
            .field("api_key", &self.api_key)
            .field("license_type", &self.license_type)
            .finish()
    }
}

impl EtherscanVerifier {
    pub fn new(api_url: impl Into<String>, secrets: &Secrets) -> Self {
        Self {
            api_url: api_url.into(),
            api_key: secrets.etherscan_key.clone(),
            license_type: DEFAULT_LICENSE_TYPE,
            client: reqwest::Client::new(),
        }
    }

    pub fn with_license_type(mut self, license_type: u8) -> Self {
        self.license_type = license_type;
        self
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Form fields for a `verifysourcecode` request.
    pub fn form(
        &self,
        request: &VerificationRequest<'_>,
    ) -> Result<Vec<(&'static str, String)>, VerificationError> {
        let contract_name = request
            .compiler_input
            .contract_path_spec(request.contract_name)
            .ok_or_else(|| VerificationError::ContractPathNotFound(request.contract_name.into()))?;
        let version = compiler_version(request.compiler_version).ok_or_else(|| {
            VerificationError::InvalidCompilerVersion(request.compiler_version.into())
        })?;
        Ok(vec![
            ("apikey", self.api_key.expose().to_owned()),
            ("module", "contract".to_owned()),
            ("action", "verifysourcecode".to_owned()),
            ("contractaddress", request.address.to_string()),
            ("sourceCode", request.compiler_input.to_json()?),
            ("codeformat", CODE_FORMAT.to_owned()),
            ("contractname", contract_name),
            ("compilerversion", version),
            ("licenseType", self.license_type.to_string()),
        ])
    }

    async fn post(
        &self,
        form: &[(&'static str, String)],
    ) -> Result<ExplorerResponse, VerificationError> {
        let response = self
            .client
            .post(&self.api_url)
            .form(form)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    /// Asks the explorer once whether a submitted verification has been processed.
    pub async fn check_status(&self, guid: &str) -> Result<CheckStatus, VerificationError> {
        let form = [
            ("apikey", self.api_key.expose().to_owned()),
            ("module", "contract".to_owned()),
            ("action", "checkverifystatus".to_owned()),
            ("guid", guid.to_owned()),
        ];
        let response = self.post(&form).await?;
        let result = response.result_text();
        let status = if response.succeeded() || result.starts_with(ALREADY_VERIFIED) {
            CheckStatus::Verified(result)
        } else if result.starts_with("Pending") {
            CheckStatus::Pending(result)
        } else {
            CheckStatus::Failed(result)
        };
        Ok(status)
    }
}

impl SourceVerifier for EtherscanVerifier {
    async fn verify(
        &self,
        request: &VerificationRequest<'_>,
    ) -> Result<VerificationOutcome, VerificationError> {
        let form = self.form(request)?;
        debug!(@grey,
            "submitting {} for {} to {}",
            request.contract_name,
            request.address.debug_lavender(),
            self.api_url
        );
        let response = self.post(&form).await?;
        if !response.succeeded() {
            return Err(VerificationError::Rejected {
                result: response.result_text(),
                message: response.message,
            });
        }
        Ok(VerificationOutcome {
            success: true,
            reference_id: Some(response.result_text()),
            message: response.message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use alloy::primitives::address;
    use httpmock::prelude::*;
    use serde_json::{json, Map};

    use crate::core::compiler_input::{SourceFile, SOLIDITY};

    const ADDRESS: Address = address!("0xabc0000000000000000000000000000000000001");

    fn secrets() -> Secrets {
        Secrets::new("0x01", "test-key")
    }

    fn compiler_input(path: &str) -> CompilerInput {
        let mut sources = BTreeMap::new();
        sources.insert(
            path.to_owned(),
            SourceFile {
                content: "contract Foo {}".to_owned(),
            },
        );
        CompilerInput {
            language: SOLIDITY.to_owned(),
            sources,
            settings: Map::new(),
        }
    }

    fn request(input: &CompilerInput) -> VerificationRequest<'_> {
        VerificationRequest {
            address: ADDRESS,
            contract_name: "Foo",
            compiler_input: input,
            compiler_version: "soljson-v0.5.16+commit.9c3226ce.js",
        }
    }

    #[tokio::test]
    async fn submits_standard_json_form() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api")
                    .header("content-type", "application/x-www-form-urlencoded")
                    .body_contains("apikey=test-key")
                    .body_contains("module=contract")
                    .body_contains("action=verifysourcecode")
                    .body_contains("codeformat=solidity-standard-json-input")
                    .body_contains("contractname=src%2FFoo.sol%3AFoo")
                    .body_contains("compilerversion=v0.5.16%2Bcommit.9c3226ce")
                    .body_contains("licenseType=12");
                then.status(200)
                    .json_body(json!({ "status": "1", "message": "OK", "result": "abc123guid" }));
            })
            .await;

        let input = compiler_input("src/Foo.sol");
        let verifier = EtherscanVerifier::new(server.url("/api"), &secrets());
        let outcome = verifier.verify(&request(&input)).await.unwrap();

        mock.assert_async().await;
        assert_eq!(
            outcome,
            VerificationOutcome {
                success: true,
                message: "OK".to_owned(),
                reference_id: Some("abc123guid".to_owned()),
            }
        );
    }

    #[tokio::test]
    async fn rejection_keeps_service_message() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api");
                then.status(200).json_body(json!({
                    "status": "0",
                    "message": "NOTOK",
                    "result": "Contract source code already verified"
                }));
            })
            .await;

        let input = compiler_input("Foo.sol");
        let verifier = EtherscanVerifier::new(server.url("/api"), &secrets());
        let err = verifier.verify(&request(&input)).await.unwrap_err();
        match err {
            VerificationError::Rejected { message, result } => {
                assert_eq!(message, "NOTOK");
                assert_eq!(result, "Contract source code already verified");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn missing_path_fails_before_request() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(200);
            })
            .await;

        let input = compiler_input("src/Other.sol");
        let verifier = EtherscanVerifier::new(server.url("/api"), &secrets());
        let err = verifier.verify(&request(&input)).await.unwrap_err();

        assert!(matches!(err, VerificationError::ContractPathNotFound(name) if name == "Foo"));
        assert_eq!(mock.hits_async().await, 0);
    }

    #[test]
    fn rejects_unknown_compiler_version() {
        let input = compiler_input("Foo.sol");
        let verifier = EtherscanVerifier::new("http://localhost/api", &secrets());
        let mut req = request(&input);
        req.compiler_version = "nightly";
        assert!(matches!(
            verifier.form(&req),
            Err(VerificationError::InvalidCompilerVersion(_))
        ));
    }

    #[test]
    fn license_type_is_configurable() {
        let input = compiler_input("Foo.sol");
        let verifier =
            EtherscanVerifier::new("http://localhost/api", &secrets()).with_license_type(3);
        let form = verifier.form(&request(&input)).unwrap();
        assert!(form.contains(&("licenseType", "3".to_owned())));
        assert!(form.contains(&("contractaddress", ADDRESS.to_string())));
    }

    #[test]
    fn debug_hides_api_key() {
        let verifier = EtherscanVerifier::new("http://localhost/api", &secrets());
        assert!(!format!("{verifier:?}").contains("test-key"));
    }

    #[tokio::test]
    async fn checks_submission_status() {
        let server = MockServer::start_async().await;
        let cases = [
            (
                "pending-guid",
                "0",
                "Pending in queue",
                CheckStatus::Pending("Pending in queue".to_owned()),
            ),
            (
                "pass-guid",
                "1",
                "Pass - Verified",
                CheckStatus::Verified("Pass - Verified".to_owned()),
            ),
            (
                "already-guid",
                "0",
                "Already Verified",
                CheckStatus::Verified("Already Verified".to_owned()),
            ),
            (
                "fail-guid",
                "0",
                "Fail - Unable to verify",
                CheckStatus::Failed("Fail - Unable to verify".to_owned()),
            ),
        ];
        for (guid, status, result, _) in &cases {
            server
                .mock_async(|when, then| {
                    when.method(POST)
                        .path("/api")
                        .body_contains("action=checkverifystatus")
                        .body_contains(format!("guid={guid}"));
                    then.status(200)
                        .json_body(json!({ "status": status, "message": "", "result": result }));
                })
                .await;
        }

        let verifier = EtherscanVerifier::new(server.url("/api"), &secrets());
        for (guid, _, _, expected) in cases {
            assert_eq!(verifier.check_status(guid).await.unwrap(), expected);
        }
    }
}
