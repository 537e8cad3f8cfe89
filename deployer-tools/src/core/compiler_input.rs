// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Solidity standard-json compiler input, as submitted to the explorer for verification.

use std::{collections::BTreeMap, path::PathBuf, sync::OnceLock};

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::artifact::Artifact;

pub const SOLIDITY: &str = "Solidity";

/// Settings keys that must not reach the explorer.
const STRIPPED_SETTINGS: [&str; 1] = ["remappings"];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompilerInput {
    pub language: String,
    pub sources: BTreeMap<String, SourceFile>,
    #[serde(default)]
    pub settings: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    pub content: String,
}

impl CompilerInput {
    /// Builds an input around a single flattened source, reusing the artifact's compiler
    /// settings so the explorer reproduces the deployed bytecode.
    pub fn from_flattened(artifact: &Artifact, content: impl Into<String>) -> Self {
        let mut sources = BTreeMap::new();
        sources.insert(
            format!("{}.sol", artifact.contract_name),
            SourceFile {
                content: content.into(),
            },
        );
        let mut settings = artifact.compiler.settings.clone();
        for key in STRIPPED_SETTINGS {
            settings.remove(key);
        }
        Self {
            language: SOLIDITY.to_owned(),
            sources,
            settings,
        }
    }

    /// Finds the source defining `contract_name` and formats it as `<path>:<name>`.
    ///
    /// Paths are matched by file name suffix since prefixes differ between build setups.
    pub fn contract_path_spec(&self, contract_name: &str) -> Option<String> {
        let file_name = format!("{contract_name}.sol");
        let nested = format!("/{file_name}");
        self.sources
            .keys()
            .find(|path| **path == file_name || path.ends_with(&nested))
            .map(|path| format!("{path}:{contract_name}"))
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// How the compiler input for verification is obtained.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceStrategy {
    /// `<dir>/<Name>.sol` holds preprocessed source; the input is derived from the artifact.
    Flattened { dir: PathBuf },
    /// `<dir>/<Name>.json` holds a ready standard-json input.
    StandardJson { dir: PathBuf },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceKind {
    #[default]
    Flattened,
    StandardJson,
}

impl SourceKind {
    pub fn strategy(self, dir: impl Into<PathBuf>) -> SourceStrategy {
        let dir = dir.into();
        match self {
            Self::Flattened => SourceStrategy::Flattened { dir },
            Self::StandardJson => SourceStrategy::StandardJson { dir },
        }
    }
}

fn version_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^v?(\d+\.\d+\.\d+(?:-[0-9A-Za-z]+(?:\.[0-9A-Za-z]+)*)?)(\+commit\.[0-9a-fA-F]+)?")
            .expect("valid compiler version pattern")
    })
}

/// Normalizes a raw compiler version into the form the explorer expects.
///
/// `soljson-v0.5.16+commit.9c3226ce.js` and `v0.5.16+commit.9c3226ce.Emscripten.clang` both
/// become `v0.5.16+commit.9c3226ce`.
pub fn compiler_version(raw: &str) -> Option<String> {
    let version = raw.trim();
    let version = version.strip_prefix("soljson-").unwrap_or(version);
    let version = version.strip_suffix(".js").unwrap_or(version);
    let caps = version_pattern().captures(version)?;
    let semver = caps.get(1)?.as_str();
    let commit = caps.get(2).map(|c| c.as_str()).unwrap_or_default();
    Some(format!("v{semver}{commit}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn input(paths: &[&str]) -> CompilerInput {
        CompilerInput {
            language: SOLIDITY.to_owned(),
            sources: paths
                .iter()
                .map(|p| {
                    (
                        p.to_string(),
                        SourceFile {
                            content: String::new(),
                        },
                    )
                })
                .collect(),
            settings: Map::new(),
        }
    }

    #[test]
    fn finds_contract_path_by_suffix() {
        let sources = input(&["a/b/Foo.sol", "x/Bar.sol"]);
        assert_eq!(sources.contract_path_spec("Bar").as_deref(), Some("x/Bar.sol:Bar"));
        assert_eq!(sources.contract_path_spec("Foo").as_deref(), Some("a/b/Foo.sol:Foo"));
        assert_eq!(sources.contract_path_spec("Baz"), None);
    }

    #[test]
    fn path_match_respects_file_boundaries() {
        let both = input(&["src/FooBar.sol", "Bar.sol"]);
        assert_eq!(both.contract_path_spec("Bar").as_deref(), Some("Bar.sol:Bar"));
        let prefixed_only = input(&["src/FooBar.sol"]);
        assert_eq!(prefixed_only.contract_path_spec("Bar"), None);
    }

    #[test]
    fn trims_compiler_versions() {
        let test_cases = [
            ("soljson-v0.5.16+commit.9c3226ce.js", Some("v0.5.16+commit.9c3226ce")),
            ("v0.6.12+commit.27d51765.Emscripten.clang", Some("v0.6.12+commit.27d51765")),
            ("0.8.19+commit.7dd6d404.Linux.g++", Some("v0.8.19+commit.7dd6d404")),
            ("v0.4.26-nightly.2018.9.25+commit.1b8334e5", Some("v0.4.26-nightly.2018.9.25+commit.1b8334e5")),
            ("0.8.20", Some("v0.8.20")),
            ("latest", None),
        ];
        for (raw, expected) in test_cases {
            assert_eq!(compiler_version(raw).as_deref(), expected, "{raw}");
        }
    }

    #[test]
    fn serializes_standard_json_shape() {
        let mut foo = input(&["Foo.sol"]);
        foo.settings.insert("optimizer".to_owned(), serde_json::json!({ "enabled": true }));
        let value: Value = serde_json::from_str(&foo.to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "language": "Solidity",
                "sources": { "Foo.sol": { "content": "" } },
                "settings": { "optimizer": { "enabled": true } },
            })
        );
    }
}
