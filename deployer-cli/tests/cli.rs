// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::fs;

use assert_cmd::Command;

fn deployer() -> Command {
    let mut cmd = Command::cargo_bin("deployer").unwrap();
    cmd.env_remove("DEPLOYER_PRIVATE_KEY")
        .env_remove("ETHERSCAN_API_KEY");
    cmd
}

fn output_text(output: &std::process::Output) -> String {
    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stderr));
    text
}

#[test]
fn help_lists_subcommands() {
    let output = deployer().arg("--help").output().unwrap();
    assert!(output.status.success());
    let text = output_text(&output);
    for subcommand in ["deploy", "verify", "verify-status"] {
        assert!(text.contains(subcommand), "missing {subcommand} in {text}");
    }
}

#[test]
fn missing_plan_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = deployer()
        .current_dir(dir.path())
        .arg("deploy")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(output_text(&output).contains("deploy.toml"));
}

#[test]
fn missing_artifact_fails_before_deploying() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("artifacts")).unwrap();
    fs::write(
        dir.path().join("deploy.toml"),
        r#"
contracts = ["Missing"]

[artifacts]
dir = "artifacts"
source_dir = "artifacts"

[[networks]]
name = "ropsten"
rpc_url = "http://127.0.0.1:1"
"#,
    )
    .unwrap();

    let output = deployer()
        .current_dir(dir.path())
        .args(["deploy", "--skip-verification"])
        .args([
            "--private-key",
            "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318",
        ])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(output_text(&output).contains("Missing"));
}

#[test]
fn verify_requires_api_key() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("deploy.toml"),
        r#"
contracts = ["Foo"]

[artifacts]
dir = "."
source_dir = "."

[[networks]]
name = "main"
rpc_url = "http://127.0.0.1:1"
"#,
    )
    .unwrap();

    let output = deployer()
        .current_dir(dir.path())
        .args(["verify-status", "--network", "main", "--guid", "abc"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(output_text(&output).contains("etherscan api key"));
}
