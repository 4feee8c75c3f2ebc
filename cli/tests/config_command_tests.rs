//! Integration tests for the config command

use assert_cmd::prelude::*;
use predicates::prelude::*;

mod common;
use common::{setup_test_config, test_command, TestConfigBuilder, TEST_PASSWORD, TEST_SENDER};

#[test]
fn test_config_text_output() {
    let temp = setup_test_config();

    test_command(&temp)
        .args(["config", "--output-format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[credentials]"))
        .stdout(predicate::str::contains(TEST_SENDER))
        .stdout(predicate::str::contains("test.ctpe.net"))
        .stdout(predicate::str::contains(TEST_PASSWORD).not());
}

#[test]
fn test_config_json_output() {
    let temp = setup_test_config();

    test_command(&temp)
        .args(["config", "--output-format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"config_path\""))
        .stdout(predicate::str::contains("\"default_currency\": \"EUR\""))
        .stdout(predicate::str::contains("\"password\": \"******2wZt\""))
        .stdout(predicate::str::contains(TEST_PASSWORD).not());
}

#[test]
fn test_config_yaml_output() {
    let temp = setup_test_config();

    test_command(&temp)
        .args(["config", "--output-format", "yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("default_currency: EUR"))
        .stdout(predicate::str::contains(TEST_PASSWORD).not());
}

#[test]
fn test_config_live_flag_switches_endpoint() {
    let temp = setup_test_config();

    test_command(&temp)
        .args(["config", "--live", "--output-format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"test\": false"))
        .stdout(predicate::str::contains("https://ctpe.net/frontend/payment.prc"));
}

#[test]
fn test_config_validate_success() {
    let temp = TestConfigBuilder::new()
        .with_defaults()
        .with_default_currency("USD")
        .with_test(false)
        .build();

    test_command(&temp)
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"))
        .stdout(predicate::str::contains("https://ctpe.net"));
}

#[test]
fn test_config_validate_missing_channel() {
    let temp = TestConfigBuilder::new()
        .with_credential("sender", "s")
        .with_credential("login", "l")
        .with_credential("password", "p")
        .build();

    test_command(&temp)
        .args(["config", "validate"])
        .assert()
        .code(3)
        .stdout(predicate::str::contains("Configuration validation failed"))
        .stderr(predicate::str::contains("'channel'"));
}

#[test]
fn test_config_validate_invalid_toml() {
    let temp = TestConfigBuilder::new().with_raw("[credentials\n").build();

    test_command(&temp)
        .args(["config", "validate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid TOML syntax"));
}

#[test]
fn test_config_validate_unknown_field() {
    let temp = TestConfigBuilder::new()
        .with_raw("[credentials]\nsender = \"s\"\napi_key = \"x\"\n")
        .build();

    test_command(&temp)
        .args(["config", "validate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("api_key"));
}

#[test]
fn test_config_validate_missing_file() {
    let temp = tempfile::TempDir::new().unwrap();

    test_command(&temp)
        .args(["config", "validate"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Configuration file not found"));
}

#[test]
fn test_config_alias() {
    let temp = setup_test_config();

    test_command(&temp)
        .args(["c", "--output-format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[credentials]"));
}
