//! Global configuration behaviour of the fnform binary.

use fnform::test_utils::{ConfigFixture, TemplateFixture};
use predicates::prelude::*;
use tempfile::TempDir;

use super::fnform;

#[test]
fn test_config_runtimes_extend_catalog() {
    let temp = TempDir::new().unwrap();
    let config = ConfigFixture::custom_runtimes().write_to(temp.path()).unwrap();

    fnform(temp.path())
        .arg("--config")
        .arg(&config)
        .args(["render", "pipeline", "--name", "api", "--runtime", "go1.x"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Image: aws/codebuild/golang:1.10"));

    fnform(temp.path())
        .arg("--config")
        .arg(&config)
        .args(["render", "pipeline", "--name", "api"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Image: custom/node:6.10"));
}

#[test]
fn test_config_runtimes_listed() {
    let temp = TempDir::new().unwrap();
    let config = ConfigFixture::custom_runtimes().write_to(temp.path()).unwrap();

    fnform(temp.path())
        .arg("-c")
        .arg(&config)
        .arg("runtimes")
        .assert()
        .success()
        .stdout(predicate::str::contains("Go (go)"))
        .stdout(predicate::str::contains("go1.x"));
}

#[test]
fn test_config_found_through_environment() {
    let temp = TempDir::new().unwrap();
    let config = ConfigFixture::strict().write_to(temp.path()).unwrap();

    fnform(temp.path())
        .env("FNFORM_CONFIG", &config)
        .args(["render", "pipeline", "--name", "api", "--runtime", "java8"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown runtime 'java8'"));
}

#[test]
fn test_config_template_override() {
    let temp = TempDir::new().unwrap();
    let template = TemplateFixture::lambda_summary().write_to(temp.path()).unwrap();
    let config = ConfigFixture::lambda_template(&template).write_to(temp.path()).unwrap();

    fnform(temp.path())
        .arg("--config")
        .arg(&config)
        .args(["render", "lambda", "--name", "api"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("name: api\n"));

    // The command-line override wins over the configured location
    fnform(temp.path())
        .arg("--config")
        .arg(&config)
        .args(["render", "lambda", "--name", "api", "--template", "builtin:lambda"])
        .assert()
        .success()
        .stdout(predicate::str::contains("AWS::Serverless::Function"));
}

#[test]
fn test_invalid_config_is_reported() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    std::fs::write(&path, "strict = maybe").unwrap();

    fnform(temp.path())
        .arg("--config")
        .arg(&path)
        .arg("runtimes")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_malformed_template_identifier_in_config() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    std::fs::write(&path, "[templates]\npipeline = \"builtin:sam\"\n").unwrap();

    fnform(temp.path())
        .arg("--config")
        .arg(&path)
        .args(["render", "pipeline"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("templates.pipeline"));
}
