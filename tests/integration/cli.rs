//! End-to-end tests for the fnform commands.

use fnform::test_utils::{SpecFixture, TemplateFixture};
use predicates::prelude::*;
use tempfile::TempDir;

use super::fnform;

#[test]
fn test_render_lambda_to_stdout() {
    let temp = TempDir::new().unwrap();

    fnform(temp.path())
        .args(["render", "lambda", "--name", "orders", "--runtime", "python3.6", "--timeout", "30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("FunctionName: orders"))
        .stdout(predicate::str::contains("Runtime: python3.6"))
        .stdout(predicate::str::contains("Timeout: 30"))
        .stdout(predicate::str::contains("MemorySize: 128"))
        .stdout(predicate::str::contains("{{").not());
}

#[test]
fn test_render_pipeline_resolves_build_image() {
    let temp = TempDir::new().unwrap();

    fnform(temp.path())
        .args(["render", "pipeline", "--name", "orders", "--runtime", "nodejs4.3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Image: aws/codebuild/eb-nodejs-4.4.6-amazonlinux-64:2.1.3"))
        .stdout(predicate::str::contains("Name: orders-build"));
}

#[test]
fn test_unknown_runtime_renders_blank_image_and_warns() {
    let temp = TempDir::new().unwrap();

    fnform(temp.path())
        .args(["render", "pipeline", "--name", "legacy", "--runtime", "java8", "--verify"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Image: ''"))
        .stdout(predicate::str::contains("aws/codebuild/eb-").not())
        .stderr(predicate::str::contains("java8"));
}

#[test]
fn test_strict_mode_rejects_unknown_runtime() {
    let temp = TempDir::new().unwrap();

    fnform(temp.path())
        .args(["render", "pipeline", "--name", "orders", "--runtime", "nodejs6.1", "--strict"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Unknown runtime 'nodejs6.1'"))
        .stderr(predicate::str::contains("Did you mean nodejs6.10"));
}

#[test]
fn test_strict_mode_rejects_invalid_spec() {
    let temp = TempDir::new().unwrap();

    fnform(temp.path())
        .args(["render", "lambda", "--name", "orders", "--memory-size", "100", "--strict"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("memorySize"));
}

#[test]
fn test_render_all_separates_documents() {
    let temp = TempDir::new().unwrap();

    fnform(temp.path())
        .args(["render", "all", "--name", "orders"])
        .assert()
        .success()
        .stdout(predicate::str::contains("AWS::Serverless::Function"))
        .stdout(predicate::str::contains("\n---\n"))
        .stdout(predicate::str::contains("AWS::CodePipeline::Pipeline"));
}

#[test]
fn test_render_all_to_directory() {
    let temp = TempDir::new().unwrap();
    let spec = SpecFixture::python().write_to(temp.path()).unwrap();

    fnform(temp.path())
        .args(["render", "all", "--spec"])
        .arg(&spec)
        .args(["--output", "deploy"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let lambda = std::fs::read_to_string(temp.path().join("deploy/lambda.yaml")).unwrap();
    assert!(lambda.contains("FunctionName: orders"));
    assert!(lambda.contains("MemorySize: 256"));

    let pipeline = std::fs::read_to_string(temp.path().join("deploy/pipeline.yaml")).unwrap();
    assert!(pipeline.contains("Image: aws/codebuild/eb-python-3.6-amazonlinux-64:2.3.2"));
}

#[test]
fn test_render_single_template_to_file() {
    let temp = TempDir::new().unwrap();

    fnform(temp.path())
        .args(["render", "lambda", "--name", "orders", "-o", "out/template.yaml"])
        .assert()
        .success();

    let text = std::fs::read_to_string(temp.path().join("out/template.yaml")).unwrap();
    assert!(text.contains("FunctionName: orders"));
}

#[test]
fn test_flags_override_spec_file() {
    let temp = TempDir::new().unwrap();
    let spec = SpecFixture::node_json().write_to(temp.path()).unwrap();

    fnform(temp.path())
        .args(["render", "lambda", "--spec"])
        .arg(&spec)
        .args(["--memory-size", "1024"])
        .assert()
        .success()
        .stdout(predicate::str::contains("FunctionName: users"))
        .stdout(predicate::str::contains("Runtime: nodejs4.3"))
        .stdout(predicate::str::contains("MemorySize: 1024"));
}

#[test]
fn test_custom_template_file() {
    let temp = TempDir::new().unwrap();
    let template = TemplateFixture::lambda_summary().write_to(temp.path()).unwrap();

    fnform(temp.path())
        .args(["render", "lambda", "--name", "orders", "--template"])
        .arg(&template)
        .assert()
        .success()
        .stdout("name: orders\nruntime: nodejs6.10\ntimeout: 3\nmemory: 128\n");
}

#[test]
fn test_custom_pipeline_template_fallback() {
    let temp = TempDir::new().unwrap();
    let template = TemplateFixture::pipeline_image().write_to(temp.path()).unwrap();

    fnform(temp.path())
        .args(["render", "pipeline", "--name", "svc", "--runtime", "ruby2.5", "--template"])
        .arg(&template)
        .assert()
        .success()
        .stdout("project: svc\nstage: build\nimage: none\n");
}

#[test]
fn test_template_override_needs_single_family() {
    let temp = TempDir::new().unwrap();

    fnform(temp.path())
        .args(["render", "all", "--template", "builtin:lambda"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("single template"));
}

#[test]
fn test_template_syntax_error_names_section() {
    let temp = TempDir::new().unwrap();
    let template = TemplateFixture::unclosed_section().write_to(temp.path()).unwrap();

    fnform(temp.path())
        .args(["render", "pipeline", "--template"])
        .arg(&template)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("unclosed section"))
        .stderr(predicate::str::contains("buildImage"));
}

#[test]
fn test_template_render_error_is_reported() {
    let temp = TempDir::new().unwrap();
    let template = temp.path().join("whole.yaml");
    std::fs::write(&template, "context: {{.}}\n").unwrap();

    fnform(temp.path())
        .args(["render", "pipeline", "--template"])
        .arg(&template)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Failed to render pipeline template"));
}

#[test]
fn test_missing_template_file() {
    let temp = TempDir::new().unwrap();

    fnform(temp.path())
        .args(["render", "lambda", "--template", "missing.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read template 'missing.yaml'"));
}

#[test]
fn test_unreachable_template_url() {
    let temp = TempDir::new().unwrap();

    fnform(temp.path())
        .args(["render", "lambda", "--template", "http://127.0.0.1:9/lambda.yaml"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Failed to fetch template"));
}

#[test]
fn test_verify_rejects_invalid_yaml() {
    let temp = TempDir::new().unwrap();
    let template = TemplateFixture::not_yaml().write_to(temp.path()).unwrap();

    fnform(temp.path())
        .args(["render", "lambda", "--name", "x", "--verify", "--template"])
        .arg(&template)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not valid YAML"));
}

#[test]
fn test_spec_file_parse_error() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("broken.json"), "{\"name\": ").unwrap();

    fnform(temp.path())
        .args(["render", "lambda", "--spec", "broken.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("broken.json"));
}

#[test]
fn test_context_command() {
    let temp = TempDir::new().unwrap();

    let output = fnform(temp.path())
        .args(["context", "pipeline", "--name", "svc", "--runtime", "ruby2.5"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let context: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(context, serde_json::json!({"name": "svc", "buildImage": null}));
}

#[test]
fn test_lambda_context_command() {
    let temp = TempDir::new().unwrap();

    let output = fnform(temp.path())
        .args(["context", "lambda", "--name", "f", "--timeout", "5"])
        .output()
        .unwrap();

    let context: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        context,
        serde_json::json!({"name": "f", "runtime": "nodejs6.10", "timeout": 5, "memorySize": 128})
    );
}

#[test]
fn test_runtimes_text() {
    let temp = TempDir::new().unwrap();

    fnform(temp.path())
        .arg("runtimes")
        .assert()
        .success()
        .stdout(predicate::str::contains("Node (nodejs)"))
        .stdout(predicate::str::contains("Python (python)"))
        .stdout(predicate::str::contains("nodejs6.10"))
        .stdout(predicate::str::contains("aws/codebuild/eb-python-2.7-amazonlinux-64:2.3.2"));
}

#[test]
fn test_runtimes_json() {
    let temp = TempDir::new().unwrap();

    let output = fnform(temp.path()).args(["runtimes", "--format", "json"]).output().unwrap();
    assert!(output.status.success());

    let platforms: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let platforms = platforms.as_array().unwrap();
    assert_eq!(platforms.len(), 2);
    assert_eq!(platforms[0]["platform"], "nodejs");
    assert_eq!(platforms[0]["runtimes"][0]["version"], "6.10");
    assert_eq!(platforms[1]["runtimes"].as_array().unwrap().len(), 2);
}

#[test]
fn test_validate_valid_spec() {
    let temp = TempDir::new().unwrap();

    fnform(temp.path())
        .args(["validate", "--name", "orders", "--memory-size", "192"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Service description is valid"));
}

#[test]
fn test_validate_reports_every_rule() {
    let temp = TempDir::new().unwrap();
    let spec = SpecFixture::invalid().write_to(temp.path()).unwrap();

    fnform(temp.path())
        .args(["validate", "--spec"])
        .arg(&spec)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("name: Provide a name for the service"))
        .stdout(predicate::str::contains("timeout:"))
        .stdout(predicate::str::contains("memorySize:"));
}

#[test]
fn test_validate_json() {
    let temp = TempDir::new().unwrap();

    let output = fnform(temp.path())
        .args(["validate", "--name", "f", "--runtime", "python3.7", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["valid"], true);
    assert_eq!(report["warnings"][0]["field"], "runtime");
    assert!(
        report["runtime_suggestions"]
            .as_array()
            .unwrap()
            .contains(&serde_json::json!("python3.6"))
    );
}

#[test]
fn test_verbose_logs_to_stderr() {
    let temp = TempDir::new().unwrap();

    fnform(temp.path())
        .args(["-v", "render", "lambda", "--name", "orders"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fetching template").not())
        .stderr(predicate::str::contains("Fetching template from builtin:lambda"));
}
