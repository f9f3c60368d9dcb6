//! Rendering through the public library API.

use fnform::catalog::{RuntimeCatalog, resolve_build_image};
use fnform::cli::render_documents;
use fnform::constants::DEFAULT_FETCH_TIMEOUT;
use fnform::models::ServiceSpec;
use fnform::source::{TemplateFetcher, TemplateLocation, TemplateStore, builtin_template};
use fnform::templating::{
    RenderContext, Template, TemplateFamily, build_lambda_context, build_pipeline_context, render,
};
use fnform::test_utils::{TemplateFixture, init_test_logging};
use tempfile::TempDir;

#[test]
fn test_every_builtin_runtime_renders_its_image() {
    init_test_logging(None);
    let template = Template::compile(builtin_template(TemplateFamily::Pipeline)).unwrap();

    for entry in RuntimeCatalog::builtin().entries() {
        let context = build_pipeline_context("svc", &entry.identifier());
        let output = template.render(&context).unwrap();
        assert!(
            output.contains(&format!("Image: {}", entry.build_image)),
            "{} should render {}",
            entry.identifier(),
            entry.build_image
        );
        assert_eq!(resolve_build_image(&entry.identifier()), Some(entry.build_image.as_str()));
    }
}

#[test]
fn test_builtin_lambda_template_is_valid_yaml() {
    let template = Template::compile(builtin_template(TemplateFamily::Lambda)).unwrap();
    let spec = ServiceSpec::new("orders").with_runtime("python2.7").with_timeout(60);
    let output = template.render(&build_lambda_context(&spec)).unwrap();

    let yaml: serde_yaml::Value = serde_yaml::from_str(&output).unwrap();
    let properties = &yaml["Resources"]["Function"]["Properties"];
    assert_eq!(properties["FunctionName"], serde_yaml::Value::from("orders"));
    assert_eq!(properties["Runtime"], serde_yaml::Value::from("python2.7"));
    assert_eq!(properties["Timeout"], serde_yaml::Value::from(60));
    assert_eq!(properties["MemorySize"], serde_yaml::Value::from(128));
}

#[test]
fn test_same_inputs_render_identically() {
    let spec = ServiceSpec::new("orders").with_runtime("nodejs4.3");
    let source = builtin_template(TemplateFamily::Pipeline);
    let context = build_pipeline_context(&spec.name, &spec.runtime);

    assert_eq!(render(source, &context).unwrap(), render(source, &context).unwrap());
}

#[test]
fn test_empty_context_renders_without_error() {
    for family in TemplateFamily::ALL {
        let output = render(builtin_template(family), &RenderContext::new()).unwrap();
        assert!(!output.contains("{{"));
    }
}

#[tokio::test]
async fn test_store_and_render_from_files() {
    let temp = TempDir::new().unwrap();
    let lambda = TemplateFixture::lambda_summary().write_to(temp.path()).unwrap();
    let pipeline = TemplateFixture::pipeline_image().write_to(temp.path()).unwrap();

    let store = TemplateStore::new(TemplateFetcher::new(DEFAULT_FETCH_TIMEOUT).unwrap())
        .with_location(TemplateFamily::Lambda, TemplateLocation::File(lambda))
        .with_location(TemplateFamily::Pipeline, TemplateLocation::File(pipeline));

    let spec = ServiceSpec::new("api").with_runtime("python3.6").with_memory_size(512);
    let documents =
        render_documents(&store, &TemplateFamily::ALL, &spec, &RuntimeCatalog::builtin()).await.unwrap();

    assert_eq!(documents[0].text, "name: api\nruntime: python3.6\ntimeout: 3\nmemory: 512\n");
    assert_eq!(
        documents[1].text,
        "project: api\nimage: aws/codebuild/eb-python-3.6-amazonlinux-64:2.3.2\nstage: build\n"
    );
}
