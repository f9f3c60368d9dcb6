//! Logic-less template rendering.
//!
//! [`Template`] wraps a compiled [`mustache`] template and renders it against
//! a [`RenderContext`]. The context's JSON values are converted to
//! [`mustache::Data`] before rendering, so the same template and context
//! always produce byte-identical output.
//!
//! # Value conversion
//!
//! | context value       | as a variable       | as a section                  |
//! |---------------------|---------------------|-------------------------------|
//! | absent, `null`      | empty               | omitted, inverted rendered    |
//! | `""`, `false`       | empty               | omitted, inverted rendered    |
//! | `true`              | `true`              | once, value pushed            |
//! | number (incl. `0`)  | decimal text        | once, value pushed            |
//! | non-empty string    | the string          | once, value pushed            |
//! | array               | render error        | once per element              |
//! | object              | render error        | once, object pushed           |
//!
//! An empty array omits its section and renders its inverted section.
//! Integral floats print without a fractional part.
//!
//! # Lookup rules
//!
//! - `{{.}}` is the innermost section value. At the top level it is the whole
//!   context, which has no text form and is a render error.
//! - A plain name is looked up in each enclosing section's object from the
//!   innermost outwards, then in the root context.
//! - `{{a.b.c}}` resolves only its first segment that way. The walk through
//!   `b` and `c` stays inside the object `a` was found in: if the innermost
//!   object holding `a` lacks `b`, the name renders empty even when an outer
//!   `a` has it. Arrays cannot be indexed by position.
//! - A name that cannot be resolved renders as empty text.

use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use mustache::Data;
use serde_json::{Number, Value};

use super::context::RenderContext;
use super::error::TemplateError;
use crate::constants::RENDER_PREVIEW_CHARS;

/// A compiled mustache template.
///
/// Compile once with [`Template::compile`], render as many times as needed.
///
/// # Examples
///
/// ```rust
/// use fnform::templating::{RenderContext, Template};
///
/// let template = Template::compile("Name: {{name}}, Image: {{buildImage}}").unwrap();
/// let context = RenderContext::new()
///     .with("name", "svc1")
///     .with("buildImage", "img:1");
///
/// assert_eq!(template.render(&context).unwrap(), "Name: svc1, Image: img:1");
/// ```
#[derive(Debug, Clone)]
pub struct Template {
    inner: mustache::Template,
}

impl Template {
    /// Compile template text.
    ///
    /// Partials (`{{> name}}`) are read from `name.mustache` in the current
    /// directory; a missing partial renders empty.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Syntax`] for unclosed tags, unclosed or
    /// mismatched sections and malformed delimiter declarations.
    pub fn compile(source: &str) -> Result<Self, TemplateError> {
        Ok(Self {
            inner: mustache::compile_str(source)?,
        })
    }

    /// Compile template text, reading partials from `partials_dir`.
    ///
    /// # Errors
    ///
    /// As [`Template::compile`], plus [`TemplateError::Partial`] when a
    /// partial exists but cannot be read.
    pub fn compile_with_partials(source: &str, partials_dir: &Path) -> Result<Self, TemplateError> {
        let context = mustache::Context::new(partials_dir.to_path_buf());
        Ok(Self {
            inner: context.compile(source.chars())?,
        })
    }

    /// Render against a render context.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Render`] when a variable tag resolves to an
    /// array or object. Missing names are never an error.
    pub fn render(&self, context: &RenderContext) -> Result<String, TemplateError> {
        let data = context_data(context);
        let rendered = panic::catch_unwind(AssertUnwindSafe(|| self.inner.render_data_to_string(&data)));
        match rendered {
            Ok(output) => Ok(output?),
            // The engine panics on variable tags naming a list or map
            Err(_) => Err(TemplateError::Render(
                "a variable tag names a list or object; use a section to iterate it".to_string(),
            )),
        }
    }
}

fn context_data(context: &RenderContext) -> Data {
    Data::Map(context.as_map().iter().map(|(key, value)| (key.clone(), value_data(value))).collect())
}

fn value_data(value: &Value) -> Data {
    match value {
        Value::Null | Value::Bool(false) => Data::Null,
        Value::Bool(true) => Data::String("true".to_string()),
        Value::String(text) if text.is_empty() => Data::Null,
        Value::String(text) => Data::String(text.clone()),
        Value::Number(number) => Data::String(display_number(number)),
        Value::Array(items) => Data::Vec(items.iter().map(value_data).collect()),
        Value::Object(map) => {
            Data::Map(map.iter().map(|(key, value)| (key.clone(), value_data(value))).collect())
        }
    }
}

fn display_number(number: &Number) -> String {
    if let Some(n) = number.as_i64() {
        return n.to_string();
    }
    if let Some(n) = number.as_u64() {
        return n.to_string();
    }
    match number.as_f64() {
        // Integral floats print without a fractional part
        Some(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", n as i64),
        Some(n) => n.to_string(),
        None => number.to_string(),
    }
}

/// Compile and render in one step.
///
/// # Errors
///
/// Returns [`TemplateError::Syntax`] when the template text is malformed and
/// [`TemplateError::Render`] when a variable names a list or object.
/// Missing context keys are never an error.
///
/// # Examples
///
/// ```rust
/// use fnform::templating::{render, RenderContext};
///
/// let output = render("{{missing}}", &RenderContext::new()).unwrap();
/// assert_eq!(output, "");
/// ```
pub fn render(template: &str, context: &RenderContext) -> Result<String, TemplateError> {
    let output = Template::compile(template)?.render(context)?;
    tracing::debug!("Rendered {}", output.chars().take(RENDER_PREVIEW_CHARS).collect::<String>());
    Ok(output)
}
