use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::templating::TemplateFamily;

const BUILTIN_PREFIX: &str = "builtin:";

/// Where a template's text comes from.
///
/// Parsed from an identifier string:
///
/// | identifier                  | location                       |
/// |-----------------------------|--------------------------------|
/// | `builtin:lambda`            | template compiled into fnform  |
/// | `http://...`, `https://...` | fetched over HTTP              |
/// | `file:///path`, `path`      | read from the local filesystem |
///
/// # Examples
///
/// ```rust
/// use fnform::source::TemplateLocation;
/// use fnform::templating::TemplateFamily;
///
/// let location: TemplateLocation = "builtin:pipeline".parse().unwrap();
/// assert_eq!(location, TemplateLocation::Builtin(TemplateFamily::Pipeline));
///
/// let location: TemplateLocation = "https://example.com/lambda.yaml".parse().unwrap();
/// assert!(matches!(location, TemplateLocation::Url(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateLocation {
    Builtin(TemplateFamily),
    File(PathBuf),
    Url(String),
}

impl TemplateLocation {
    /// The built-in template of a family.
    #[must_use]
    pub const fn builtin(family: TemplateFamily) -> Self {
        Self::Builtin(family)
    }
}

impl FromStr for TemplateLocation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("template location cannot be empty".to_string());
        }

        if let Some(name) = s.strip_prefix(BUILTIN_PREFIX) {
            return name.parse::<TemplateFamily>().map(Self::Builtin).map_err(|_| {
                format!("unknown built-in template '{s}' (expected builtin:lambda or builtin:pipeline)")
            });
        }

        if s.starts_with("http://") || s.starts_with("https://") {
            return Ok(Self::Url(s.to_string()));
        }

        let path = s.strip_prefix("file://").unwrap_or(s);
        Ok(Self::File(PathBuf::from(path)))
    }
}

impl fmt::Display for TemplateLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin(family) => write!(f, "{BUILTIN_PREFIX}{family}"),
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}
