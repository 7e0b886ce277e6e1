use std::fmt;

use crate::render::RenderError;

/// Fatal generation errors. Any of them aborts the run with no output.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to parse source at {line}:{column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("source declares no namespace (expected `//! {marker}:namespace <name>`)")]
    MissingNamespace { marker: String },

    #[error("invalid capability reference{}: {reason}", Fragment(.fragment))]
    InvalidCapabilityReference {
        fragment: Option<String>,
        reason: String,
    },

    #[error("target `{name}` is {kind}, not a capability trait")]
    NotCapabilityAggregate { name: String, kind: &'static str },

    #[error("target `{0}` has no required capability")]
    NoRequiredCapability(String),

    #[error("target `{target}` lists {count} optional capabilities, at most {limit} are supported")]
    TooManyOptionalCapabilities {
        target: String,
        count: usize,
        limit: usize,
    },

    #[error(transparent)]
    Render(#[from] RenderError),
}

impl From<syn::Error> for Error {
    fn from(err: syn::Error) -> Self {
        let start = err.span().start();
        Error::Parse {
            line: start.line,
            column: start.column + 1,
            message: err.to_string(),
        }
    }
}

/// `(fragment)` when the offending source text could be recovered.
struct Fragment<'a>(&'a Option<String>);

impl fmt::Display for Fragment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(text) => write!(f, " ({})", text.trim()),
            None => Ok(()),
        }
    }
}
