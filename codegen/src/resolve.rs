//! Module name resolution.
//!
//! An import without an explicit alias (`use crate::net::http;`) names a module
//! whose identifier is decided by the module itself. The extractor asks a
//! [`ModuleResolver`] for it. Failures are never fatal: the import is logged
//! and skipped.

use std::collections::BTreeMap;

use crate::model::ModuleRef;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("`{0}` does not name a module")]
    Unnamed(String),

    #[error("failed to load module `{path}`: {reason}")]
    Load { path: String, reason: String },
}

/// `module path -> [(exported name, module path)]`.
pub trait ModuleResolver {
    fn resolve(&self, path: &str) -> Result<Vec<ModuleRef>, ResolveError>;
}

impl<F> ModuleResolver for F
where
    F: Fn(&str) -> Result<Vec<ModuleRef>, ResolveError>,
{
    fn resolve(&self, path: &str) -> Result<Vec<ModuleRef>, ResolveError> {
        self(path)
    }
}

/// Rust modules are exported under their last path segment.
#[derive(Debug, Clone, Copy, Default)]
pub struct SegmentResolver;

impl ModuleResolver for SegmentResolver {
    fn resolve(&self, path: &str) -> Result<Vec<ModuleRef>, ResolveError> {
        let last = path
            .trim_start_matches("::")
            .rsplit("::")
            .next()
            .unwrap_or_default();
        match last {
            "" | "crate" | "self" | "super" => Err(ResolveError::Unnamed(path.to_string())),
            name => Ok(vec![ModuleRef::new(name, path)]),
        }
    }
}

/// Fixed table of module paths to exported names. Unknown paths resolve to nothing.
#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    table: BTreeMap<String, Vec<String>>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: impl Into<String>, name: impl Into<String>) -> Self {
        self.table.entry(path.into()).or_default().push(name.into());
        self
    }
}

impl ModuleResolver for StaticResolver {
    fn resolve(&self, path: &str) -> Result<Vec<ModuleRef>, ResolveError> {
        Ok(self
            .table
            .get(path)
            .into_iter()
            .flatten()
            .map(|name| ModuleRef::new(name.as_str(), path))
            .collect())
    }
}
