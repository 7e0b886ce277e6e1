use syn::parse_quote;

/// Knobs of one generation run.
#[derive(Debug, Clone)]
pub struct Options {
    /// Prefix of marker comments, `capwrap` in `// capwrap:target`.
    pub marker: String,
    /// Path of the runtime crate providing `Probe`, `probe` and `Facet`.
    pub runtime: syn::Path,
    /// First line of every generated document, written as a `//` comment.
    pub header: String,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            marker: "capwrap".to_string(),
            runtime: parse_quote!(::capwrap),
            header: "Code generated by capwrap; DO NOT EDIT.".to_string(),
        }
    }
}

impl Options {
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    pub fn with_runtime(mut self, runtime: syn::Path) -> Self {
        self.runtime = runtime;
        self
    }

    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }
}
