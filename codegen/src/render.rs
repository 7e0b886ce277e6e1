//! Rendering of the emitted syntax tree into source text.

use crate::emit::OutputDocument;
use crate::options::Options;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to render output: {0}")]
pub struct RenderError(pub String);

/// Abstract syntax in, source text out.
pub trait Renderer {
    fn render(&self, file: &syn::File) -> Result<String, RenderError>;
}

/// `prettyplease` formatting, the layout `rustfmt` would produce for most items.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrettyRenderer;

impl Renderer for PrettyRenderer {
    fn render(&self, file: &syn::File) -> Result<String, RenderError> {
        Ok(prettyplease::unparse(file))
    }
}

impl<F> Renderer for F
where
    F: Fn(&syn::File) -> Result<String, RenderError>,
{
    fn render(&self, file: &syn::File) -> Result<String, RenderError> {
        self(file)
    }
}

/// Header line, namespace line, blank line, then the rendered items.
///
/// Both leading lines are plain `//` comments so the result can be pulled in
/// with `include!`.
pub fn render_document(
    document: &OutputDocument,
    renderer: &dyn Renderer,
    options: &Options,
) -> Result<String, RenderError> {
    let body = renderer.render(&document.to_file())?;
    Ok(format!(
        "// {}\n// Namespace: {}\n\n{}",
        options.header,
        document.namespace(),
        body
    ))
}
