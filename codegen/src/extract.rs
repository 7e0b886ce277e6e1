//! Specification extraction.
//!
//! Reads one annotated source unit and produces a [`CapabilitySpecification`]
//! for every top-level trait carrying a target marker:
//!
//! ```ignore
//! //! capwrap:namespace handlers
//! use crate::http;
//!
//! // capwrap:target func:"WrapNormal"
//! pub trait Normal:
//!     // capwrap:require
//!     http::ResponseWriter
//!     + http::Hijacker
//! {
//! }
//! ```
//!
//! Supertraits marked `require` are assumed present on every input; the rest
//! are probed at runtime, in declaration order.

use std::collections::HashMap;

use proc_macro2::TokenTree;
use quote::ToTokens;
use syn::spanned::Spanned;
use syn::{Attribute, Expr, ExprLit, File, Item, ItemTrait, Lit, Meta, TraitBoundModifier, TypeParamBound, UseTree};
use tracing::{debug, warn};

use crate::comments::{CommentGroup, CommentMap};
use crate::directive::{self, Directive};
use crate::error::Error;
use crate::model::{AnonymousComposite, CapabilityRef, ModuleRef};
use crate::options::Options;
use crate::resolve::ModuleResolver;

/// Largest number of optional capabilities one target may list.
///
/// The factory holds one dispatch entry per subset, `2^N` in total.
pub const MAX_OPTIONAL_CAPABILITIES: usize = 16;

/// The parsed intent for one generation target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilitySpecification {
    pub target: String,
    /// Explicit factory name from the marker's `func` key.
    pub func_name: Option<String>,
    pub required: AnonymousComposite,
    /// Probe order; index `i` becomes bit `1 << i`.
    pub optional: Vec<CapabilityRef>,
}

/// Everything extracted from one source unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub namespace: String,
    pub specs: Vec<CapabilitySpecification>,
}

pub fn extract(
    source: &str,
    resolver: &dyn ModuleResolver,
    options: &Options,
) -> Result<Extraction, Error> {
    let file = syn::parse_file(source)?;
    let namespace = namespace_of(&file, &options.marker).ok_or_else(|| Error::MissingNamespace {
        marker: options.marker.clone(),
    })?;

    let imports = ImportTable::build(&file, resolver);
    let mut extractor = Extractor {
        comments: CommentMap::scan(source),
        imports,
        marker: &options.marker,
    };

    let mut specs = Vec::new();
    for item in &file.items {
        if let Some(spec) = extractor.item(item)? {
            debug!(
                target_name = %spec.target,
                required = spec.required.len(),
                optional = spec.optional.len(),
                "extracted capability target"
            );
            specs.push(spec);
        }
    }

    Ok(Extraction { namespace, specs })
}

fn namespace_of(file: &File, marker: &str) -> Option<String> {
    doc_texts(&file.attrs).find_map(|text| match directive::parse(&text, marker)? {
        Directive::Namespace(name) => match syn::parse_str::<syn::Ident>(name) {
            Ok(_) => Some(name.to_string()),
            Err(_) => {
                warn!(namespace = name, "namespace is not an identifier");
                None
            }
        },
        _ => None,
    })
}

fn doc_texts(attrs: &[Attribute]) -> impl Iterator<Item = String> + '_ {
    attrs.iter().filter_map(|attr| {
        if !attr.path().is_ident("doc") {
            return None;
        }
        match &attr.meta {
            Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(ExprLit { lit: Lit::Str(s), .. }) => Some(s.value()),
                _ => None,
            },
            _ => None,
        }
    })
}

/// Line of the first token after the outer attributes (`#` + `[...]` pairs).
fn head_line(item: &Item) -> Option<usize> {
    let mut tokens = item.to_token_stream().into_iter();
    while let Some(token) = tokens.next() {
        match token {
            TokenTree::Punct(p) if p.as_char() == '#' => {
                tokens.next();
            }
            other => return Some(other.span().start().line),
        }
    }
    None
}

/// Best-effort original text of a node, for diagnostics.
fn fragment(node: &impl Spanned) -> Option<String> {
    node.span().source_text()
}

// =============================================================================
// Import table
// =============================================================================

/// Identifier usable as a capability prefix -> module it stands for.
#[derive(Debug, Default)]
struct ImportTable {
    modules: HashMap<String, ModuleRef>,
}

impl ImportTable {
    fn build(file: &File, resolver: &dyn ModuleResolver) -> Self {
        let mut table = ImportTable::default();
        for item in &file.items {
            if let Item::Use(item) = item {
                let root = if item.leading_colon.is_some() { "::" } else { "" };
                table.walk(&item.tree, root.to_string(), resolver);
            }
        }
        table
    }

    fn walk(&mut self, tree: &UseTree, prefix: String, resolver: &dyn ModuleResolver) {
        match tree {
            UseTree::Path(path) => {
                let prefix = join(&prefix, &path.ident.to_string());
                self.walk(&path.tree, prefix, resolver);
            }
            UseTree::Name(name) => {
                let path = if name.ident == "self" {
                    prefix
                } else {
                    join(&prefix, &name.ident.to_string())
                };
                self.resolve(&path, resolver);
            }
            UseTree::Rename(rename) => {
                let alias = rename.rename.to_string();
                if alias == "_" {
                    debug!(import = %rename.ident, "underscore import contributes no name");
                    return;
                }
                let path = if rename.ident == "self" {
                    prefix
                } else {
                    join(&prefix, &rename.ident.to_string())
                };
                self.modules.insert(alias.clone(), ModuleRef::new(alias, path));
            }
            UseTree::Glob(_) => {
                debug!(prefix = %prefix, "glob import contributes no name");
            }
            UseTree::Group(group) => {
                for tree in &group.items {
                    self.walk(tree, prefix.clone(), resolver);
                }
            }
        }
    }

    fn resolve(&mut self, path: &str, resolver: &dyn ModuleResolver) {
        match resolver.resolve(path) {
            Ok(modules) if modules.is_empty() => {
                warn!(path, "module resolved to no names; import skipped");
            }
            Ok(modules) => {
                for module in modules {
                    self.modules.insert(module.ident().to_string(), module);
                }
            }
            Err(err) => {
                warn!(path, error = %err, "failed to resolve module; import skipped");
            }
        }
    }

    fn get(&self, ident: &str) -> Option<&ModuleRef> {
        self.modules.get(ident)
    }
}

fn join(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() || prefix == "::" {
        format!("{prefix}{segment}")
    } else {
        format!("{prefix}::{segment}")
    }
}

// =============================================================================
// Targets
// =============================================================================

struct Extractor<'a> {
    comments: CommentMap,
    imports: ImportTable,
    marker: &'a str,
}

impl Extractor<'_> {
    fn item(&mut self, item: &Item) -> Result<Option<CapabilitySpecification>, Error> {
        let (attrs, name, kind) = match item {
            Item::Trait(t) => (&t.attrs, &t.ident, "a trait"),
            Item::Struct(s) => (&s.attrs, &s.ident, "a struct"),
            Item::Enum(e) => (&e.attrs, &e.ident, "an enum"),
            Item::Union(u) => (&u.attrs, &u.ident, "a union"),
            Item::Type(t) => (&t.attrs, &t.ident, "a type alias"),
            Item::TraitAlias(t) => (&t.attrs, &t.ident, "a trait alias"),
            _ => return Ok(None),
        };

        let groups = self.leading_groups(item, attrs);
        let docs: Vec<String> = doc_texts(attrs).collect();
        let texts = groups
            .iter()
            .flat_map(CommentGroup::texts)
            .chain(docs.iter().map(String::as_str));
        let Some(tag) = directive::find_target(texts, self.marker) else {
            return Ok(None);
        };
        let func_name = tag.lookup("func");

        let name = name.to_string();
        let Item::Trait(target) = item else {
            return Err(Error::NotCapabilityAggregate { name, kind });
        };
        if !target.generics.params.is_empty() || target.generics.where_clause.is_some() {
            return Err(Error::NotCapabilityAggregate {
                name,
                kind: "a generic trait",
            });
        }

        let (required, optional) = self.members(target)?;
        let Some(required) = AnonymousComposite::new(required) else {
            return Err(Error::NoRequiredCapability(name));
        };
        if optional.len() > MAX_OPTIONAL_CAPABILITIES {
            return Err(Error::TooManyOptionalCapabilities {
                target: name,
                count: optional.len(),
                limit: MAX_OPTIONAL_CAPABILITIES,
            });
        }

        Ok(Some(CapabilitySpecification {
            target: name,
            func_name,
            required,
            optional,
        }))
    }

    /// Plain comment groups directly above the item's first token or any of its attributes.
    fn leading_groups(&mut self, item: &Item, attrs: &[Attribute]) -> Vec<CommentGroup> {
        let mut lines: Vec<usize> = attrs
            .iter()
            .map(|attr| attr.span().start().line)
            .collect();
        lines.extend(head_line(item));
        lines.sort_unstable();
        lines.dedup();

        lines
            .into_iter()
            .filter_map(|line| self.comments.take(line))
            .collect()
    }

    fn members(&mut self, target: &ItemTrait) -> Result<(Vec<CapabilityRef>, Vec<CapabilityRef>), Error> {
        let mut required = Vec::new();
        let mut optional = Vec::new();

        for bound in &target.supertraits {
            let capability = self.capability(bound)?;
            let is_required = self
                .comments
                .take(bound.span().start().line)
                .is_some_and(|group| directive::has_require(group.texts(), self.marker));

            if is_required {
                required.push(capability);
            } else {
                optional.push(capability);
            }
        }

        if let Some(item) = target.items.first() {
            return Err(Error::InvalidCapabilityReference {
                fragment: fragment(item),
                reason: format!("`{}` lists a trait item, not a capability", target.ident),
            });
        }

        Ok((required, optional))
    }

    fn capability(&self, bound: &TypeParamBound) -> Result<CapabilityRef, Error> {
        let invalid = |reason: String| Error::InvalidCapabilityReference {
            fragment: fragment(bound),
            reason,
        };

        let TypeParamBound::Trait(trait_bound) = bound else {
            return Err(invalid("not a capability path".into()));
        };
        let plain = trait_bound.paren_token.is_none()
            && matches!(trait_bound.modifier, TraitBoundModifier::None)
            && trait_bound.lifetimes.is_none();
        let path = &trait_bound.path;
        if !plain || path.leading_colon.is_some() || path.segments.iter().any(|s| !s.arguments.is_none()) {
            return Err(invalid("not a capability path".into()));
        }

        let segments: Vec<String> = path.segments.iter().map(|s| s.ident.to_string()).collect();
        match segments.as_slice() {
            [name] => Ok(CapabilityRef::local(name.as_str())),
            [prefix, name] => match self.imports.get(prefix) {
                Some(module) => Ok(CapabilityRef::qualified(module.clone(), name.as_str())),
                None => Err(invalid(format!("unknown module `{prefix}`"))),
            },
            _ => Err(invalid("expected `Name` or `module::Name`".into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::SegmentResolver;

    fn run(source: &str) -> Result<Extraction, Error> {
        extract(source, &SegmentResolver, &Options::default())
    }

    #[test]
    fn import_forms() {
        let src = r#"
//! capwrap:namespace imports
use crate::net::http;
use crate::io as sink;
use crate::wire::{self, frames as fr};
use crate::glob::*;
use crate::nothing as _;
"#;
        let file = syn::parse_file(src).unwrap();
        let table = ImportTable::build(&file, &SegmentResolver);

        assert_eq!(table.get("http"), Some(&ModuleRef::new("http", "crate::net::http")));
        assert_eq!(table.get("sink"), Some(&ModuleRef::new("sink", "crate::io")));
        assert_eq!(table.get("wire"), Some(&ModuleRef::new("wire", "crate::wire")));
        assert_eq!(table.get("fr"), Some(&ModuleRef::new("fr", "crate::wire::frames")));
        assert_eq!(table.get("glob"), None);
        assert_eq!(table.get("_"), None);
    }

    #[test]
    fn doc_marker_on_the_trait_itself() {
        let src = r#"
//! capwrap:namespace docs
use crate::http;

/// capwrap:target func:"Made"
pub trait Documented:
    // capwrap:require
    http::ResponseWriter
    + http::Flusher
{
}
"#;
        let extraction = run(src).unwrap();
        assert_eq!(extraction.namespace, "docs");
        assert_eq!(extraction.specs.len(), 1);
        let spec = &extraction.specs[0];
        assert_eq!(spec.func_name.as_deref(), Some("Made"));
        assert_eq!(spec.required.len(), 1);
        assert_eq!(spec.optional[0].name(), "Flusher");
    }

    #[test]
    fn plain_comment_above_doc_comments() {
        let src = r#"
//! capwrap:namespace docs

// capwrap:target
/// Ordinary documentation.
pub trait Layered:
    // capwrap:require
    Base
    + Extra
{
}
"#;
        let spec = &run(src).unwrap().specs[0];
        assert_eq!(spec.target, "Layered");
        assert_eq!(spec.required.members(), vec![CapabilityRef::local("Base")]);
        assert_eq!(spec.optional, vec![CapabilityRef::local("Extra")]);
    }

    #[test]
    fn require_marker_binds_to_the_first_bound_on_the_line() {
        let src = r#"
//! capwrap:namespace inline
// capwrap:target
pub trait Inline:
    // capwrap:require
    Base + Extra
{
}
"#;
        let spec = &run(src).unwrap().specs[0];
        assert_eq!(spec.required.members(), vec![CapabilityRef::local("Base")]);
        assert_eq!(spec.optional, vec![CapabilityRef::local("Extra")]);
    }

    #[test]
    fn unmarked_items_are_ignored() {
        let src = r#"
//! capwrap:namespace quiet
// just a comment
pub trait Quiet: Base {}
// capwrap:target
fn not_a_type() {}
"#;
        assert!(run(src).unwrap().specs.is_empty());
    }

    #[test]
    fn generic_target_is_a_shape_error() {
        let src = r#"
//! capwrap:namespace generic
// capwrap:target
pub trait Generic<T>: Base {}
"#;
        assert!(matches!(
            run(src),
            Err(Error::NotCapabilityAggregate { kind: "a generic trait", .. })
        ));
    }

    #[test]
    fn target_without_required_capability_is_rejected() {
        let src = r#"
//! capwrap:namespace bare
// capwrap:target
pub trait Bare: Base + Extra {}
"#;
        assert!(matches!(run(src), Err(Error::NoRequiredCapability(name)) if name == "Bare"));
    }

    fn with_optional(count: usize) -> String {
        let optional: String = (0..count).map(|i| format!("\n    + Extra{i}")).collect();
        format!(
            "//! capwrap:namespace wide\n// capwrap:target\npub trait Wide:\n    // capwrap:require\n    Base{optional}\n{{\n}}\n"
        )
    }

    #[test]
    fn optional_capabilities_are_bounded() {
        let spec = &run(&with_optional(MAX_OPTIONAL_CAPABILITIES)).unwrap().specs[0];
        assert_eq!(spec.optional.len(), MAX_OPTIONAL_CAPABILITIES);

        match run(&with_optional(64)) {
            Err(Error::TooManyOptionalCapabilities { target, count, limit }) => {
                assert_eq!(target, "Wide");
                assert_eq!(count, 64);
                assert_eq!(limit, MAX_OPTIONAL_CAPABILITIES);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn bound_shapes() {
        for bound in ["?Sized", "'static", "a::b::C", "Io<u8>", "::http::Flusher", "for<'a> Base", "(Base)"] {
            let src = format!(
                "//! capwrap:namespace shapes\n// capwrap:target\npub trait Shape: {bound} {{}}\n"
            );
            match run(&src) {
                Err(Error::InvalidCapabilityReference { .. }) | Err(Error::Parse { .. }) => {}
                other => panic!("{bound}: unexpected {other:?}"),
            }
        }
    }
}
