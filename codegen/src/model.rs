//! Capability model
//!
//! Plain value records describing what a generation run talks about:
//! modules, capability references and the two composite flavours.
//! Nothing here performs I/O; the only behaviour is rendering each value
//! into `syn` syntax for the emitter.
//!
//! ```text
//! ModuleRef ──┐
//!             ├── CapabilityRef ──┬── AnonymousComposite  (required set)
//!   (local) ──┘                   └── NamedComposite      (fully capable view,
//!                                                          parameter / return type)
//! ```

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::punctuated::Punctuated;
use syn::{parse_quote, Ident, Item, ItemUse, Token, Type, TypeParamBound};

// =============================================================================
// ModuleRef
// =============================================================================

/// An external module supplying capability definitions.
///
/// Two references with the same identifier collapse into one import.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleRef {
    ident: String,
    path: String,
}

impl ModuleRef {
    pub fn new(ident: impl Into<String>, path: impl Into<String>) -> Self {
        ModuleRef {
            ident: ident.into(),
            path: path.into(),
        }
    }

    /// Short identifier capabilities are qualified with (`http` in `http::Hijacker`).
    pub fn ident(&self) -> &str {
        &self.ident
    }

    /// Full import path, `::`-separated.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub(crate) fn ident_token(&self) -> Ident {
        format_ident!("{}", self.ident)
    }

    /// `use path;` when the path already ends in the identifier, `use path as ident;` otherwise.
    pub fn to_use_item(&self) -> ItemUse {
        let absolute = self.path.starts_with("::");
        let segments: Vec<Ident> = self
            .path
            .trim_start_matches("::")
            .split("::")
            .map(|segment| format_ident!("{}", segment))
            .collect();
        let leading = if absolute { quote!(::) } else { TokenStream::new() };
        let ident = self.ident_token();

        let tail_matches = segments.last().is_some_and(|last| *last == ident);
        if tail_matches {
            parse_quote!(use #leading #(#segments)::*;)
        } else {
            parse_quote!(use #leading #(#segments)::* as #ident;)
        }
    }
}

// =============================================================================
// CapabilityRef
// =============================================================================

/// A reference to a single capability (a trait).
///
/// Without an owning module the capability is declared next to the generated code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CapabilityRef {
    module: Option<ModuleRef>,
    name: String,
}

impl CapabilityRef {
    pub fn new(module: Option<ModuleRef>, name: impl Into<String>) -> Self {
        CapabilityRef {
            module,
            name: name.into(),
        }
    }

    pub fn local(name: impl Into<String>) -> Self {
        CapabilityRef::new(None, name)
    }

    pub fn qualified(module: ModuleRef, name: impl Into<String>) -> Self {
        CapabilityRef::new(Some(module), name)
    }

    pub fn module(&self) -> Option<&ModuleRef> {
        self.module.as_ref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `http::Hijacker`, or `Hijacker` for local capabilities.
    pub fn to_path(&self) -> syn::Path {
        let name = format_ident!("{}", self.name);
        match &self.module {
            Some(module) => {
                let module = module.ident_token();
                parse_quote!(#module::#name)
            }
            None => parse_quote!(#name),
        }
    }

    pub fn to_bound(&self) -> TypeParamBound {
        let path = self.to_path();
        parse_quote!(#path)
    }

    /// Trait object form, `dyn http::Hijacker`.
    pub fn to_type(&self) -> Type {
        let path = self.to_path();
        parse_quote!(dyn #path)
    }
}

fn bounds_of(members: &[CapabilityRef]) -> Punctuated<TypeParamBound, Token![+]> {
    members.iter().map(CapabilityRef::to_bound).collect()
}

// =============================================================================
// AnonymousComposite
// =============================================================================

/// An unnamed, non-empty aggregate of capabilities.
///
/// Rust has no inline form for several non-auto traits (`dyn A + B` is
/// rejected), so the aggregate is rendered through [`AnonymousComposite::named`]:
/// a single member stays that capability, several become a helper trait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnonymousComposite {
    members: Vec<CapabilityRef>,
}

impl AnonymousComposite {
    /// Returns `None` for an empty member list.
    pub fn new(members: Vec<CapabilityRef>) -> Option<Self> {
        if members.is_empty() {
            None
        } else {
            Some(AnonymousComposite { members })
        }
    }

    pub fn members(&self) -> &[CapabilityRef] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// The composite under `name`, declared by the generated unit when it has
    /// more than one member.
    pub fn named(&self, name: impl Into<String>) -> NamedComposite {
        NamedComposite::new(name, self.members.clone(), false)
    }

    pub fn modules(&self) -> impl Iterator<Item = &ModuleRef> {
        self.members.iter().filter_map(CapabilityRef::module)
    }
}

// =============================================================================
// NamedComposite
// =============================================================================

/// A named aggregate of capabilities, possibly declared outside the generated unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedComposite {
    name: String,
    members: Vec<CapabilityRef>,
    declared: bool,
}

/// How a [`NamedComposite`] shows up in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositeForm<'a> {
    /// Already declared by the user; referenced by name, never re-declared.
    Existing(&'a str),
    /// No members at all.
    Empty,
    /// Exactly one member; that member's own form is used, no declaration.
    Alias(&'a CapabilityRef),
    /// A fresh trait declaration is emitted.
    Declared(&'a str, &'a [CapabilityRef]),
}

impl NamedComposite {
    pub fn new(name: impl Into<String>, members: Vec<CapabilityRef>, declared: bool) -> Self {
        NamedComposite {
            name: name.into(),
            members,
            declared,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn members(&self) -> &[CapabilityRef] {
        &self.members
    }

    pub fn is_declared(&self) -> bool {
        self.declared
    }

    pub fn form(&self) -> CompositeForm<'_> {
        if self.declared {
            return CompositeForm::Existing(&self.name);
        }
        match self.members.as_slice() {
            [] => CompositeForm::Empty,
            [single] => CompositeForm::Alias(single),
            members => CompositeForm::Declared(&self.name, members),
        }
    }

    /// Type form; `runtime` is the path of the runtime crate owning `Probe`.
    pub fn to_type(&self, runtime: &syn::Path) -> Type {
        match self.form() {
            CompositeForm::Existing(name) | CompositeForm::Declared(name, _) => {
                let name = format_ident!("{}", name);
                parse_quote!(dyn #name)
            }
            CompositeForm::Empty => parse_quote!(dyn #runtime::Probe),
            CompositeForm::Alias(member) => member.to_type(),
        }
    }

    /// Items declaring this composite, empty unless the form is [`CompositeForm::Declared`].
    ///
    /// The blanket impl makes every value carrying all members usable as the composite.
    pub fn declaration(&self) -> Vec<Item> {
        let CompositeForm::Declared(name, members) = self.form() else {
            return Vec::new();
        };
        let name = format_ident!("{}", name);
        let bounds = bounds_of(members);
        vec![
            parse_quote! {
                pub trait #name: #bounds {}
            },
            parse_quote! {
                impl<T: #bounds + ?Sized> #name for T {}
            },
        ]
    }

    /// Modules the composite's rendering depends on.
    pub fn modules(&self) -> Vec<&ModuleRef> {
        match self.form() {
            CompositeForm::Existing(_) | CompositeForm::Empty => Vec::new(),
            CompositeForm::Alias(member) => member.module().into_iter().collect(),
            CompositeForm::Declared(_, members) => {
                members.iter().filter_map(CapabilityRef::module).collect()
            }
        }
    }
}
