//! Emitter
//!
//! Turns generation plans into a syntax tree. Each plan becomes one factory
//! function whose body probes the input once per optional capability and then
//! indexes a dispatch table with the resulting bit accumulator:
//!
//! ```text
//!   value ──wrap──▶ wrapped (every capability)
//!     │
//!     ├─ probe Hijacker ─▶ i |= 1 << 0
//!     ├─ probe Flusher  ─▶ i |= 1 << 1
//!     ▼
//!   facets[i](wrapped)     // 2^N entries, one per bit pattern
//! ```
//!
//! Entry `k` of the table layers the required capabilities plus every optional
//! capability whose bit is set in `k`, so the result answers probes exactly as
//! the input did.
//!
//! A target with several required capabilities also gets a `<Target>Required`
//! helper trait, declared ahead of its factory and used as parameter and
//! return type.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use proc_macro2::Literal;
use quote::{format_ident, quote};
use syn::{parse_quote, Item, Type};
use tracing::{debug, warn};

use crate::error::Error;
use crate::extract::MAX_OPTIONAL_CAPABILITIES;
use crate::model::{CapabilityRef, ModuleRef};
use crate::options::Options;
use crate::plan::GenerationPlan;

// =============================================================================
// ImportSet
// =============================================================================

/// Modules referenced by the generated items, keyed by identifier.
///
/// Iteration is ordered by identifier so the output does not depend on the
/// order capabilities were visited in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSet {
    modules: BTreeMap<String, ModuleRef>,
}

impl ImportSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `module` unless its identifier is already taken.
    ///
    /// The first registration wins. A later one with a different path is
    /// dropped and logged.
    pub fn register(&mut self, module: &ModuleRef) {
        match self.modules.entry(module.ident().to_string()) {
            Entry::Vacant(slot) => {
                slot.insert(module.clone());
            }
            Entry::Occupied(slot) if slot.get().path() != module.path() => {
                warn!(
                    ident = module.ident(),
                    kept = slot.get().path(),
                    dropped = module.path(),
                    "conflicting imports for one module identifier"
                );
            }
            Entry::Occupied(_) => {}
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModuleRef> {
        self.modules.values()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn to_items(&self) -> Vec<Item> {
        self.iter().map(|module| Item::Use(module.to_use_item())).collect()
    }
}

// =============================================================================
// DispatchTable
// =============================================================================

/// All `2^N` bit patterns over the optional capabilities of one plan.
#[derive(Debug, Clone, Copy)]
pub struct DispatchTable<'a> {
    optional: &'a [CapabilityRef],
    len: usize,
}

/// One row of a [`DispatchTable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchEntry<'a> {
    /// Accumulator value selecting this row.
    pub index: usize,
    /// Optional capabilities whose bit is set, in bit order.
    pub facets: Vec<&'a CapabilityRef>,
    width: usize,
}

impl DispatchEntry<'_> {
    /// Binary form of the index, most significant bit first (`10` = only bit 1).
    pub fn pattern(&self) -> String {
        format!("{:0width$b}", self.index, width = self.width)
    }
}

impl<'a> DispatchTable<'a> {
    /// `None` past [`MAX_OPTIONAL_CAPABILITIES`] capabilities.
    pub fn new(optional: &'a [CapabilityRef]) -> Option<Self> {
        if optional.len() > MAX_OPTIONAL_CAPABILITIES {
            return None;
        }
        let width = u32::try_from(optional.len()).ok()?;
        let len = 1usize.checked_shl(width)?;
        Some(DispatchTable { optional, len })
    }

    /// Number of optional capabilities, i.e. bits in the accumulator.
    pub fn width(&self) -> usize {
        self.optional.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn entries(&self) -> impl Iterator<Item = DispatchEntry<'a>> + '_ {
        let optional = self.optional;
        (0..self.len()).map(move |index| DispatchEntry {
            index,
            facets: optional
                .iter()
                .enumerate()
                .filter(|(bit, _)| index & (1 << bit) != 0)
                .map(|(_, capability)| capability)
                .collect(),
            width: optional.len(),
        })
    }
}

// =============================================================================
// OutputDocument
// =============================================================================

/// The generated unit before rendering.
#[derive(Debug, Clone)]
pub struct OutputDocument {
    namespace: String,
    items: Vec<Item>,
    imports: ImportSet,
}

impl OutputDocument {
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Declarations and factories in plan order, without imports.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn imports(&self) -> &ImportSet {
        &self.imports
    }

    /// Complete file: every declaration, then the imports.
    pub fn to_file(&self) -> syn::File {
        let mut items = self.items.clone();
        items.extend(self.imports.to_items());
        syn::File {
            shebang: None,
            attrs: Vec::new(),
            items,
        }
    }
}

// =============================================================================
// Emission
// =============================================================================

pub fn emit(
    namespace: &str,
    plans: &[GenerationPlan],
    options: &Options,
) -> Result<OutputDocument, Error> {
    let mut emitter = Emitter {
        options,
        items: Vec::new(),
        imports: ImportSet::new(),
    };
    for plan in plans {
        emitter.plan(plan)?;
    }
    Ok(OutputDocument {
        namespace: namespace.to_string(),
        items: emitter.items,
        imports: emitter.imports,
    })
}

struct Emitter<'a> {
    options: &'a Options,
    items: Vec<Item>,
    imports: ImportSet,
}

impl Emitter<'_> {
    fn plan(&mut self, plan: &GenerationPlan) -> Result<(), Error> {
        let table = DispatchTable::new(plan.optional()).ok_or_else(|| {
            Error::TooManyOptionalCapabilities {
                target: plan.wrapped().name().to_string(),
                count: plan.optional().len(),
                limit: MAX_OPTIONAL_CAPABILITIES,
            }
        })?;

        for module in plan.required().modules() {
            self.imports.register(module);
        }
        for module in plan.wrapped().modules() {
            self.imports.register(module);
        }
        for module in plan.optional().iter().filter_map(CapabilityRef::module) {
            self.imports.register(module);
        }

        debug!(
            func = plan.func_name(),
            optional = table.width(),
            branches = table.len(),
            "emitting wrapper factory"
        );

        self.items.extend(plan.parameter().declaration());
        self.items.extend(plan.wrapped().declaration());
        self.items.push(self.factory(plan, &table));
        Ok(())
    }

    fn factory(&self, plan: &GenerationPlan, table: &DispatchTable<'_>) -> Item {
        let runtime = &self.options.runtime;
        let func = format_ident!("{}", plan.func_name());
        let required = plan.parameter().to_type(runtime);
        let named = plan.wrapped().to_type(runtime);

        if table.width() == 0 {
            return parse_quote! {
                #[allow(non_snake_case, unused_variables)]
                pub fn #func(
                    value: ::std::sync::Arc<#required>,
                    wrap: impl FnOnce(::std::sync::Arc<#required>) -> ::std::sync::Arc<#named>,
                ) -> ::std::sync::Arc<#required> {
                    value
                }
            };
        }

        let bits: Vec<_> = (0..table.width()).map(|bit| format_ident!("I{}", bit)).collect();
        let shifts: Vec<_> = (0..table.width()).map(Literal::usize_unsuffixed).collect();
        let probes: Vec<Type> = plan.optional().iter().map(CapabilityRef::to_type).collect();
        let len = Literal::usize_unsuffixed(table.len());

        let facets = table.entries().map(|entry| {
            let layers = plan
                .required()
                .members()
                .iter()
                .chain(entry.facets.iter().copied())
                .map(CapabilityRef::to_type);
            quote! {
                |wrapped: ::std::sync::Arc<#named>| -> ::std::sync::Arc<#required> {
                    ::std::sync::Arc::new(#runtime::Facet::new(wrapped) #(.with::<#layers>())*)
                }
            }
        });

        parse_quote! {
            #[allow(non_snake_case)]
            pub fn #func(
                value: ::std::sync::Arc<#required>,
                wrap: impl FnOnce(::std::sync::Arc<#required>) -> ::std::sync::Arc<#named>,
            ) -> ::std::sync::Arc<#required> {
                let wrapped = wrap(::std::sync::Arc::clone(&value));
                #(const #bits: usize = 1 << #shifts;)*
                let mut i: usize = 0;
                #(
                    if #runtime::probe::<#probes, _>(&*value) {
                        i |= #bits;
                    }
                )*
                let facets: [fn(::std::sync::Arc<#named>) -> ::std::sync::Arc<#required>; #len] = [
                    #(#facets),*
                ];
                facets[i](wrapped)
            }
        }
    }
}
