//! # capwrap-codegen
//!
//! Source generator for capability-preserving wrapper factories.
//!
//! A marked trait lists one or more *required* capabilities and any number of
//! *optional* ones. For every such trait the generator emits a factory that
//! wraps a value and reports exactly the optional capabilities the value
//! itself supports, decided by probing it at call time.
//!
//! ## Pipeline
//!
//! ```text
//! ┌────────────┐   extract   ┌───────────────┐   plan   ┌────────────────┐
//! │ annotated  │ ──────────▶ │ Capability    │ ───────▶ │ GenerationPlan │
//! │ source     │             │ Specification │          │ (per target)   │
//! └────────────┘             └───────────────┘          └───────┬────────┘
//!                                                               │ emit
//!                     ┌──────────┐   render   ┌────────────────┐ │
//!                     │   text   │ ◀───────── │ OutputDocument │◀┘
//!                     └──────────┘            └────────────────┘
//! ```
//!
//! Every stage is public; [`generate`] runs them all. Failures abort the run
//! and no partial output is produced.
//!
//! ## Example
//!
//! ```
//! use capwrap_codegen::{generate, Options, SegmentResolver};
//!
//! let source = r#"
//! //! capwrap:namespace handlers
//! use crate::http;
//!
//! // capwrap:target
//! pub trait Normal:
//!     // capwrap:require
//!     http::ResponseWriter
//!     + http::Hijacker
//! {
//! }
//! "#;
//!
//! let output = generate(source, &SegmentResolver, &Options::default()).unwrap();
//! assert!(output.starts_with("// Code generated by capwrap; DO NOT EDIT.\n// Namespace: handlers\n"));
//! assert!(output.contains("pub fn NormalWrapper("));
//! assert!(output.contains("use crate::http;"));
//! ```

pub mod comments;
pub mod directive;
pub mod emit;
pub mod error;
pub mod extract;
pub mod model;
pub mod options;
pub mod plan;
pub mod render;
pub mod resolve;

pub use emit::{emit, DispatchEntry, DispatchTable, ImportSet, OutputDocument};
pub use error::Error;
pub use extract::{extract, CapabilitySpecification, Extraction, MAX_OPTIONAL_CAPABILITIES};
pub use model::{AnonymousComposite, CapabilityRef, CompositeForm, ModuleRef, NamedComposite};
pub use options::Options;
pub use plan::{build_plan, build_plans, GenerationPlan};
pub use render::{render_document, PrettyRenderer, RenderError, Renderer};
pub use resolve::{ModuleResolver, ResolveError, SegmentResolver, StaticResolver};

/// Runs the whole pipeline with the `prettyplease` renderer.
pub fn generate(
    source: &str,
    resolver: &dyn ModuleResolver,
    options: &Options,
) -> Result<String, Error> {
    generate_with(source, resolver, &PrettyRenderer, options)
}

pub fn generate_with(
    source: &str,
    resolver: &dyn ModuleResolver,
    renderer: &dyn Renderer,
    options: &Options,
) -> Result<String, Error> {
    let extraction = extract(source, resolver, options)?;
    let plans = build_plans(&extraction.specs);
    let document = emit(&extraction.namespace, &plans, options)?;
    Ok(render_document(&document, renderer, options)?)
}
