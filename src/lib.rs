#![cfg_attr(not(feature = "std"), no_std)]

// Feature flags handled:
// - std: default, enables std library
// - alloc: enables Facet in no_std
// - codegen: re-exports the wrapper generator

//! # capwrap
//!
//! Capability-preserving wrappers.
//!
//! A host value may or may not support side capabilities beyond its main
//! interface (hijacking a connection, flushing a buffer...). Wrapping such a
//! value usually loses that information: the wrapper either claims every
//! capability or none. `capwrap` keeps the answer exact.
//!
//! ## Architecture
//!
//! ```text
//! +-------------------------------------------------------------------+
//! |  Build time: capwrap-codegen (feature `codegen`)                  |
//! |  - annotated traits -> one factory fn per target                  |
//! +-------------------------------------------------------------------+
//!                                |
//!                                v
//! +-------------------------------------------------------------------+
//! |  Run time: this crate                                             |
//! |  - Probe / probe   "does this value support C?"                   |
//! |  - view            "this value as C, if it supports it"           |
//! |  - Facet           a shared value exposing a chosen capability set|
//! |  - impl_probe!, forward!                                          |
//! +-------------------------------------------------------------------+
//! ```
//!
//! A generated factory probes its input once per optional capability, builds
//! a bit accumulator and picks the [`Facet`] layering exactly the capabilities
//! that were present. Callers reach an optional capability of the result with
//! [`view`].
//!
//! ## Usage
//!
//! ```ignore
//! //! capwrap:namespace handlers
//! use crate::sink;
//!
//! // capwrap:target
//! pub trait Normal:
//!     // capwrap:require
//!     sink::ResponseWriter
//!     + sink::Hijacker
//! {
//! }
//!
//! capwrap::forward! {
//!     impl sink::ResponseWriter for capwrap::Facet<dyn Normal> {
//!         fn write(&self, buf: &[u8]) -> usize;
//!     }
//! }
//!
//! mod generated {
//!     use super::*;
//!     include!("handlers_capwrap.rs");
//! }
//! pub use generated::*;
//! ```
//!
//! `capwrap --src src/handlers.rs --dst src/handlers_capwrap.rs` writes the
//! `NormalWrapper` factory:
//!
//! ```ignore
//! let output = handlers::NormalWrapper(conn, |w| Arc::new(Logging::new(w)));
//! if let Some(hijacker) = capwrap::view::<dyn sink::Hijacker, _>(&*output) {
//!     hijacker.hijack();
//! }
//! ```

#[cfg(feature = "alloc")]
extern crate alloc;

mod macros;
mod probe;

#[cfg(feature = "alloc")]
mod facet;

pub use probe::{probe, view, Probe, Query};

#[cfg(feature = "alloc")]
pub use facet::Facet;

#[cfg(feature = "codegen")]
pub use codegen;
