//! capwrap:namespace handlers
//!
//! Wrapper targets over the `sink` capabilities. `handlers_capwrap.rs` is the
//! generator's output for this file.

use capwrap::{forward, Facet};

use crate::sink;

// capwrap:target
pub trait Normal:
    // capwrap:require
    sink::ResponseWriter
    + sink::Hijacker
{
}

// capwrap:target
pub trait MultiOptional:
    // capwrap:require
    sink::ResponseWriter
    + sink::Hijacker
    + sink::Flusher
{
}

// capwrap:target
pub trait MultiRequire:
    // capwrap:require
    sink::ResponseWriter
    // capwrap:require
    + sink::Hijacker
    + sink::Flusher
{
}

// capwrap:target func:"PassThrough"
pub trait Plain:
    // capwrap:require
    sink::ResponseWriter
{
}

// Facets only implement the required capabilities; optional ones are
// reached with `capwrap::view`.
forward! {
    impl sink::ResponseWriter for Facet<dyn Normal> {
        fn write(&self, buf: &[u8]) -> usize;
        fn written(&self) -> usize;
    }

    impl sink::ResponseWriter for Facet<dyn MultiOptional> {
        fn write(&self, buf: &[u8]) -> usize;
        fn written(&self) -> usize;
    }

    impl sink::ResponseWriter for Facet<dyn MultiRequire> {
        fn write(&self, buf: &[u8]) -> usize;
        fn written(&self) -> usize;
    }
    impl sink::Hijacker for Facet<dyn MultiRequire> {
        fn hijack(&self) -> String;
    }
}

mod generated {
    use super::*;

    include!("handlers_capwrap.rs");
}

pub use generated::*;
