//! Declarative helpers for capability-bearing types.

// =============================================================================
// impl_probe! - Declare the capability set of a concrete type
// =============================================================================

/// Implement [`Probe`](crate::Probe) for a type from the list of capabilities it supports.
///
/// Each listed capability must be implemented by the type; the value is
/// handed out as that trait object when asked.
///
/// ```
/// use capwrap::{impl_probe, probe, view, Probe};
///
/// trait Flusher: Probe {
///     fn flush(&self) -> usize;
/// }
///
/// struct Buffer;
/// impl Flusher for Buffer {
///     fn flush(&self) -> usize { 0 }
/// }
/// impl_probe!(Buffer: dyn Flusher);
///
/// assert!(probe::<dyn Flusher, _>(&Buffer));
/// assert_eq!(view::<dyn Flusher, _>(&Buffer).map(|f| f.flush()), Some(0));
/// ```
///
/// Listing a capability the type lacks does not compile:
///
/// ```compile_fail
/// use capwrap::{impl_probe, Probe};
///
/// trait Hijacker: Probe {}
///
/// struct Buffer;
/// impl_probe!(Buffer: dyn Hijacker);
/// ```
#[macro_export]
macro_rules! impl_probe {
    ($ty:ty : $($cap:ty),* $(,)?) => {
        impl $crate::Probe for $ty {
            #[allow(unused_variables)]
            fn provide<'a>(&'a self, query: &mut $crate::Query<'_, 'a>) {
                $(query.provide::<$cap>(self);)*
            }
        }
    };
}

// =============================================================================
// forward! - Implement a capability trait for a Facet by delegation
// =============================================================================

/// Implement a capability trait for a facet type by calling through to the
/// value it wraps.
///
/// Only `&self` methods can be forwarded; the facet shares its value.
///
/// ```
/// use capwrap::{forward, impl_probe, Facet, Probe};
/// use std::sync::Arc;
///
/// pub trait Writer: Probe {
///     fn write(&self, buf: &[u8]) -> usize;
/// }
/// pub trait Full: Writer {}
///
/// struct Sink;
/// impl Writer for Sink {
///     fn write(&self, buf: &[u8]) -> usize { buf.len() }
/// }
/// impl Full for Sink {}
/// impl_probe!(Sink: dyn Writer);
///
/// forward! {
///     impl Writer for Facet<dyn Full> {
///         fn write(&self, buf: &[u8]) -> usize;
///     }
/// }
///
/// let inner: Arc<dyn Full> = Arc::new(Sink);
/// let facet = Facet::new(inner).with::<dyn Writer>();
/// assert_eq!(facet.write(b"abc"), 3);
/// ```
#[macro_export]
macro_rules! forward {
    (@methods $cap:path; $(
        fn $method:ident(&self $(, $arg:ident : $arg_ty:ty)*) $(-> $ret:ty)?;
    )*) => {$(
        fn $method(&self $(, $arg: $arg_ty)*) $(-> $ret)? {
            <<Self as ::core::ops::Deref>::Target as $cap>::$method(&**self $(, $arg)*)
        }
    )*};

    ($(
        impl $($cap:ident)::+ for $facet:ty {
            $($methods:tt)*
        }
    )*) => {$(
        impl $($cap)::+ for $facet {
            $crate::forward!(@methods $($cap)::+; $($methods)*);
        }
    )*};
}
