//! Layered views over a fully capable value.
//!
//! A [`Facet`] shares one `Arc<T>` that supports every capability, and
//! exposes only a chosen subset of them through [`Probe`]:
//!
//! ```text
//! Facet<dyn Normal>
//!   inner   ──▶ Arc<dyn Normal>        (ResponseWriter + Hijacker + Flusher)
//!   exposed ──▶ [ResponseWriter, Flusher]
//!
//! probe::<dyn Hijacker>(&facet) == false
//! view::<dyn Flusher>(&facet)   == Some(inner as &dyn Flusher)
//! ```
//!
//! Queries for an exposed capability are answered by the inner value, so a
//! view reaches its implementation directly. The capabilities the facet must
//! itself implement (to coerce into a trait object) are written with
//! [`forward!`](crate::forward).

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::TypeId;
use core::fmt;
use core::ops::Deref;

use crate::probe::{Probe, Query};

pub struct Facet<T: ?Sized> {
    inner: Arc<T>,
    exposed: Vec<TypeId>,
}

impl<T: ?Sized> Facet<T> {
    /// A facet exposing nothing yet.
    pub fn new(inner: Arc<T>) -> Self {
        Facet {
            inner,
            exposed: Vec::new(),
        }
    }

    /// Adds capability `C` to the exposed set. Layering the same capability
    /// twice is a no-op.
    #[must_use]
    pub fn with<C: ?Sized + 'static>(mut self) -> Self {
        let id = TypeId::of::<C>();
        if !self.exposed.contains(&id) {
            self.exposed.push(id);
        }
        self
    }

    pub fn exposes<C: ?Sized + 'static>(&self) -> bool {
        self.exposed.contains(&TypeId::of::<C>())
    }

    /// Number of exposed capabilities.
    pub fn len(&self) -> usize {
        self.exposed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exposed.is_empty()
    }

    pub fn inner(&self) -> &Arc<T> {
        &self.inner
    }

    pub fn into_inner(self) -> Arc<T> {
        self.inner
    }
}

impl<T: ?Sized> Clone for Facet<T> {
    fn clone(&self) -> Self {
        Facet {
            inner: Arc::clone(&self.inner),
            exposed: self.exposed.clone(),
        }
    }
}

impl<T: ?Sized> Deref for Facet<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.inner
    }
}

impl<T: Probe + ?Sized> Probe for Facet<T> {
    fn provide<'a>(&'a self, query: &mut Query<'_, 'a>) {
        if self.exposed.contains(&query.capability()) {
            (*self.inner).provide(query);
        }
    }
}

impl<T: ?Sized> fmt::Debug for Facet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Facet")
            .field("exposed", &self.exposed.len())
            .finish_non_exhaustive()
    }
}
