//! Runtime capability queries.
//!
//! ```text
//! view::<dyn Flusher, _>(&value)
//!   └─ Query { capability: TypeId(dyn Flusher) }
//!        └─ value.provide(query)
//!             ├─ query.provide::<dyn Writer>(self)    skipped
//!             └─ query.provide::<dyn Flusher>(self)   answered
//!   ──▶ Some(&dyn Flusher)
//! ```

use core::any::{Any, TypeId};
use core::marker::PhantomData;

/// A value that can answer "do you support capability `C`?" at runtime, and
/// hand itself out as that capability.
///
/// Capabilities are identified by the [`TypeId`] of their trait object type,
/// so `dyn Flusher` stands for the `Flusher` capability. Every capability
/// trait a generated wrapper probes for should have `Probe` as a supertrait.
///
/// Implement it with [`impl_probe!`](crate::impl_probe), which only accepts
/// capabilities the type really implements. Answers must be stable for the
/// lifetime of the value and answering must not mutate it.
pub trait Probe {
    /// Offers `self` through [`Query::provide`] as each supported capability.
    fn provide<'a>(&'a self, query: &mut Query<'_, 'a>);

    fn probe(&self, capability: TypeId) -> bool {
        let mut query = Query::new(capability, None);
        self.provide(&mut query);
        query.is_answered()
    }
}

/// One pending capability request, filled in by [`Probe::provide`].
pub struct Query<'q, 'a> {
    capability: TypeId,
    answered: bool,
    /// `Option<*const C>` for the requested `C`, when a view is wanted.
    slot: Option<&'q mut (dyn Any + 'static)>,
    _view: PhantomData<fn(&'a ()) -> &'a ()>,
}

impl<'q, 'a> Query<'q, 'a> {
    fn new(capability: TypeId, slot: Option<&'q mut (dyn Any + 'static)>) -> Self {
        Query {
            capability,
            answered: false,
            slot,
            _view: PhantomData,
        }
    }

    /// The capability asked for.
    pub fn capability(&self) -> TypeId {
        self.capability
    }

    pub fn is_answered(&self) -> bool {
        self.answered
    }

    /// Answers the query with `view` if it asks for `C`. The first answer sticks.
    pub fn provide<C: ?Sized + 'static>(&mut self, view: &'a C) -> &mut Self {
        if self.answered || self.capability != TypeId::of::<C>() {
            return self;
        }
        self.answered = true;
        if let Some(slot) = self
            .slot
            .as_deref_mut()
            .and_then(|slot| slot.downcast_mut::<Option<*const C>>())
        {
            *slot = Some(view as *const C);
        }
        self
    }
}

/// Typed form of [`Probe::probe`].
///
/// ```
/// use capwrap::{impl_probe, probe, Probe};
///
/// trait Flusher: Probe {}
/// trait Hijacker: Probe {}
///
/// struct Conn;
/// impl Flusher for Conn {}
/// impl_probe!(Conn: dyn Flusher);
///
/// assert!(probe::<dyn Flusher, _>(&Conn));
/// assert!(!probe::<dyn Hijacker, _>(&Conn));
/// ```
#[inline]
pub fn probe<C, V>(value: &V) -> bool
where
    C: ?Sized + 'static,
    V: Probe + ?Sized,
{
    value.probe(TypeId::of::<C>())
}

/// `value` as capability `C`, or `None` when it does not support it.
///
/// ```
/// use capwrap::{impl_probe, view, Probe};
///
/// trait Flusher: Probe {
///     fn flush(&self) -> usize;
/// }
/// trait Hijacker: Probe {}
///
/// struct Conn;
/// impl Flusher for Conn {
///     fn flush(&self) -> usize { 3 }
/// }
/// impl_probe!(Conn: dyn Flusher);
///
/// let conn: &dyn Flusher = &Conn;
/// assert_eq!(view::<dyn Flusher, _>(conn).map(|f| f.flush()), Some(3));
/// assert!(view::<dyn Hijacker, _>(conn).is_none());
/// ```
pub fn view<C, V>(value: &V) -> Option<&C>
where
    C: ?Sized + 'static,
    V: Probe + ?Sized,
{
    let mut slot: Option<*const C> = None;
    let mut query = Query::new(TypeId::of::<C>(), Some(&mut slot));
    value.provide(&mut query);
    // SAFETY: the only writer is `Query::provide`, which stores a `&'a C`
    // borrowed from `value` for the `'a` of this call.
    slot.map(|ptr| unsafe { &*ptr })
}

impl<T: Probe + ?Sized> Probe for &T {
    #[inline]
    fn provide<'a>(&'a self, query: &mut Query<'_, 'a>) {
        (**self).provide(query)
    }
}

#[cfg(feature = "alloc")]
impl<T: Probe + ?Sized> Probe for alloc::boxed::Box<T> {
    #[inline]
    fn provide<'a>(&'a self, query: &mut Query<'_, 'a>) {
        (**self).provide(query)
    }
}

#[cfg(feature = "alloc")]
impl<T: Probe + ?Sized> Probe for alloc::sync::Arc<T> {
    #[inline]
    fn provide<'a>(&'a self, query: &mut Query<'_, 'a>) {
        (**self).provide(query)
    }
}
