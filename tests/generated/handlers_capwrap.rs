// Code generated by capwrap; DO NOT EDIT.
// Namespace: handlers

#[allow(non_snake_case)]
pub fn NormalWrapper(
    value: ::std::sync::Arc<dyn sink::ResponseWriter>,
    wrap: impl FnOnce(
        ::std::sync::Arc<dyn sink::ResponseWriter>,
    ) -> ::std::sync::Arc<dyn Normal>,
) -> ::std::sync::Arc<dyn sink::ResponseWriter> {
    let wrapped = wrap(::std::sync::Arc::clone(&value));
    const I0: usize = 1 << 0;
    let mut i: usize = 0;
    if ::capwrap::probe::<dyn sink::Hijacker, _>(&*value) {
        i |= I0;
    }
    let facets: [fn(
        ::std::sync::Arc<dyn Normal>,
    ) -> ::std::sync::Arc<dyn sink::ResponseWriter>; 2] = [
        |wrapped: ::std::sync::Arc<dyn Normal>| -> ::std::sync::Arc<
            dyn sink::ResponseWriter,
        > {
            ::std::sync::Arc::new(
                ::capwrap::Facet::new(wrapped).with::<dyn sink::ResponseWriter>(),
            )
        },
        |wrapped: ::std::sync::Arc<dyn Normal>| -> ::std::sync::Arc<
            dyn sink::ResponseWriter,
        > {
            ::std::sync::Arc::new(
                ::capwrap::Facet::new(wrapped)
                    .with::<dyn sink::ResponseWriter>()
                    .with::<dyn sink::Hijacker>(),
            )
        },
    ];
    facets[i](wrapped)
}
#[allow(non_snake_case)]
pub fn MultiOptionalWrapper(
    value: ::std::sync::Arc<dyn sink::ResponseWriter>,
    wrap: impl FnOnce(
        ::std::sync::Arc<dyn sink::ResponseWriter>,
    ) -> ::std::sync::Arc<dyn MultiOptional>,
) -> ::std::sync::Arc<dyn sink::ResponseWriter> {
    let wrapped = wrap(::std::sync::Arc::clone(&value));
    const I0: usize = 1 << 0;
    const I1: usize = 1 << 1;
    let mut i: usize = 0;
    if ::capwrap::probe::<dyn sink::Hijacker, _>(&*value) {
        i |= I0;
    }
    if ::capwrap::probe::<dyn sink::Flusher, _>(&*value) {
        i |= I1;
    }
    let facets: [fn(
        ::std::sync::Arc<dyn MultiOptional>,
    ) -> ::std::sync::Arc<dyn sink::ResponseWriter>; 4] = [
        |wrapped: ::std::sync::Arc<dyn MultiOptional>| -> ::std::sync::Arc<
            dyn sink::ResponseWriter,
        > {
            ::std::sync::Arc::new(
                ::capwrap::Facet::new(wrapped).with::<dyn sink::ResponseWriter>(),
            )
        },
        |wrapped: ::std::sync::Arc<dyn MultiOptional>| -> ::std::sync::Arc<
            dyn sink::ResponseWriter,
        > {
            ::std::sync::Arc::new(
                ::capwrap::Facet::new(wrapped)
                    .with::<dyn sink::ResponseWriter>()
                    .with::<dyn sink::Hijacker>(),
            )
        },
        |wrapped: ::std::sync::Arc<dyn MultiOptional>| -> ::std::sync::Arc<
            dyn sink::ResponseWriter,
        > {
            ::std::sync::Arc::new(
                ::capwrap::Facet::new(wrapped)
                    .with::<dyn sink::ResponseWriter>()
                    .with::<dyn sink::Flusher>(),
            )
        },
        |wrapped: ::std::sync::Arc<dyn MultiOptional>| -> ::std::sync::Arc<
            dyn sink::ResponseWriter,
        > {
            ::std::sync::Arc::new(
                ::capwrap::Facet::new(wrapped)
                    .with::<dyn sink::ResponseWriter>()
                    .with::<dyn sink::Hijacker>()
                    .with::<dyn sink::Flusher>(),
            )
        },
    ];
    facets[i](wrapped)
}
pub trait MultiRequireRequired: sink::ResponseWriter + sink::Hijacker {}
impl<T: sink::ResponseWriter + sink::Hijacker + ?Sized> MultiRequireRequired for T {}
#[allow(non_snake_case)]
pub fn MultiRequireWrapper(
    value: ::std::sync::Arc<dyn MultiRequireRequired>,
    wrap: impl FnOnce(
        ::std::sync::Arc<dyn MultiRequireRequired>,
    ) -> ::std::sync::Arc<dyn MultiRequire>,
) -> ::std::sync::Arc<dyn MultiRequireRequired> {
    let wrapped = wrap(::std::sync::Arc::clone(&value));
    const I0: usize = 1 << 0;
    let mut i: usize = 0;
    if ::capwrap::probe::<dyn sink::Flusher, _>(&*value) {
        i |= I0;
    }
    let facets: [fn(
        ::std::sync::Arc<dyn MultiRequire>,
    ) -> ::std::sync::Arc<dyn MultiRequireRequired>; 2] = [
        |wrapped: ::std::sync::Arc<dyn MultiRequire>| -> ::std::sync::Arc<
            dyn MultiRequireRequired,
        > {
            ::std::sync::Arc::new(
                ::capwrap::Facet::new(wrapped)
                    .with::<dyn sink::ResponseWriter>()
                    .with::<dyn sink::Hijacker>(),
            )
        },
        |wrapped: ::std::sync::Arc<dyn MultiRequire>| -> ::std::sync::Arc<
            dyn MultiRequireRequired,
        > {
            ::std::sync::Arc::new(
                ::capwrap::Facet::new(wrapped)
                    .with::<dyn sink::ResponseWriter>()
                    .with::<dyn sink::Hijacker>()
                    .with::<dyn sink::Flusher>(),
            )
        },
    ];
    facets[i](wrapped)
}
#[allow(non_snake_case, unused_variables)]
pub fn PassThrough(
    value: ::std::sync::Arc<dyn sink::ResponseWriter>,
    wrap: impl FnOnce(
        ::std::sync::Arc<dyn sink::ResponseWriter>,
    ) -> ::std::sync::Arc<dyn Plain>,
) -> ::std::sync::Arc<dyn sink::ResponseWriter> {
    value
}
use crate::sink;
