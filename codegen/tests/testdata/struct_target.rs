//! capwrap:namespace testdata

// capwrap:target
pub struct NotAnAggregate {
    inner: u32,
}
