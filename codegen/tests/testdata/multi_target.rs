//! capwrap:namespace testdata

use crate::http;

// capwrap:target
pub trait MultiTarget1:
    // capwrap:require
    http::ResponseWriter
    + http::Hijacker
{
}

/// Flushing variant.
///
/// capwrap:target
pub trait MultiTarget2:
    // capwrap:require
    http::ResponseWriter
    + http::Flusher
{
}
