//! capwrap:namespace testdata

use crate::http;

// capwrap:target
pub trait MultiOptional:
    // capwrap:require
    http::ResponseWriter
    + http::Hijacker
    + http::Flusher
{
}
