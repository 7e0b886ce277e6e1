//! capwrap:namespace testdata

use crate::http;

// capwrap:target
pub trait MultiRequire:
    // capwrap:require
    http::ResponseWriter
    // capwrap:require
    + http::Hijacker
    + http::Flusher
{
}
