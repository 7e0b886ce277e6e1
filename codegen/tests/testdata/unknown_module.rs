//! capwrap:namespace testdata

use crate::http;

// capwrap:target
pub trait UnknownModule:
    // capwrap:require
    http::ResponseWriter
    + nethttp::Hijacker
{
}
