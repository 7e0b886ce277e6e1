//! capwrap:namespace testdata

use crate::http;

// capwrap:target
pub trait Normal:
    // capwrap:require
    http::ResponseWriter
    + http::Hijacker
{
}
