//! Handlers without a namespace marker.

use crate::http;

// capwrap:target
pub trait Orphan:
    // capwrap:require
    http::ResponseWriter
{
}
