//! capwrap:namespace testdata

use crate::http;

pub trait NotTargeted:
    // capwrap:require
    http::ResponseWriter
    + http::Hijacker
{
}
