//! capwrap:namespace testdata

use crate::http;

// capwrap:target func:"FuncNameWrapFunc"
pub trait FuncName:
    // capwrap:require
    http::ResponseWriter
    + http::Hijacker
{
}
