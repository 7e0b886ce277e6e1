//! capwrap:namespace testdata

use crate::http;

// Hijacker is declared elsewhere in this module.

// capwrap:target
pub trait OtherFileDeclare:
    // capwrap:require
    http::ResponseWriter
    + Hijacker
{
}
