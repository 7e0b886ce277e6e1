//! capwrap:namespace testdata

use crate::http;

// capwrap:target
pub trait NoRequired: http::ResponseWriter + http::Hijacker {}
