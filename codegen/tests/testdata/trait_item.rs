//! capwrap:namespace testdata

use crate::http;

// capwrap:target
pub trait WithMethod:
    // capwrap:require
    http::ResponseWriter
{
    fn status(&self) -> u16;
}
