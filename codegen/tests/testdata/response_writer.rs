//! capwrap:namespace handlers

use crate::net::http as sink;
use crate::stats;

// capwrap:target func:"ResponseWriterWrapper"
pub trait ResponseWriter:
    // capwrap:require
    sink::ResponseWriter
    + sink::Hijacker
    + stats::CloseNotifier
    + sink::Flusher
{
}
