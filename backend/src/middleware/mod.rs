//! Actix middleware wrapped around the catalogue API.

pub mod trace;

pub use trace::{Trace, TraceMiddleware};
