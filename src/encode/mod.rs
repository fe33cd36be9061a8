//! Frame output: PNG encoding and frame sinks.

pub mod png;
pub mod sink;
