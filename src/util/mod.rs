//! Shared helpers that are not part of the pipeline itself.

pub mod testing;
