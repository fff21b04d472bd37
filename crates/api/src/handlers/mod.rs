//! HTTP handlers, grouped by resource.

pub mod files;
pub mod generations;
pub mod stories;
