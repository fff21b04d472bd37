//! Domain logic for the story generation pipeline.
//!
//! Everything in this crate is either pure (renderer, fallback copywriter,
//! quota math) or touches only the local filesystem (artifact store).
//! Network and database concerns live in the sibling crates.

pub mod artifacts;
pub mod copywriter;
pub mod error;
pub mod lines;
pub mod quota;
pub mod render;
pub mod template;
pub mod types;
