//! GigaChat integration: AI copy generation with a fallback guarantee.
//!
//! [`GigaChatClient::generate_variants`] never fails — any auth, network,
//! or contract violation degrades to the deterministic local copywriter in
//! `storyforge_core::copywriter`.

pub mod api;
pub mod client;
pub mod config;
pub mod token;

pub use client::{ContentGenerator, GigaChatClient, GigaChatError};
pub use config::{Credentials, GigaChatConfig};
