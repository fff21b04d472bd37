//! Background worker that turns queued generation requests into six
//! rendered story variants.

pub mod config;
pub mod worker;

pub use config::WorkerConfig;
pub use worker::GenerationWorker;
