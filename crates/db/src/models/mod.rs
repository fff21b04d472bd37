//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` DTOs for the operations that mutate it

pub mod complex;
pub mod generation;
pub mod job;
pub mod room_type;
pub mod status;
pub mod story_variant;
pub mod usage;
pub mod user;
