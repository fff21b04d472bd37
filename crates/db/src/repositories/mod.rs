//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod complex_repo;
pub mod generation_repo;
pub mod job_repo;
pub mod room_type_repo;
pub mod story_variant_repo;
pub mod usage_repo;
pub mod user_repo;

pub use complex_repo::ComplexRepo;
pub use generation_repo::GenerationRepo;
pub use job_repo::JobRepo;
pub use room_type_repo::RoomTypeRepo;
pub use story_variant_repo::StoryVariantRepo;
pub use usage_repo::UsageRepo;
pub use user_repo::UserRepo;
