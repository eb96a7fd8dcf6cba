//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&DbPool` as the first argument.

pub mod lesson_repo;
pub mod profile_repo;

pub use lesson_repo::LessonRepo;
pub use profile_repo::ProfileRepo;
