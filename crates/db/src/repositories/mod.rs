//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that accept
//! `&PgPool` (or any `PgExecutor`, for the bulk paths) as the first argument.

pub mod insights_repo;
pub mod track_repo;

pub use insights_repo::InsightsRepo;
pub use track_repo::TrackRepo;
