//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` struct matching the database row
//! - `Deserialize` input DTOs for writes, or report row types for reads

pub mod insights;
pub mod track;
