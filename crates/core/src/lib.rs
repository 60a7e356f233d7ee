//! Domain logic for the track catalog.
//!
//! Everything here is pure: no database or HTTP dependencies, so the
//! repository layer, the API and the bulk loader can all share it.

pub mod error;
pub mod filter;
pub mod genre;
pub mod insights;
pub mod pagination;
pub mod track;
pub mod types;
