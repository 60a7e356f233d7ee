//! One-shot CSV import into the `tracks` table.
//!
//! The import is a full replace: existing rows are deleted and the file is
//! loaded in fixed-size batches, all inside one transaction.

pub mod coerce;
pub mod csv;
pub mod import;

pub use import::{import_file, parse_tracks, replace_all, ImportSummary, LoadError, DEFAULT_BATCH_SIZE};
