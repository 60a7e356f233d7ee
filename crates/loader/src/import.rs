//! CSV rows to `tracks`: header mapping, row coercion and the batched
//! full-replace import.

use std::collections::HashMap;
use std::path::Path;

use sqlx::PgPool;
use tracklist_db::models::track::TrackInput;
use tracklist_db::repositories::TrackRepo;

use crate::coerce::{parse_bool, parse_date, parse_float, parse_int, parse_int32};
use crate::csv::parse_records;

/// Rows per multi-row INSERT.
pub const DEFAULT_BATCH_SIZE: usize = 500;

/// Columns that must appear in the header. `artist_genres` is optional.
pub const REQUIRED_COLUMNS: [&str; 14] = [
    "track_id",
    "track_name",
    "track_number",
    "track_popularity",
    "explicit",
    "artist_name",
    "artist_popularity",
    "artist_followers",
    "album_id",
    "album_name",
    "album_release_date",
    "album_total_tracks",
    "album_type",
    "track_duration_min",
];

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV has no header row")]
    Empty,

    #[error("CSV header is missing column '{0}'")]
    MissingColumn(&'static str),

    #[error("row {row}: invalid album_release_date '{value}' (expected YYYY-MM-DD)")]
    InvalidDate { row: usize, value: String },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Outcome of one import run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    /// Data rows read from the file.
    pub rows_read: u64,
    /// Rows that reached the table.
    pub inserted: u64,
    /// Rows dropped because their `track_id` was already present.
    pub skipped_duplicates: u64,
    /// Rows removed before loading.
    pub replaced: u64,
}

/// Column name to position, built from the header row.
struct Columns(HashMap<String, usize>);

impl Columns {
    fn from_header(header: &[String]) -> Result<Self, LoadError> {
        let map: HashMap<String, usize> = header
            .iter()
            .enumerate()
            .map(|(i, name)| (name.trim().trim_start_matches('\u{feff}').to_string(), i))
            .collect();

        if let Some(missing) = REQUIRED_COLUMNS.iter().find(|c| !map.contains_key(**c)) {
            return Err(LoadError::MissingColumn(*missing));
        }
        Ok(Self(map))
    }

    /// Cell for `column`, empty when the column or the cell is absent.
    fn get<'r>(&self, record: &'r [String], column: &str) -> &'r str {
        self.0
            .get(column)
            .and_then(|&i| record.get(i))
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// Parse CSV text into track inputs.
///
/// `row` numbers in errors are 1-based data rows, excluding the header.
pub fn parse_tracks(text: &str) -> Result<Vec<TrackInput>, LoadError> {
    let mut records = parse_records(text).into_iter();
    let header = records.next().ok_or(LoadError::Empty)?;
    let columns = Columns::from_header(&header)?;

    records
        .enumerate()
        .map(|(i, record)| track_from_record(&columns, &record, i + 1))
        .collect()
}

fn track_from_record(columns: &Columns, record: &[String], row: usize) -> Result<TrackInput, LoadError> {
    let cell = |name: &str| columns.get(record, name);

    let raw_date = cell("album_release_date");
    let album_release_date = parse_date(raw_date).map_err(|_| LoadError::InvalidDate {
        row,
        value: raw_date.to_string(),
    })?;

    let genres = cell("artist_genres").trim();

    Ok(TrackInput {
        track_id: cell("track_id").to_string(),
        track_name: cell("track_name").to_string(),
        track_number: parse_int32(cell("track_number")),
        track_popularity: parse_int32(cell("track_popularity")),
        explicit: parse_bool(cell("explicit")),
        artist_name: cell("artist_name").to_string(),
        artist_popularity: parse_int32(cell("artist_popularity")),
        artist_followers: parse_int(cell("artist_followers")),
        artist_genres: (!genres.is_empty()).then(|| genres.to_string()),
        album_id: cell("album_id").to_string(),
        album_name: cell("album_name").to_string(),
        album_release_date,
        album_total_tracks: parse_int32(cell("album_total_tracks")),
        album_type: cell("album_type").to_string(),
        track_duration_min: parse_float(cell("track_duration_min")),
    })
}

/// Read and parse a CSV file.
pub fn read_tracks(path: &Path) -> Result<Vec<TrackInput>, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_tracks(&text)
}

/// Replace the whole table with `rows`, inserting `batch_size` rows per
/// statement and skipping duplicate `track_id`s.
///
/// `batch_size` is clamped to `1..=TrackRepo::MAX_INSERT_BATCH`. Runs in one
/// transaction: on any error the previous contents survive.
pub async fn replace_all(
    pool: &PgPool,
    rows: &[TrackInput],
    batch_size: usize,
) -> Result<ImportSummary, LoadError> {
    let batch_size = effective_batch_size(batch_size);
    let mut tx = pool.begin().await?;

    let replaced = TrackRepo::delete_all(&mut *tx).await?;
    tracing::debug!(replaced, "Cleared existing tracks");

    let mut inserted = 0u64;
    for (n, batch) in rows.chunks(batch_size).enumerate() {
        let count = TrackRepo::insert_batch(&mut *tx, batch).await?;
        tracing::debug!(batch = n + 1, rows = batch.len(), inserted = count, "Inserted batch");
        inserted += count;
    }

    tx.commit().await?;

    let rows_read = rows.len() as u64;
    Ok(ImportSummary {
        rows_read,
        inserted,
        skipped_duplicates: rows_read - inserted,
        replaced,
    })
}

fn effective_batch_size(requested: usize) -> usize {
    let size = requested.clamp(1, TrackRepo::MAX_INSERT_BATCH);
    if size != requested {
        tracing::warn!(requested, used = size, "Batch size out of range, clamped");
    }
    size
}

/// Parse `path` and load it with [`replace_all`].
pub async fn import_file(
    pool: &PgPool,
    path: &Path,
    batch_size: usize,
) -> Result<ImportSummary, LoadError> {
    let rows = read_tracks(path)?;
    tracing::info!(path = %path.display(), rows = rows.len(), "Parsed CSV");
    replace_all(pool, &rows, batch_size).await
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::NaiveDate;

    use super::*;

    const HEADER: &str = "track_id,track_name,track_number,track_popularity,explicit,\
artist_name,artist_popularity,artist_followers,artist_genres,album_id,album_name,\
album_release_date,album_total_tracks,album_type,track_duration_min";

    #[test]
    fn coerces_every_column() {
        let csv = format!(
            "{HEADER}\nT1,\"Song, Part 2\",3.0,90,Yes,Drake,88,1.2e6, pop , A1,Album,2020-01-02,12,album,3.5\n"
        );
        let rows = parse_tracks(&csv).unwrap();
        assert_eq!(rows.len(), 1);

        let t = &rows[0];
        assert_eq!(t.track_id, "T1");
        assert_eq!(t.track_name, "Song, Part 2");
        assert_eq!(t.track_number, 3);
        assert_eq!(t.track_popularity, 90);
        assert!(t.explicit);
        assert_eq!(t.artist_followers, 1_200_000);
        assert_eq!(t.artist_genres.as_deref(), Some("pop"));
        assert_eq!(t.album_release_date, NaiveDate::from_ymd_opt(2020, 1, 2).unwrap());
        assert_eq!(t.track_duration_min, 3.5);
    }

    #[test]
    fn bad_numbers_default_and_blank_genres_are_none() {
        let csv = format!("{HEADER}\nT1,S,x,,no,A,?,-,  ,A1,Al,2020-01-02,n/a,single,long\n");
        let t = &parse_tracks(&csv).unwrap()[0];
        assert_eq!(t.track_number, 0);
        assert_eq!(t.track_popularity, 0);
        assert!(!t.explicit);
        assert_eq!(t.artist_popularity, 0);
        assert_eq!(t.artist_followers, 0);
        assert_eq!(t.artist_genres, None);
        assert_eq!(t.album_total_tracks, 0);
        assert_eq!(t.track_duration_min, 0.0);
    }

    #[test]
    fn genres_column_is_optional() {
        let header = HEADER.replace("artist_genres,", "");
        let csv = format!("{header}\nT1,S,1,50,false,A,50,10,A1,Al,2020-01-02,1,album,2.0\n");
        let t = &parse_tracks(&csv).unwrap()[0];
        assert_eq!(t.artist_genres, None);
        assert_eq!(t.album_id, "A1");
    }

    #[test]
    fn bad_date_names_the_row() {
        let csv = format!(
            "{HEADER}\nT1,S,1,50,false,A,50,10,,A1,Al,2020-01-02,1,album,2.0\n\
             T2,S,1,50,false,A,50,10,,A1,Al,02/01/2020,1,album,2.0\n"
        );
        let err = parse_tracks(&csv).unwrap_err();
        assert_matches!(err, LoadError::InvalidDate { row: 2, ref value } if value == "02/01/2020");
    }

    #[test]
    fn batch_size_stays_within_bind_limit() {
        assert_eq!(effective_batch_size(0), 1);
        assert_eq!(effective_batch_size(DEFAULT_BATCH_SIZE), DEFAULT_BATCH_SIZE);
        assert_eq!(effective_batch_size(usize::MAX), TrackRepo::MAX_INSERT_BATCH);
        assert!(TrackRepo::MAX_INSERT_BATCH * TrackRepo::INSERT_BINDS_PER_ROW <= u16::MAX as usize);
    }

    #[test]
    fn header_problems() {
        assert_matches!(parse_tracks(""), Err(LoadError::Empty));
        assert_matches!(
            parse_tracks("track_id,track_name\nT1,S\n"),
            Err(LoadError::MissingColumn("track_number"))
        );
    }

    #[test]
    fn header_tolerates_bom_and_reordering() {
        let mut columns: Vec<&str> = HEADER.split(',').collect();
        columns.reverse();
        let header = format!("\u{feff}{}", columns.join(","));
        let values = "2.0,album,1,2020-01-02,Al,A1,,10,50,A,false,50,1,S,T1";
        let t = &parse_tracks(&format!("{header}\n{values}\n")).unwrap()[0];
        assert_eq!(t.track_id, "T1");
        assert_eq!(t.track_duration_min, 2.0);
    }
}
