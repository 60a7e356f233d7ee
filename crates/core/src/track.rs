//! Track field rules.
//!
//! A track row carries denormalized artist and album attributes, so every
//! numeric range, the album-type vocabulary and the text-length limits live
//! here. The `check_*` functions record problems into a [`FieldErrors`]
//! instead of failing fast, so a form or API payload reports every bad field
//! at once.

use chrono::NaiveDate;

use crate::error::{CoreError, FieldErrors};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Lowest popularity score (track or artist).
pub const POPULARITY_MIN: i32 = 0;

/// Highest popularity score (track or artist).
pub const POPULARITY_MAX: i32 = 100;

/// Shortest accepted track duration, in minutes.
pub const DURATION_MIN_MINUTES: f64 = 0.01;

/// Longest accepted track duration, in minutes.
pub const DURATION_MAX_MINUTES: f64 = 600.0;

/// Maximum length of the comma-separated genre text.
pub const MAX_GENRES_LEN: usize = 2000;

/// Maximum length of external identifiers (`track_id`, `album_id`).
pub const MAX_ID_LEN: usize = 80;

/// Maximum length of track, artist and album names.
pub const MAX_NAME_LEN: usize = 300;

/// Maximum length of the stored album type.
pub const MAX_ALBUM_TYPE_LEN: usize = 50;

// ---------------------------------------------------------------------------
// Album type
// ---------------------------------------------------------------------------

/// Closed set of album kinds a track may belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlbumType {
    Album,
    Single,
    Compilation,
}

impl AlbumType {
    /// Every album type, in display order.
    pub const ALL: [AlbumType; 3] = [AlbumType::Album, AlbumType::Single, AlbumType::Compilation];

    /// Stored representation.
    pub fn as_str(self) -> &'static str {
        match self {
            AlbumType::Album => "album",
            AlbumType::Single => "single",
            AlbumType::Compilation => "compilation",
        }
    }

    /// Parse the stored representation. Matching is exact, as stored values are.
    pub fn from_str_value(value: &str) -> Result<Self, CoreError> {
        match value {
            "album" => Ok(AlbumType::Album),
            "single" => Ok(AlbumType::Single),
            "compilation" => Ok(AlbumType::Compilation),
            other => Err(CoreError::Validation(format!(
                "Unknown album type: '{other}'. Valid types: {}",
                Self::ALL.map(AlbumType::as_str).join(", ")
            ))),
        }
    }
}

impl std::fmt::Display for AlbumType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Field checks
// ---------------------------------------------------------------------------

/// Popularity must lie in `POPULARITY_MIN..=POPULARITY_MAX`.
pub fn check_popularity(errors: &mut FieldErrors, field: &str, value: i32) {
    if !(POPULARITY_MIN..=POPULARITY_MAX).contains(&value) {
        errors.add(
            field,
            format!("{field} must be between {POPULARITY_MIN} and {POPULARITY_MAX}."),
        );
    }
}

/// Track numbers and album track totals start at 1.
pub fn check_at_least_one(errors: &mut FieldErrors, field: &str, value: i32) {
    if value < 1 {
        errors.add(field, format!("{field} must be at least 1."));
    }
}

pub fn check_followers(errors: &mut FieldErrors, value: i64) {
    if value < 0 {
        errors.add("artist_followers", "artist_followers cannot be negative.");
    }
}

/// Duration in minutes: not NaN, within `DURATION_MIN_MINUTES..=DURATION_MAX_MINUTES`.
pub fn check_duration(errors: &mut FieldErrors, value: f64) {
    if value.is_nan() {
        errors.add("track_duration_min", "Duration is invalid (NaN).");
    } else if !(DURATION_MIN_MINUTES..=DURATION_MAX_MINUTES).contains(&value) {
        errors.add(
            "track_duration_min",
            format!(
                "track_duration_min must be between {DURATION_MIN_MINUTES} and {DURATION_MAX_MINUTES}."
            ),
        );
    }
}

/// Release dates may not lie after `today`.
pub fn check_release_date(errors: &mut FieldErrors, date: NaiveDate, today: NaiveDate) {
    if date > today {
        errors.add("album_release_date", "Release date cannot be in the future.");
    }
}

pub fn check_genres(errors: &mut FieldErrors, genres: Option<&str>) {
    if genres.is_some_and(|g| g.chars().count() > MAX_GENRES_LEN) {
        errors.add("artist_genres", "Genres text is too long.");
    }
}

pub fn check_album_type(errors: &mut FieldErrors, value: &str) {
    if AlbumType::from_str_value(value).is_err() {
        errors.add(
            "album_type",
            format!("'{value}' is not a valid album type."),
        );
    }
}

/// Required text: non-blank and at most `max` characters.
pub fn check_required_text(errors: &mut FieldErrors, field: &str, value: &str, max: usize) {
    if value.trim().is_empty() {
        errors.add(field, "This field is required.");
    } else if value.chars().count() > max {
        errors.add(field, format!("Ensure this value has at most {max} characters."));
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
