//! Track list filtering.
//!
//! Both the JSON list endpoint and the HTML list page build a [`TrackFilter`]
//! from their query string. Each recognised parameter maps onto one named
//! clause; the repository layer turns the clauses into SQL.
//!
//! | param            | clause                                            |
//! |------------------|---------------------------------------------------|
//! | `artist`         | case-insensitive substring on artist name         |
//! | `album_type`     | case-insensitive exact match                      |
//! | `genre`          | case-insensitive substring on the genre text      |
//! | `explicit`       | `true` / `false` only, anything else is ignored   |
//! | `min_popularity` | track popularity lower bound, inclusive           |
//! | `min_followers`  | artist followers lower bound, inclusive           |
//! | `year`           | release year equality                             |
//! | `from_date`      | release date lower bound, inclusive               |
//! | `to_date`        | release date upper bound, inclusive               |
//! | search key       | substring OR over track, artist, album and genres |

use std::collections::HashMap;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::error::CoreError;

/// Query-string key carrying free-text search on the JSON API.
pub const API_SEARCH_PARAM: &str = "search";

/// Query-string key carrying free-text search on the HTML list page.
pub const WEB_SEARCH_PARAM: &str = "q";

/// Query-string key selecting the API list ordering.
pub const ORDERING_PARAM: &str = "ordering";

/// Date format accepted by date parameters.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ---------------------------------------------------------------------------
// Filter
// ---------------------------------------------------------------------------

/// Conjunction of optional clauses over the track set.
///
/// `None` means "no constraint"; it never means "match empty".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackFilter {
    pub search: Option<String>,
    pub artist: Option<String>,
    pub album_type: Option<String>,
    pub genre: Option<String>,
    pub explicit: Option<bool>,
    pub min_popularity: Option<i32>,
    pub min_followers: Option<i64>,
    pub year: Option<i32>,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
}

impl TrackFilter {
    /// Build a filter from raw query parameters.
    ///
    /// `search_param` names the free-text key (`search` for the API, `q` for
    /// the web list). Unknown keys are ignored. Malformed numbers or dates are
    /// a [`CoreError::Validation`] naming the offending parameter.
    pub fn from_params(
        params: &HashMap<String, String>,
        search_param: &str,
    ) -> Result<Self, CoreError> {
        Ok(Self {
            search: text_param(params, search_param),
            artist: text_param(params, "artist"),
            album_type: text_param(params, "album_type"),
            genre: text_param(params, "genre"),
            explicit: text_param(params, "explicit").and_then(|v| parse_explicit(&v)),
            min_popularity: number_param(params, "min_popularity")?,
            min_followers: number_param(params, "min_followers")?,
            year: number_param(params, "year")?,
            from_date: date_param(params, "from_date")?,
            to_date: date_param(params, "to_date")?,
        })
    }

    /// True when no clause is active.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Only `true` / `false` (any case) select a value; anything else is ignored.
pub fn parse_explicit(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Parameter helpers
// ---------------------------------------------------------------------------

/// Trimmed text value; blank counts as absent.
pub fn text_param(params: &HashMap<String, String>, key: &str) -> Option<String> {
    params
        .get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Parse an optional numeric parameter, rejecting non-numeric input.
pub fn number_param<T: FromStr>(
    params: &HashMap<String, String>,
    key: &str,
) -> Result<Option<T>, CoreError> {
    text_param(params, key)
        .map(|raw| {
            raw.parse::<T>().map_err(|_| {
                CoreError::Validation(format!("{key} must be an integer (got '{raw}')"))
            })
        })
        .transpose()
}

/// Parse an optional `YYYY-MM-DD` parameter.
pub fn date_param(
    params: &HashMap<String, String>,
    key: &str,
) -> Result<Option<NaiveDate>, CoreError> {
    text_param(params, key)
        .map(|raw| {
            NaiveDate::parse_from_str(&raw, DATE_FORMAT).map_err(|_| {
                CoreError::Validation(format!("{key} must be a date in YYYY-MM-DD format (got '{raw}')"))
            })
        })
        .transpose()
}

/// Escape `LIKE` metacharacters so user text matches literally.
///
/// Uses backslash, PostgreSQL's default `LIKE` escape character.
pub fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Wrap user text as a `%...%` substring pattern.
pub fn contains_pattern(value: &str) -> String {
    format!("%{}%", escape_like(value))
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

/// Column a track list may be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    TrackPopularity,
    AlbumReleaseDate,
    ArtistFollowers,
    TrackDurationMin,
}

impl SortField {
    pub fn column(self) -> &'static str {
        match self {
            SortField::TrackPopularity => "track_popularity",
            SortField::AlbumReleaseDate => "album_release_date",
            SortField::ArtistFollowers => "artist_followers",
            SortField::TrackDurationMin => "track_duration_min",
        }
    }

    fn from_column(name: &str) -> Option<Self> {
        match name {
            "track_popularity" => Some(SortField::TrackPopularity),
            "album_release_date" => Some(SortField::AlbumReleaseDate),
            "artist_followers" => Some(SortField::ArtistFollowers),
            "track_duration_min" => Some(SortField::TrackDurationMin),
            _ => None,
        }
    }
}

/// One `ORDER BY` term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub field: SortField,
    pub descending: bool,
}

/// Parse an `ordering` value such as `-track_popularity,album_release_date`.
///
/// Unknown fields are dropped. When nothing usable remains the default
/// (`-track_popularity`) applies.
pub fn parse_ordering(raw: Option<&str>) -> Vec<SortKey> {
    let keys: Vec<SortKey> = raw
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter_map(|term| {
            let (descending, name) = match term.strip_prefix('-') {
                Some(rest) => (true, rest),
                None => (false, term),
            };
            SortField::from_column(name).map(|field| SortKey { field, descending })
        })
        .collect();

    if keys.is_empty() {
        default_ordering()
    } else {
        keys
    }
}

/// Most popular first.
pub fn default_ordering() -> Vec<SortKey> {
    vec![SortKey {
        field: SortField::TrackPopularity,
        descending: true,
    }]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
