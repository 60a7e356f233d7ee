//! Parameters and limits for the reporting endpoints.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::CoreError;
use crate::filter::{number_param, text_param};

/// Rows returned by the top-artists summary.
pub const TOP_ARTISTS_LIMIT: i64 = 20;

/// Genres returned by the top-genres summary when `top` is absent.
pub const DEFAULT_TOP_GENRES: usize = 20;

/// Popularity threshold for clean hits when `min_popularity` is absent.
pub const DEFAULT_CLEAN_HITS_MIN_POPULARITY: i32 = 70;

/// Tracks listed in a clean-hits response.
pub const CLEAN_HITS_TOP_LIMIT: i64 = 25;

/// Artists shown in the list page sidebar.
pub const UI_TOP_ARTISTS: i64 = 8;

/// Genres shown in the list page sidebar.
pub const UI_TOP_GENRES: usize = 10;

/// Fixed popularity threshold of the list page clean-hits box.
pub const UI_CLEAN_HITS_MIN_POPULARITY: i32 = 80;

/// Artist names offered in the list page dropdown.
pub const UI_ARTIST_OPTIONS: i64 = 300;

/// `?top=` for the genre summary. Negative values select nothing.
pub fn parse_top_genres(params: &HashMap<String, String>) -> Result<usize, CoreError> {
    let top: Option<i64> = number_param(params, "top")?;
    Ok(top.map_or(DEFAULT_TOP_GENRES, |n| usize::try_from(n).unwrap_or(0)))
}

/// Filters accepted by the clean-hits report, echoed back in its response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleanHitsFilter {
    pub min_popularity: i32,
    pub genre: Option<String>,
    pub year_from: Option<i32>,
    pub year_to: Option<i32>,
    pub album_type: Option<String>,
}

impl CleanHitsFilter {
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, CoreError> {
        Ok(Self {
            min_popularity: number_param(params, "min_popularity")?
                .unwrap_or(DEFAULT_CLEAN_HITS_MIN_POPULARITY),
            genre: text_param(params, "genre"),
            year_from: number_param(params, "year_from")?,
            year_to: number_param(params, "year_to")?,
            album_type: text_param(params, "album_type"),
        })
    }

    /// Only the popularity threshold, as used by the list page summary box.
    pub fn with_min_popularity(min_popularity: i32) -> Self {
        Self {
            min_popularity,
            genre: None,
            year_from: None,
            year_to: None,
            album_type: None,
        }
    }
}

/// `?artist=` for the artist/album-type breakdown. Required and non-blank.
pub fn require_artist(params: &HashMap<String, String>) -> Result<String, CoreError> {
    text_param(params, "artist")
        .ok_or_else(|| CoreError::Validation("Missing required param: artist".to_string()))
}
