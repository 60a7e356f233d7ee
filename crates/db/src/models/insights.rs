//! Row types produced by the reporting queries.

use serde::Serialize;
use sqlx::FromRow;
use tracklist_core::insights::CleanHitsFilter;

use crate::models::track::Track;

/// One artist in the top-artists summary.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TopArtist {
    pub artist_name: String,
    pub track_count: i64,
    pub avg_track_popularity: Option<f64>,
    pub max_track_popularity: Option<i32>,
    /// Average follower count across the artist's tracks.
    pub followers: Option<f64>,
}

/// One release year in the releases-by-year summary.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct YearReleases {
    pub year: i32,
    pub track_count: i64,
    pub avg_track_popularity: Option<f64>,
    /// Filled in from a separate per-year explicit count.
    #[sqlx(default)]
    pub explicit_count: i64,
}

/// Aggregates over the tracks matching a clean-hits filter.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CleanHitsSummary {
    pub results: i64,
    pub avg_popularity: Option<f64>,
    pub max_popularity: Option<i32>,
    pub min_duration: Option<f64>,
    pub max_duration: Option<f64>,
}

/// Full clean-hits response: echoed filters, summary and leading tracks.
#[derive(Debug, Clone, Serialize)]
pub struct CleanHitsReport {
    pub filters: CleanHitsFilter,
    pub summary: CleanHitsSummary,
    pub top_tracks: Vec<Track>,
}

/// One (artist, album type) group of the breakdown report.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ArtistAlbumTypeBreakdown {
    pub artist_name: String,
    pub album_type: String,
    pub track_count: i64,
    pub avg_track_popularity: Option<f64>,
}

/// Artist track count shown in the list page sidebar.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ArtistTrackCount {
    pub artist_name: String,
    pub track_count: i64,
    pub avg_popularity: Option<f64>,
}
