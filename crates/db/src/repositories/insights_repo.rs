//! Read-only aggregate queries over `tracks`.
//!
//! Every report recomputes from the current table contents; nothing is cached.

use std::collections::HashMap;

use sqlx::{PgPool, Postgres, QueryBuilder};
use tracklist_core::genre::{GenreCount, GenreTally};
use tracklist_core::insights::{CleanHitsFilter, CLEAN_HITS_TOP_LIMIT, TOP_ARTISTS_LIMIT};

use crate::filter::{TrackPredicate, COL_ARTIST_NAME};
use crate::models::insights::{
    ArtistAlbumTypeBreakdown, ArtistTrackCount, CleanHitsReport, CleanHitsSummary, TopArtist,
    YearReleases,
};
use crate::models::track::Track;
use crate::repositories::track_repo::{TrackRepo, COLUMNS};

/// Provides reporting queries.
pub struct InsightsRepo;

impl InsightsRepo {
    /// Artists by track count, then by average followers; at most 20.
    pub async fn top_artists(pool: &PgPool) -> Result<Vec<TopArtist>, sqlx::Error> {
        sqlx::query_as::<_, TopArtist>(
            "SELECT artist_name, \
                    COUNT(*) AS track_count, \
                    AVG(track_popularity)::float8 AS avg_track_popularity, \
                    MAX(track_popularity) AS max_track_popularity, \
                    AVG(artist_followers)::float8 AS followers \
             FROM tracks \
             GROUP BY artist_name \
             ORDER BY track_count DESC, followers DESC, artist_name \
             LIMIT $1",
        )
        .bind(TOP_ARTISTS_LIMIT)
        .fetch_all(pool)
        .await
    }

    /// Track counts and average popularity per release year, oldest first,
    /// with the explicit-track count per year merged in from a second query.
    pub async fn releases_by_year(pool: &PgPool) -> Result<Vec<YearReleases>, sqlx::Error> {
        let mut rows = sqlx::query_as::<_, YearReleases>(
            "SELECT EXTRACT(YEAR FROM album_release_date)::int AS year, \
                    COUNT(*) AS track_count, \
                    AVG(track_popularity)::float8 AS avg_track_popularity \
             FROM tracks \
             GROUP BY year \
             ORDER BY year",
        )
        .fetch_all(pool)
        .await?;

        let explicit_counts: HashMap<i32, i64> = sqlx::query_as::<_, (i32, i64)>(
            "SELECT EXTRACT(YEAR FROM album_release_date)::int AS year, COUNT(*) \
             FROM tracks \
             WHERE explicit \
             GROUP BY year",
        )
        .fetch_all(pool)
        .await?
        .into_iter()
        .collect();

        for row in &mut rows {
            row.explicit_count = explicit_counts.get(&row.year).copied().unwrap_or(0);
        }
        Ok(rows)
    }

    /// Tally of genre tokens across all tracks, the `top` most frequent.
    pub async fn top_genres(pool: &PgPool, top: usize) -> Result<Vec<GenreCount>, sqlx::Error> {
        let raws = TrackRepo::genre_strings(pool).await?;
        let tally: GenreTally = raws.iter().map(String::as_str).collect();
        Ok(tally.top(top))
    }

    /// Summary aggregates for the tracks matching a clean-hits filter.
    pub async fn clean_hits_summary(
        pool: &PgPool,
        filter: &CleanHitsFilter,
    ) -> Result<CleanHitsSummary, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT COUNT(*) AS results, \
                    AVG(track_popularity)::float8 AS avg_popularity, \
                    MAX(track_popularity) AS max_popularity, \
                    MIN(track_duration_min) AS min_duration, \
                    MAX(track_duration_min) AS max_duration \
             FROM tracks",
        );
        TrackPredicate::new(&mut qb).clean_hits(filter);
        qb.build_query_as::<CleanHitsSummary>().fetch_one(pool).await
    }

    /// Filters, summary and the 25 most popular matching tracks.
    pub async fn clean_hits(
        pool: &PgPool,
        filter: &CleanHitsFilter,
    ) -> Result<CleanHitsReport, sqlx::Error> {
        let summary = Self::clean_hits_summary(pool, filter).await?;

        let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT {COLUMNS} FROM tracks"));
        TrackPredicate::new(&mut qb).clean_hits(filter);
        qb.push(" ORDER BY track_popularity DESC, artist_followers DESC, id LIMIT ")
            .push_bind(CLEAN_HITS_TOP_LIMIT);
        let top_tracks = qb.build_query_as::<Track>().fetch_all(pool).await?;

        Ok(CleanHitsReport {
            filters: filter.clone(),
            summary,
            top_tracks,
        })
    }

    /// Track count and average popularity per (artist, album type) for artists
    /// whose name contains `artist`, case-insensitively.
    pub async fn artist_album_type_breakdown(
        pool: &PgPool,
        artist: &str,
    ) -> Result<Vec<ArtistAlbumTypeBreakdown>, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT artist_name, album_type, \
                    COUNT(*) AS track_count, \
                    AVG(track_popularity)::float8 AS avg_track_popularity \
             FROM tracks",
        );
        TrackPredicate::new(&mut qb).contains(COL_ARTIST_NAME, artist);
        qb.push(" GROUP BY artist_name, album_type ORDER BY artist_name, album_type");
        qb.build_query_as::<ArtistAlbumTypeBreakdown>()
            .fetch_all(pool)
            .await
    }

    /// Artists with the most tracks, for the list page sidebar.
    pub async fn artist_track_counts(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<ArtistTrackCount>, sqlx::Error> {
        sqlx::query_as::<_, ArtistTrackCount>(
            "SELECT artist_name, \
                    COUNT(*) AS track_count, \
                    AVG(track_popularity)::float8 AS avg_popularity \
             FROM tracks \
             GROUP BY artist_name \
             ORDER BY track_count DESC, artist_name \
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }
}
