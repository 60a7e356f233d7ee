//! Repository for the `tracks` table.

use sqlx::{PgExecutor, PgPool, Postgres, QueryBuilder};
use tracklist_core::filter::{SortKey, TrackFilter};
use tracklist_core::types::DbId;

use crate::filter::{push_order_by, TrackPredicate};
use crate::models::track::{Track, TrackInput};

/// Column list shared across queries to avoid repetition.
pub(crate) const COLUMNS: &str = "id, track_id, track_name, track_number, track_popularity, \
    explicit, artist_name, artist_popularity, artist_followers, artist_genres, album_id, \
    album_name, album_release_date, album_total_tracks, album_type, track_duration_min, \
    created_at, updated_at";

/// Writable columns, in bind order.
const INSERT_COLUMNS: &str = "track_id, track_name, track_number, track_popularity, explicit, \
    artist_name, artist_popularity, artist_followers, artist_genres, album_id, album_name, \
    album_release_date, album_total_tracks, album_type, track_duration_min";

/// Provides CRUD and listing operations for tracks.
pub struct TrackRepo;

impl TrackRepo {
    /// Bind parameters per row in [`TrackRepo::insert_batch`].
    pub const INSERT_BINDS_PER_ROW: usize = 15;

    /// Largest batch one statement can carry under PostgreSQL's limit of
    /// 65535 bind parameters.
    pub const MAX_INSERT_BATCH: usize = u16::MAX as usize / Self::INSERT_BINDS_PER_ROW;

    /// Insert a new track, returning the created row.
    ///
    /// A duplicate `track_id` fails with the `uq_tracks_track_id` violation.
    pub async fn create(pool: &PgPool, input: &TrackInput) -> Result<Track, sqlx::Error> {
        let query = format!(
            "INSERT INTO tracks ({INSERT_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Track>(&query)
            .bind(&input.track_id)
            .bind(&input.track_name)
            .bind(input.track_number)
            .bind(input.track_popularity)
            .bind(input.explicit)
            .bind(&input.artist_name)
            .bind(input.artist_popularity)
            .bind(input.artist_followers)
            .bind(&input.artist_genres)
            .bind(&input.album_id)
            .bind(&input.album_name)
            .bind(input.album_release_date)
            .bind(input.album_total_tracks)
            .bind(&input.album_type)
            .bind(input.track_duration_min)
            .fetch_one(pool)
            .await
    }

    /// Find a track by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Track>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tracks WHERE id = $1");
        sqlx::query_as::<_, Track>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Replace every writable field of a track.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &TrackInput,
    ) -> Result<Option<Track>, sqlx::Error> {
        let query = format!(
            "UPDATE tracks SET \
                track_id = $2, \
                track_name = $3, \
                track_number = $4, \
                track_popularity = $5, \
                explicit = $6, \
                artist_name = $7, \
                artist_popularity = $8, \
                artist_followers = $9, \
                artist_genres = $10, \
                album_id = $11, \
                album_name = $12, \
                album_release_date = $13, \
                album_total_tracks = $14, \
                album_type = $15, \
                track_duration_min = $16, \
                updated_at = now() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Track>(&query)
            .bind(id)
            .bind(&input.track_id)
            .bind(&input.track_name)
            .bind(input.track_number)
            .bind(input.track_popularity)
            .bind(input.explicit)
            .bind(&input.artist_name)
            .bind(input.artist_popularity)
            .bind(input.artist_followers)
            .bind(&input.artist_genres)
            .bind(&input.album_id)
            .bind(&input.album_name)
            .bind(input.album_release_date)
            .bind(input.album_total_tracks)
            .bind(&input.album_type)
            .bind(input.track_duration_min)
            .fetch_optional(pool)
            .await
    }

    /// Delete a track. Returns `false` if it did not exist.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tracks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List every track matching `filter` in the given order.
    pub async fn list(
        pool: &PgPool,
        filter: &TrackFilter,
        ordering: &[SortKey],
    ) -> Result<Vec<Track>, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT {COLUMNS} FROM tracks"));
        TrackPredicate::new(&mut qb).track_filter(filter);
        push_order_by(&mut qb, ordering);
        qb.build_query_as::<Track>().fetch_all(pool).await
    }

    /// One page of tracks matching `filter`, ordered by id.
    pub async fn list_page(
        pool: &PgPool,
        filter: &TrackFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Track>, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT {COLUMNS} FROM tracks"));
        TrackPredicate::new(&mut qb).track_filter(filter);
        qb.push(" ORDER BY id LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);
        qb.build_query_as::<Track>().fetch_all(pool).await
    }

    /// Number of tracks matching `filter`.
    pub async fn count(pool: &PgPool, filter: &TrackFilter) -> Result<i64, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM tracks");
        TrackPredicate::new(&mut qb).track_filter(filter);
        qb.build_query_scalar::<i64>().fetch_one(pool).await
    }

    /// Remove every track. Returns the number of rows deleted.
    pub async fn delete_all<'e, E>(executor: E) -> Result<u64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM tracks").execute(executor).await?;
        Ok(result.rows_affected())
    }

    /// Multi-row insert that skips rows whose `track_id` already exists.
    ///
    /// Returns the number of rows actually inserted, which is lower than
    /// `rows.len()` when duplicates were dropped. `rows` must not exceed
    /// [`TrackRepo::MAX_INSERT_BATCH`].
    pub async fn insert_batch<'e, E>(executor: E, rows: &[TrackInput]) -> Result<u64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        if rows.is_empty() {
            return Ok(0);
        }

        let mut qb = QueryBuilder::<Postgres>::new(format!("INSERT INTO tracks ({INSERT_COLUMNS}) "));
        qb.push_values(rows, |mut b, row| {
            b.push_bind(row.track_id.clone())
                .push_bind(row.track_name.clone())
                .push_bind(row.track_number)
                .push_bind(row.track_popularity)
                .push_bind(row.explicit)
                .push_bind(row.artist_name.clone())
                .push_bind(row.artist_popularity)
                .push_bind(row.artist_followers)
                .push_bind(row.artist_genres.clone())
                .push_bind(row.album_id.clone())
                .push_bind(row.album_name.clone())
                .push_bind(row.album_release_date)
                .push_bind(row.album_total_tracks)
                .push_bind(row.album_type.clone())
                .push_bind(row.track_duration_min);
        });
        qb.push(" ON CONFLICT (track_id) DO NOTHING");

        let result = qb.build().execute(executor).await?;
        Ok(result.rows_affected())
    }

    /// The first `limit` tracks by id, for sampling after an import.
    pub async fn sample(pool: &PgPool, limit: i64) -> Result<Vec<Track>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tracks ORDER BY id LIMIT $1");
        sqlx::query_as::<_, Track>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Dropdown options
    // -----------------------------------------------------------------------

    /// Distinct album types present, alphabetically.
    pub async fn distinct_album_types(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar("SELECT DISTINCT album_type FROM tracks ORDER BY album_type")
            .fetch_all(pool)
            .await
    }

    /// Distinct release years present, newest first.
    pub async fn distinct_years(pool: &PgPool) -> Result<Vec<i32>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT DISTINCT EXTRACT(YEAR FROM album_release_date)::int AS year \
             FROM tracks ORDER BY year DESC",
        )
        .fetch_all(pool)
        .await
    }

    /// The first `limit` distinct artist names, alphabetically.
    pub async fn distinct_artists(pool: &PgPool, limit: i64) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT DISTINCT artist_name FROM tracks ORDER BY artist_name LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Every non-empty genre string, in track id order.
    pub async fn genre_strings(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT artist_genres FROM tracks \
             WHERE artist_genres IS NOT NULL AND artist_genres <> '' \
             ORDER BY id",
        )
        .fetch_all(pool)
        .await
    }
}
