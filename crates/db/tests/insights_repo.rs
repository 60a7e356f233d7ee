//! Integration tests for the reporting queries.

mod common;

use common::{date, track};
use sqlx::PgPool;
use tracklist_core::insights::CleanHitsFilter;
use tracklist_db::models::track::TrackInput;
use tracklist_db::repositories::{InsightsRepo, TrackRepo};

async fn seed(pool: &PgPool, rows: &[TrackInput]) {
    TrackRepo::insert_batch(pool, rows).await.unwrap();
}

fn by(id: &str, artist: &str, popularity: i32, followers: i64) -> TrackInput {
    let mut input = track(id);
    input.artist_name = artist.into();
    input.track_popularity = popularity;
    input.artist_followers = followers;
    input
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reports_on_empty_table(pool: PgPool) {
    assert!(InsightsRepo::top_artists(&pool).await.unwrap().is_empty());
    assert!(InsightsRepo::releases_by_year(&pool).await.unwrap().is_empty());
    assert!(InsightsRepo::top_genres(&pool, 20).await.unwrap().is_empty());

    let report = InsightsRepo::clean_hits(&pool, &CleanHitsFilter::with_min_popularity(70))
        .await
        .unwrap();
    assert_eq!(report.summary.results, 0);
    assert!(report.summary.avg_popularity.is_none());
    assert!(report.summary.max_popularity.is_none());
    assert!(report.top_tracks.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_top_artists_orders_by_count_then_followers(pool: PgPool) {
    seed(
        &pool,
        &[
            by("1", "Small", 10, 100),
            by("2", "Small", 30, 100),
            by("3", "Big", 50, 9_000),
            by("4", "Big", 70, 9_000),
            by("5", "Solo", 99, 1),
        ],
    )
    .await;

    let artists = InsightsRepo::top_artists(&pool).await.unwrap();
    let names: Vec<&str> = artists.iter().map(|a| a.artist_name.as_str()).collect();
    assert_eq!(names, vec!["Big", "Small", "Solo"]);

    let big = &artists[0];
    assert_eq!(big.track_count, 2);
    assert_eq!(big.avg_track_popularity, Some(60.0));
    assert_eq!(big.max_track_popularity, Some(70));
    assert_eq!(big.followers, Some(9_000.0));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_top_artists_caps_at_twenty(pool: PgPool) {
    let rows: Vec<TrackInput> = (0..25)
        .map(|i| by(&format!("T{i}"), &format!("Artist {i:02}"), 50, 0))
        .collect();
    seed(&pool, &rows).await;

    assert_eq!(InsightsRepo::top_artists(&pool).await.unwrap().len(), 20);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_releases_by_year_counts_explicit(pool: PgPool) {
    let mut a = track("A");
    a.album_release_date = date(2019, 5, 1);
    a.explicit = true;
    a.track_popularity = 40;
    let mut b = track("B");
    b.album_release_date = date(2019, 8, 1);
    b.track_popularity = 60;
    let mut c = track("C");
    c.album_release_date = date(2021, 1, 1);
    seed(&pool, &[a, b, c]).await;

    let years = InsightsRepo::releases_by_year(&pool).await.unwrap();
    assert_eq!(years.len(), 2);

    assert_eq!(years[0].year, 2019);
    assert_eq!(years[0].track_count, 2);
    assert_eq!(years[0].avg_track_popularity, Some(50.0));
    assert_eq!(years[0].explicit_count, 1);

    assert_eq!(years[1].year, 2021);
    assert_eq!(years[1].explicit_count, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_top_genres_tallies_lowercased_tokens(pool: PgPool) {
    let mut a = track("A");
    a.artist_genres = Some("Pop, Dance Pop".into());
    let mut b = track("B");
    b.artist_genres = Some("pop ,rock".into());
    let mut c = track("C");
    c.artist_genres = None;
    seed(&pool, &[a, b, c]).await;

    let genres = InsightsRepo::top_genres(&pool, 20).await.unwrap();
    let pairs: Vec<(&str, i64)> = genres.iter().map(|g| (g.genre.as_str(), g.count)).collect();
    assert_eq!(pairs, vec![("pop", 2), ("dance pop", 1), ("rock", 1)]);

    assert_eq!(InsightsRepo::top_genres(&pool, 1).await.unwrap().len(), 1);
    assert!(InsightsRepo::top_genres(&pool, 0).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_clean_hits_excludes_explicit_and_unpopular(pool: PgPool) {
    let mut hit = by("HIT", "Adele", 90, 5_000);
    hit.track_duration_min = 3.5;
    let mut dirty = by("DIRTY", "Drake", 95, 5_000);
    dirty.explicit = true;
    let quiet = by("QUIET", "Nobody", 20, 5);
    seed(&pool, &[hit, dirty, quiet]).await;

    let report = InsightsRepo::clean_hits(&pool, &CleanHitsFilter::with_min_popularity(70))
        .await
        .unwrap();
    assert_eq!(report.filters.min_popularity, 70);
    assert_eq!(report.summary.results, 1);
    assert_eq!(report.summary.avg_popularity, Some(90.0));
    assert_eq!(report.summary.max_popularity, Some(90));
    assert_eq!(report.summary.min_duration, Some(3.5));
    assert_eq!(report.summary.max_duration, Some(3.5));
    assert_eq!(report.top_tracks.len(), 1);
    assert_eq!(report.top_tracks[0].track_id, "HIT");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_clean_hits_narrowing_filters(pool: PgPool) {
    let mut a = by("A", "X", 80, 0);
    a.album_type = "single".into();
    a.album_release_date = date(2018, 1, 1);
    a.artist_genres = Some("indie rock".into());
    let mut b = by("B", "Y", 80, 0);
    b.album_release_date = date(2020, 1, 1);
    b.artist_genres = Some("indie rock".into());
    let mut c = by("C", "Z", 80, 0);
    c.album_release_date = date(2022, 1, 1);
    seed(&pool, &[a, b, c]).await;

    let mut filter = CleanHitsFilter::with_min_popularity(70);
    filter.genre = Some("ROCK".into());
    let report = InsightsRepo::clean_hits(&pool, &filter).await.unwrap();
    assert_eq!(report.summary.results, 2);

    filter.album_type = Some("Single".into());
    let report = InsightsRepo::clean_hits(&pool, &filter).await.unwrap();
    assert_eq!(report.summary.results, 1);
    assert_eq!(report.top_tracks[0].track_id, "A");

    let mut filter = CleanHitsFilter::with_min_popularity(70);
    filter.year_from = Some(2019);
    filter.year_to = Some(2021);
    let report = InsightsRepo::clean_hits(&pool, &filter).await.unwrap();
    assert_eq!(report.summary.results, 1);
    assert_eq!(report.top_tracks[0].track_id, "B");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_clean_hits_top_tracks_capped_and_ordered(pool: PgPool) {
    let rows: Vec<TrackInput> = (0..30)
        .map(|i| by(&format!("T{i:02}"), "Artist", 70 + (i % 30), i64::from(i)))
        .collect();
    seed(&pool, &rows).await;

    let report = InsightsRepo::clean_hits(&pool, &CleanHitsFilter::with_min_popularity(70))
        .await
        .unwrap();
    assert_eq!(report.summary.results, 30);
    assert_eq!(report.top_tracks.len(), 25);
    assert_eq!(report.top_tracks[0].track_popularity, 99);
    assert!(report
        .top_tracks
        .windows(2)
        .all(|w| w[0].track_popularity >= w[1].track_popularity));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_album_type_breakdown_matches_artist_substring(pool: PgPool) {
    let mut a = by("A", "Taylor Swift", 80, 0);
    a.album_type = "album".into();
    let mut b = by("B", "Taylor Swift", 60, 0);
    b.album_type = "album".into();
    let mut c = by("C", "Taylor Swift", 50, 0);
    c.album_type = "single".into();
    let d = by("D", "Someone Else", 50, 0);
    seed(&pool, &[a, b, c, d]).await;

    let rows = InsightsRepo::artist_album_type_breakdown(&pool, "swift")
        .await
        .unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].album_type, "album");
    assert_eq!(rows[0].track_count, 2);
    assert_eq!(rows[0].avg_track_popularity, Some(70.0));
    assert_eq!(rows[1].album_type, "single");

    assert!(InsightsRepo::artist_album_type_breakdown(&pool, "nobody")
        .await
        .unwrap()
        .is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_artist_track_counts(pool: PgPool) {
    seed(
        &pool,
        &[by("1", "B", 10, 0), by("2", "B", 30, 0), by("3", "A", 50, 0)],
    )
    .await;

    let rows = InsightsRepo::artist_track_counts(&pool, 8).await.unwrap();
    assert_eq!(rows[0].artist_name, "B");
    assert_eq!(rows[0].track_count, 2);
    assert_eq!(rows[0].avg_popularity, Some(20.0));
    assert_eq!(rows[1].artist_name, "A");
}
