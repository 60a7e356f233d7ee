use chrono::NaiveDate;
use tracklist_db::models::track::TrackInput;

/// A valid track input; tweak fields per test.
pub fn track(track_id: &str) -> TrackInput {
    TrackInput {
        track_id: track_id.to_string(),
        track_name: format!("Song {track_id}"),
        track_number: 1,
        track_popularity: 50,
        explicit: false,
        artist_name: "Artist".to_string(),
        artist_popularity: 60,
        artist_followers: 1_000,
        artist_genres: Some("pop".to_string()),
        album_id: "ALB1".to_string(),
        album_name: "Album".to_string(),
        album_release_date: date(2020, 1, 1),
        album_total_tracks: 10,
        album_type: "album".to_string(),
        track_duration_min: 3.5,
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
