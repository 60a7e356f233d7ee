//! Track entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tracklist_core::error::{CoreError, FieldErrors};
use tracklist_core::track::{
    check_album_type, check_at_least_one, check_duration, check_followers, check_genres,
    check_popularity, check_release_date, check_required_text, MAX_ALBUM_TYPE_LEN, MAX_ID_LEN,
    MAX_NAME_LEN,
};
use tracklist_core::types::{DbId, Timestamp};
use validator::Validate;

/// A row from the `tracks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Track {
    pub id: DbId,
    pub track_id: String,
    pub track_name: String,
    pub track_number: i32,
    pub track_popularity: i32,
    pub explicit: bool,
    pub artist_name: String,
    pub artist_popularity: i32,
    pub artist_followers: i64,
    pub artist_genres: Option<String>,
    pub album_id: String,
    pub album_name: String,
    pub album_release_date: NaiveDate,
    pub album_total_tracks: i32,
    pub album_type: String,
    pub track_duration_min: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a track or replacing every field of an existing one.
///
/// The `validator` rules mirror the popularity bounds of [`TrackInput::check`]
/// so the JSON API rejects out-of-range scores before touching the model rules.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Validate)]
pub struct TrackInput {
    pub track_id: String,
    pub track_name: String,
    pub track_number: i32,
    #[validate(range(min = 0, max = 100, message = "track_popularity must be 0–100."))]
    pub track_popularity: i32,
    #[serde(default)]
    pub explicit: bool,
    pub artist_name: String,
    #[validate(range(min = 0, max = 100, message = "artist_popularity must be 0–100."))]
    pub artist_popularity: i32,
    pub artist_followers: i64,
    #[serde(default)]
    pub artist_genres: Option<String>,
    pub album_id: String,
    pub album_name: String,
    pub album_release_date: NaiveDate,
    pub album_total_tracks: i32,
    pub album_type: String,
    pub track_duration_min: f64,
}

impl TrackInput {
    /// Model-level rules, applied before every create or update.
    ///
    /// Collects all failing fields into one [`CoreError::InvalidFields`].
    pub fn check(&self, today: NaiveDate) -> Result<(), CoreError> {
        let mut errors = FieldErrors::new();

        check_required_text(&mut errors, "track_id", &self.track_id, MAX_ID_LEN);
        check_required_text(&mut errors, "track_name", &self.track_name, MAX_NAME_LEN);
        check_required_text(&mut errors, "artist_name", &self.artist_name, MAX_NAME_LEN);
        check_required_text(&mut errors, "album_id", &self.album_id, MAX_ID_LEN);
        check_required_text(&mut errors, "album_name", &self.album_name, MAX_NAME_LEN);
        check_required_text(&mut errors, "album_type", &self.album_type, MAX_ALBUM_TYPE_LEN);

        check_at_least_one(&mut errors, "track_number", self.track_number);
        check_at_least_one(&mut errors, "album_total_tracks", self.album_total_tracks);
        check_popularity(&mut errors, "track_popularity", self.track_popularity);
        check_popularity(&mut errors, "artist_popularity", self.artist_popularity);
        check_followers(&mut errors, self.artist_followers);
        check_genres(&mut errors, self.artist_genres.as_deref());
        check_release_date(&mut errors, self.album_release_date, today);
        check_duration(&mut errors, self.track_duration_min);
        if !errors.contains("album_type") {
            check_album_type(&mut errors, &self.album_type);
        }

        errors.into_result()
    }
}

impl From<&Track> for TrackInput {
    fn from(track: &Track) -> Self {
        Self {
            track_id: track.track_id.clone(),
            track_name: track.track_name.clone(),
            track_number: track.track_number,
            track_popularity: track.track_popularity,
            explicit: track.explicit,
            artist_name: track.artist_name.clone(),
            artist_popularity: track.artist_popularity,
            artist_followers: track.artist_followers,
            artist_genres: track.artist_genres.clone(),
            album_id: track.album_id.clone(),
            album_name: track.album_name.clone(),
            album_release_date: track.album_release_date,
            album_total_tracks: track.album_total_tracks,
            album_type: track.album_type.clone(),
            track_duration_min: track.track_duration_min,
        }
    }
}
