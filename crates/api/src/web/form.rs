//! The create/edit form for a track.
//!
//! Browsers submit every field as text, so [`TrackForm`] keeps the raw
//! strings. That lets a rejected submission be shown again exactly as typed.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::Deserialize;
use tracklist_core::error::{CoreError, FieldErrors};
use tracklist_core::filter::DATE_FORMAT;
use tracklist_core::track::{
    check_genres, check_required_text, AlbumType, MAX_ALBUM_TYPE_LEN, MAX_ID_LEN, MAX_NAME_LEN,
};
use tracklist_db::models::track::{Track, TrackInput};

use crate::web::html::escape;

const REQUIRED: &str = "This field is required.";

/// Raw form submission. Missing keys deserialize as blank.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TrackForm {
    pub track_id: String,
    pub track_name: String,
    pub track_number: String,
    pub track_popularity: String,
    /// Checkbox: present when ticked.
    pub explicit: Option<String>,
    pub artist_name: String,
    pub artist_popularity: String,
    pub artist_followers: String,
    pub artist_genres: String,
    pub album_id: String,
    pub album_name: String,
    pub album_release_date: String,
    pub album_total_tracks: String,
    pub album_type: String,
    pub track_duration_min: String,
}

impl TrackForm {
    /// Prefill from a stored track for editing.
    pub fn from_track(track: &Track) -> Self {
        Self {
            track_id: track.track_id.clone(),
            track_name: track.track_name.clone(),
            track_number: track.track_number.to_string(),
            track_popularity: track.track_popularity.to_string(),
            explicit: track.explicit.then(|| "on".to_string()),
            artist_name: track.artist_name.clone(),
            artist_popularity: track.artist_popularity.to_string(),
            artist_followers: track.artist_followers.to_string(),
            artist_genres: track.artist_genres.clone().unwrap_or_default(),
            album_id: track.album_id.clone(),
            album_name: track.album_name.clone(),
            album_release_date: track.album_release_date.format(DATE_FORMAT).to_string(),
            album_total_tracks: track.album_total_tracks.to_string(),
            album_type: track.album_type.clone(),
            track_duration_min: track.track_duration_min.to_string(),
        }
    }

    fn is_explicit(&self) -> bool {
        self.explicit
            .as_deref()
            .is_some_and(|v| !matches!(v.trim(), "" | "false" | "off" | "0"))
    }

    /// Parse and validate the submission.
    ///
    /// Unparseable numbers and dates are reported together with missing or
    /// oversized text. Once everything parses, the full model check runs.
    pub fn parse(&self, today: NaiveDate) -> Result<TrackInput, FieldErrors> {
        let mut errors = FieldErrors::new();

        let track_number = number(&mut errors, "track_number", &self.track_number, WHOLE);
        let track_popularity =
            number(&mut errors, "track_popularity", &self.track_popularity, WHOLE);
        let artist_popularity =
            number(&mut errors, "artist_popularity", &self.artist_popularity, WHOLE);
        let artist_followers =
            number(&mut errors, "artist_followers", &self.artist_followers, WHOLE);
        let album_total_tracks =
            number(&mut errors, "album_total_tracks", &self.album_total_tracks, WHOLE);
        let track_duration_min =
            number(&mut errors, "track_duration_min", &self.track_duration_min, DECIMAL);
        let album_release_date = date(&mut errors, "album_release_date", &self.album_release_date);

        let (
            Some(track_number),
            Some(track_popularity),
            Some(artist_popularity),
            Some(artist_followers),
            Some(album_total_tracks),
            Some(track_duration_min),
            Some(album_release_date),
        ) = (
            track_number,
            track_popularity,
            artist_popularity,
            artist_followers,
            album_total_tracks,
            track_duration_min,
            album_release_date,
        )
        else {
            self.check_text(&mut errors);
            return Err(errors);
        };

        let genres = self.artist_genres.trim();
        let input = TrackInput {
            track_id: self.track_id.trim().to_string(),
            track_name: self.track_name.trim().to_string(),
            track_number,
            track_popularity,
            explicit: self.is_explicit(),
            artist_name: self.artist_name.trim().to_string(),
            artist_popularity,
            artist_followers,
            artist_genres: (!genres.is_empty()).then(|| genres.to_string()),
            album_id: self.album_id.trim().to_string(),
            album_name: self.album_name.trim().to_string(),
            album_release_date,
            album_total_tracks,
            album_type: self.album_type.trim().to_string(),
            track_duration_min,
        };

        match input.check(today) {
            Ok(()) => Ok(input),
            Err(CoreError::InvalidFields(fields)) => Err(fields),
            Err(other) => {
                errors.add("__all__", other.to_string());
                Err(errors)
            }
        }
    }

    /// Text rules, for when the numeric fields did not parse.
    fn check_text(&self, errors: &mut FieldErrors) {
        check_required_text(errors, "track_id", &self.track_id, MAX_ID_LEN);
        check_required_text(errors, "track_name", &self.track_name, MAX_NAME_LEN);
        check_required_text(errors, "artist_name", &self.artist_name, MAX_NAME_LEN);
        check_required_text(errors, "album_id", &self.album_id, MAX_ID_LEN);
        check_required_text(errors, "album_name", &self.album_name, MAX_NAME_LEN);
        check_required_text(errors, "album_type", &self.album_type, MAX_ALBUM_TYPE_LEN);
        check_genres(errors, Some(self.artist_genres.trim()));
    }

    /// Render the form. `action` is the POST target.
    pub fn render(&self, action: &str, submit_label: &str, errors: &FieldErrors) -> String {
        let text = |name: &str, label: &str, value: &str| {
            field_row(
                name,
                label,
                &format!(
                    r#"<input type="text" id="{name}" name="{name}" value="{}">"#,
                    escape(value)
                ),
                errors,
            )
        };
        let number = |name: &str, label: &str, value: &str, step: &str| {
            field_row(
                name,
                label,
                &format!(
                    r#"<input type="number" step="{step}" id="{name}" name="{name}" value="{}">"#,
                    escape(value)
                ),
                errors,
            )
        };

        let checked = if self.is_explicit() { " checked" } else { "" };
        let album_types: String = AlbumType::ALL
            .iter()
            .map(|t| {
                let mark = if self.album_type == t.as_str() { " selected" } else { "" };
                format!(r#"<option value="{t}"{mark}>{t}</option>"#)
            })
            .collect();

        let rows = [
            text("track_id", "Track id", &self.track_id),
            text("track_name", "Track name", &self.track_name),
            number("track_number", "Track number", &self.track_number, "1"),
            number("track_popularity", "Track popularity", &self.track_popularity, "1"),
            field_row(
                "explicit",
                "Explicit",
                &format!(r#"<input type="checkbox" id="explicit" name="explicit"{checked}>"#),
                errors,
            ),
            text("artist_name", "Artist name", &self.artist_name),
            number("artist_popularity", "Artist popularity", &self.artist_popularity, "1"),
            number("artist_followers", "Artist followers", &self.artist_followers, "1"),
            field_row(
                "artist_genres",
                "Artist genres",
                &format!(
                    r#"<textarea id="artist_genres" name="artist_genres" rows="2">{}</textarea>"#,
                    escape(&self.artist_genres)
                ),
                errors,
            ),
            text("album_id", "Album id", &self.album_id),
            text("album_name", "Album name", &self.album_name),
            field_row(
                "album_release_date",
                "Album release date",
                &format!(
                    r#"<input type="date" id="album_release_date" name="album_release_date" value="{}">"#,
                    escape(&self.album_release_date)
                ),
                errors,
            ),
            number("album_total_tracks", "Album total tracks", &self.album_total_tracks, "1"),
            field_row(
                "album_type",
                "Album type",
                &format!(
                    r#"<select id="album_type" name="album_type"><option value="">---------</option>{album_types}</select>"#
                ),
                errors,
            ),
            number("track_duration_min", "Track duration (min)", &self.track_duration_min, "any"),
        ]
        .join("\n");

        format!(
            r#"        <form method="post" action="{action}" class="card">
{general}{rows}
            <p><button type="submit">{submit_label}</button> <a href="/tracks/">Cancel</a></p>
        </form>"#,
            action = escape(action),
            general = error_list(errors.messages("__all__")),
            submit_label = escape(submit_label),
        )
    }
}

// ---------------------------------------------------------------------------
// Parsing helpers
// ---------------------------------------------------------------------------

const WHOLE: &str = "Enter a whole number.";
const DECIMAL: &str = "Enter a number.";

fn number<T: FromStr>(
    errors: &mut FieldErrors,
    field: &str,
    raw: &str,
    invalid: &str,
) -> Option<T> {
    let raw = raw.trim();
    if raw.is_empty() {
        errors.add(field, REQUIRED);
        return None;
    }
    match raw.parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            errors.add(field, invalid);
            None
        }
    }
}

fn date(errors: &mut FieldErrors, field: &str, raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        errors.add(field, REQUIRED);
        return None;
    }
    match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        Ok(value) => Some(value),
        Err(_) => {
            errors.add(field, "Enter a valid date.");
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Rendering helpers
// ---------------------------------------------------------------------------

fn field_row(name: &str, label: &str, control: &str, errors: &FieldErrors) -> String {
    format!(
        r#"            <p><label for="{name}">{label}</label><br>{control}{}</p>"#,
        error_list(errors.messages(name))
    )
}

fn error_list(messages: &[String]) -> String {
    if messages.is_empty() {
        return String::new();
    }
    let items: String = messages
        .iter()
        .map(|m| format!("<li>{}</li>", escape(m)))
        .collect();
    format!(r#"<ul class="errorlist">{items}</ul>"#)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn valid_form() -> TrackForm {
        TrackForm {
            track_id: " T001 ".into(),
            track_name: "Song A".into(),
            track_number: "1".into(),
            track_popularity: "80".into(),
            explicit: Some("on".into()),
            artist_name: "Artist".into(),
            artist_popularity: "70".into(),
            artist_followers: "1000".into(),
            artist_genres: "  ".into(),
            album_id: "ALB1".into(),
            album_name: "Album".into(),
            album_release_date: "2020-01-01".into(),
            album_total_tracks: "10".into(),
            album_type: "album".into(),
            track_duration_min: "3.5".into(),
        }
    }

    #[test]
    fn valid_submission_parses_and_trims() {
        let input = valid_form().parse(today()).unwrap();
        assert_eq!(input.track_id, "T001");
        assert!(input.explicit);
        assert_eq!(input.artist_genres, None);
        assert_eq!(input.track_duration_min, 3.5);
    }

    #[test]
    fn unchecked_box_is_not_explicit() {
        let mut form = valid_form();
        form.explicit = None;
        assert!(!form.parse(today()).unwrap().explicit);
    }

    #[test]
    fn parse_failures_are_reported_with_text_errors() {
        let mut form = valid_form();
        form.track_number = "one".into();
        form.track_duration_min = String::new();
        form.album_release_date = "01/02/2020".into();
        form.track_name = String::new();

        let errors = form.parse(today()).unwrap_err();
        assert_eq!(errors.messages("track_number"), ["Enter a whole number."]);
        assert_eq!(errors.messages("track_duration_min"), [REQUIRED]);
        assert_eq!(errors.messages("album_release_date"), ["Enter a valid date."]);
        assert_eq!(errors.messages("track_name"), [REQUIRED]);
        assert!(!errors.contains("track_id"));
    }

    #[test]
    fn model_rules_apply_after_parsing() {
        let mut form = valid_form();
        form.track_popularity = "101".into();
        form.album_release_date = "2030-01-01".into();
        form.track_duration_min = "NaN".into();

        let errors = form.parse(today()).unwrap_err();
        assert!(errors.contains("track_popularity"));
        assert_eq!(
            errors.messages("album_release_date"),
            ["Release date cannot be in the future."]
        );
        assert_eq!(errors.messages("track_duration_min"), ["Duration is invalid (NaN)."]);
    }

    #[test]
    fn render_preserves_typed_values_and_shows_errors() {
        let mut form = valid_form();
        form.track_name = "<script>".into();
        form.track_number = "abc".into();
        let errors = form.parse(today()).unwrap_err();

        let html = form.render("/tracks/new/", "Create", &errors);
        assert!(html.contains(r#"value="&lt;script&gt;""#));
        assert!(html.contains(r#"name="track_number" value="abc""#));
        assert!(html.contains("<li>Enter a whole number.</li>"));
        assert!(html.contains(r#"<option value="album" selected>album</option>"#));
        assert!(html.contains(r#"name="explicit" checked"#));
    }
}
