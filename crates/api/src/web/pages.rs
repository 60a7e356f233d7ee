//! Page handlers for the server-rendered UI.

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use tracklist_core::error::{CoreError, FieldErrors};
use tracklist_core::filter::{TrackFilter, WEB_SEARCH_PARAM};
use tracklist_core::genre::{distinct_genres, GenreTally};
use tracklist_core::insights::{
    CleanHitsFilter, UI_ARTIST_OPTIONS, UI_CLEAN_HITS_MIN_POPULARITY, UI_TOP_ARTISTS,
    UI_TOP_GENRES,
};
use tracklist_core::pagination::{resolve_page, Page, WEB_PAGE_SIZE};
use tracklist_core::types::DbId;
use tracklist_db::models::track::{Track, TrackInput};
use tracklist_db::repositories::{InsightsRepo, TrackRepo};

use crate::extract::PageTrackId;
use crate::state::AppState;
use crate::web::error::{PageError, PageResult};
use crate::web::form::TrackForm;
use crate::web::html::{carry_querystring, escape, format_avg, layout, options};

const LIST_URL: &str = "/tracks/";

// ---------------------------------------------------------------------------
// Index
// ---------------------------------------------------------------------------

/// Pages and endpoints linked from the index, in display order.
const ENDPOINTS: [(&str, &str); 9] = [
    ("Tracks (list and search)", "/tracks/"),
    ("Create track (form)", "/tracks/new/"),
    ("API: list/create tracks (GET/POST)", "/api/tracks/"),
    ("API: top artists", "/api/tracks/summary/top-artists/"),
    ("API: releases by year", "/api/tracks/summary/releases-by-year/"),
    ("API: top genres (top=20)", "/api/tracks/summary/top-genres/?top=20"),
    (
        "API: clean hits",
        "/api/tracks/insights/clean-hits/?min_popularity=80&genre=pop&year_from=2019&year_to=2021&album_type=album",
    ),
    (
        "API: artist album type breakdown",
        "/api/tracks/insights/artist-albumtype-breakdown/?artist=drake",
    ),
    ("Health check", "/health"),
];

/// GET /
pub async fn index() -> Html<String> {
    let items: String = ENDPOINTS
        .iter()
        .map(|(label, href)| {
            format!(
                r#"            <li><a href="{}">{}</a></li>
"#,
                escape(href),
                escape(label)
            )
        })
        .collect();

    let body = format!(
        r#"        <div class="card">
            <p>Tracklist {version}, built on axum and sqlx.</p>
            <ul>
{items}            </ul>
        </div>"#,
        version = env!("CARGO_PKG_VERSION"),
    );
    Html(layout("Tracklist", &body))
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

/// GET /tracks/
///
/// Filters: `q`, `album_type`, `explicit`, `min_popularity`, `year`,
/// `artist`, `genre`; 25 rows per `page`. The sidebar is recomputed on
/// every request.
pub async fn list_tracks(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> PageResult<Html<String>> {
    let filter = TrackFilter::from_params(&params, WEB_SEARCH_PARAM)?;

    let total = TrackRepo::count(&state.pool, &filter).await?;
    let page = resolve_page(params.get("page").map(String::as_str), total, WEB_PAGE_SIZE)
        .ok_or_else(|| PageError::NotFound("Invalid page.".to_string()))?;
    let tracks = TrackRepo::list_page(&state.pool, &filter, page.per_page, page.offset()).await?;

    let sidebar = Sidebar::load(&state).await?;

    tracing::debug!(total, page = page.number, "Rendered track list");

    let body = format!(
        r#"        <div class="layout">
            <section>
{filters}
{table}
{pagination}
            </section>
            <aside>
{sidebar}
            </aside>
        </div>"#,
        filters = render_filters(&params, &sidebar),
        table = render_track_table(&tracks),
        pagination = render_pagination(&page, &carry_querystring(&params)),
        sidebar = sidebar.render(),
    );
    Ok(Html(layout("Tracks", &body)))
}

/// Everything the list page shows besides the tracks themselves.
struct Sidebar {
    top_artists: Vec<tracklist_db::models::insights::ArtistTrackCount>,
    top_genres: Vec<tracklist_core::genre::GenreCount>,
    clean_hits: tracklist_db::models::insights::CleanHitsSummary,
    album_types: Vec<String>,
    years: Vec<i32>,
    artists: Vec<String>,
    genres: Vec<String>,
}

impl Sidebar {
    async fn load(state: &AppState) -> Result<Self, sqlx::Error> {
        let pool = &state.pool;
        let genre_strings = TrackRepo::genre_strings(pool).await?;
        let tally: GenreTally = genre_strings.iter().map(String::as_str).collect();

        Ok(Self {
            top_artists: InsightsRepo::artist_track_counts(pool, UI_TOP_ARTISTS).await?,
            top_genres: tally.top(UI_TOP_GENRES),
            clean_hits: InsightsRepo::clean_hits_summary(
                pool,
                &CleanHitsFilter::with_min_popularity(UI_CLEAN_HITS_MIN_POPULARITY),
            )
            .await?,
            album_types: TrackRepo::distinct_album_types(pool).await?,
            years: TrackRepo::distinct_years(pool).await?,
            artists: TrackRepo::distinct_artists(pool, UI_ARTIST_OPTIONS).await?,
            genres: distinct_genres(genre_strings.iter().map(String::as_str)),
        })
    }

    fn render(&self) -> String {
        let artists: String = self
            .top_artists
            .iter()
            .map(|a| {
                format!(
                    "<li>{} ({} tracks, avg {})</li>",
                    escape(&a.artist_name),
                    a.track_count,
                    format_avg(a.avg_popularity)
                )
            })
            .collect();
        let genres: String = self
            .top_genres
            .iter()
            .map(|g| format!("<li>{} ({})</li>", escape(&g.genre), g.count))
            .collect();

        format!(
            r#"                <div class="card">
                    <h3>Top artists</h3>
                    <ol>{artists}</ol>
                </div>
                <div class="card">
                    <h3>Top genres</h3>
                    <ol>{genres}</ol>
                </div>
                <div class="card" id="clean-hits">
                    <h3>Clean hits (popularity &ge; {min})</h3>
                    <p>{count} tracks, average popularity {avg}</p>
                </div>"#,
            min = UI_CLEAN_HITS_MIN_POPULARITY,
            count = self.clean_hits.results,
            avg = format_avg(self.clean_hits.avg_popularity),
        )
    }
}

fn render_filters(params: &HashMap<String, String>, sidebar: &Sidebar) -> String {
    let current = |key: &str| params.get(key).map(|v| v.trim()).filter(|v| !v.is_empty());
    let years: Vec<String> = sidebar.years.iter().map(i32::to_string).collect();

    format!(
        r#"                <form method="get" action="{LIST_URL}" class="card filters">
                    <label>Search <input type="text" name="q" value="{q}"></label>
                    <label>Album type <select name="album_type">{album_types}</select></label>
                    <label>Explicit <select name="explicit">{explicit}</select></label>
                    <label>Min popularity <input type="number" name="min_popularity" min="0" max="100" value="{min_popularity}"></label>
                    <label>Year <select name="year">{years}</select></label>
                    <label>Artist <select name="artist">{artists}</select></label>
                    <label>Genre <select name="genre">{genres}</select></label>
                    <button type="submit">Filter</button>
                    <a href="{LIST_URL}">Reset</a>
                </form>"#,
        q = escape(current(WEB_SEARCH_PARAM).unwrap_or_default()),
        album_types = options(
            sidebar.album_types.iter().map(String::as_str),
            current("album_type")
        ),
        explicit = options(["true", "false"], current("explicit")),
        min_popularity = escape(current("min_popularity").unwrap_or_default()),
        years = options(years.iter().map(String::as_str), current("year")),
        artists = options(sidebar.artists.iter().map(String::as_str), current("artist")),
        genres = options(sidebar.genres.iter().map(String::as_str), current("genre")),
    )
}

fn render_track_table(tracks: &[Track]) -> String {
    if tracks.is_empty() {
        return r#"                <p class="card">No tracks match these filters.</p>"#.to_string();
    }

    let rows: String = tracks
        .iter()
        .map(|t| {
            format!(
                r#"                    <tr>
                        <td><a href="/tracks/{id}/">{name}</a></td>
                        <td>{artist}</td>
                        <td>{album}</td>
                        <td>{date}</td>
                        <td>{popularity}</td>
                        <td>{explicit}</td>
                        <td><a href="/tracks/{id}/edit/">Edit</a> <a href="/tracks/{id}/delete/">Delete</a></td>
                    </tr>
"#,
                id = t.id,
                name = escape(&t.track_name),
                artist = escape(&t.artist_name),
                album = escape(&t.album_name),
                date = t.album_release_date,
                popularity = t.track_popularity,
                explicit = if t.explicit { "yes" } else { "no" },
            )
        })
        .collect();

    format!(
        r#"                <table>
                    <tr><th>Track</th><th>Artist</th><th>Album</th><th>Released</th><th>Popularity</th><th>Explicit</th><th></th></tr>
{rows}                </table>"#
    )
}

fn render_pagination(page: &Page, querystring: &str) -> String {
    let link = |number: i64, label: &str| {
        let extra = if querystring.is_empty() {
            String::new()
        } else {
            format!("&{querystring}")
        };
        format!(
            r#"<a href="?page={number}{}">{label}</a>"#,
            escape(&extra)
        )
    };

    let mut parts = Vec::new();
    if page.has_previous() {
        parts.push(link(1, "&laquo; first"));
        parts.push(link(page.number - 1, "previous"));
    }
    parts.push(format!(
        "<span>Page {} of {} ({} tracks)</span>",
        page.number, page.total_pages, page.total_items
    ));
    if page.has_next() {
        parts.push(link(page.number + 1, "next"));
        parts.push(link(page.total_pages, "last &raquo;"));
    }

    format!(
        r#"                <p class="pagination">{}</p>"#,
        parts.join("")
    )
}

// ---------------------------------------------------------------------------
// Detail
// ---------------------------------------------------------------------------

/// GET /tracks/{id}/
pub async fn track_detail(
    State(state): State<AppState>,
    PageTrackId(id): PageTrackId,
) -> PageResult<Html<String>> {
    let track = find_track(&state, id).await?;

    let fields: [(&str, String); 15] = [
        ("Track id", track.track_id.clone()),
        ("Track name", track.track_name.clone()),
        ("Track number", track.track_number.to_string()),
        ("Track popularity", track.track_popularity.to_string()),
        ("Explicit", (if track.explicit { "yes" } else { "no" }).to_string()),
        ("Artist name", track.artist_name.clone()),
        ("Artist popularity", track.artist_popularity.to_string()),
        ("Artist followers", track.artist_followers.to_string()),
        ("Artist genres", track.artist_genres.clone().unwrap_or_default()),
        ("Album id", track.album_id.clone()),
        ("Album name", track.album_name.clone()),
        ("Album release date", track.album_release_date.to_string()),
        ("Album total tracks", track.album_total_tracks.to_string()),
        ("Album type", track.album_type.clone()),
        ("Duration (min)", format!("{:.2}", track.track_duration_min)),
    ];
    let rows: String = fields
        .iter()
        .map(|(label, value)| {
            format!(
                "            <tr><th>{label}</th><td>{}</td></tr>\n",
                escape(value)
            )
        })
        .collect();

    let body = format!(
        r#"        <table class="card">
{rows}        </table>
        <p>
            <a href="/tracks/{id}/edit/">Edit</a>
            <a href="/tracks/{id}/delete/">Delete</a>
            <a href="{LIST_URL}">Back to tracks</a>
        </p>"#,
        id = track.id,
    );
    Ok(Html(layout(&track_title(&track), &body)))
}

// ---------------------------------------------------------------------------
// Create / edit
// ---------------------------------------------------------------------------

/// GET /tracks/new/
pub async fn new_track() -> Html<String> {
    render_form_page("New track", "/tracks/new/", &TrackForm::default(), &FieldErrors::new())
}

/// POST /tracks/new/
///
/// Redirects to the list on success; re-renders the form with 422 otherwise.
pub async fn create_track(
    State(state): State<AppState>,
    Form(form): Form<TrackForm>,
) -> PageResult<Response> {
    let action = "/tracks/new/";
    let input = match form.parse(today()) {
        Ok(input) => input,
        Err(errors) => return Ok(rejected("New track", action, &form, &errors)),
    };

    match TrackRepo::create(&state.pool, &input).await {
        Ok(track) => {
            tracing::info!(id = track.id, track_id = %track.track_id, "Track created from form");
            Ok(Redirect::to(LIST_URL).into_response())
        }
        Err(err) if is_unique_violation(&err) => {
            Ok(rejected("New track", action, &form, &duplicate_track_id(&input)))
        }
        Err(err) => Err(err.into()),
    }
}

/// GET /tracks/{id}/edit/
pub async fn edit_track(
    State(state): State<AppState>,
    PageTrackId(id): PageTrackId,
) -> PageResult<Html<String>> {
    let track = find_track(&state, id).await?;
    Ok(render_form_page(
        &format!("Edit {}", track_title(&track)),
        &format!("/tracks/{id}/edit/"),
        &TrackForm::from_track(&track),
        &FieldErrors::new(),
    ))
}

/// POST /tracks/{id}/edit/
pub async fn update_track(
    State(state): State<AppState>,
    PageTrackId(id): PageTrackId,
    Form(form): Form<TrackForm>,
) -> PageResult<Response> {
    let track = find_track(&state, id).await?;
    let title = format!("Edit {}", track_title(&track));
    let action = format!("/tracks/{id}/edit/");

    let input = match form.parse(today()) {
        Ok(input) => input,
        Err(errors) => return Ok(rejected(&title, &action, &form, &errors)),
    };

    match TrackRepo::update(&state.pool, id, &input).await {
        Ok(Some(_)) => {
            tracing::info!(id, track_id = %input.track_id, "Track updated from form");
            Ok(Redirect::to(LIST_URL).into_response())
        }
        Ok(None) => Err(CoreError::NotFound { entity: "Track", id }.into()),
        Err(err) if is_unique_violation(&err) => {
            Ok(rejected(&title, &action, &form, &duplicate_track_id(&input)))
        }
        Err(err) => Err(err.into()),
    }
}

fn render_form_page(title: &str, action: &str, form: &TrackForm, errors: &FieldErrors) -> Html<String> {
    Html(layout(title, &form.render(action, "Save", errors)))
}

fn rejected(title: &str, action: &str, form: &TrackForm, errors: &FieldErrors) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        render_form_page(title, action, form, errors),
    )
        .into_response()
}

fn duplicate_track_id(input: &TrackInput) -> FieldErrors {
    let mut errors = FieldErrors::new();
    errors.add(
        "track_id",
        format!("A track with track id '{}' already exists.", input.track_id),
    );
    errors
}

/// PostgreSQL unique violation (SQLSTATE 23505).
fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db| db.code().as_deref() == Some("23505"))
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

/// GET /tracks/{id}/delete/
pub async fn confirm_delete(
    State(state): State<AppState>,
    PageTrackId(id): PageTrackId,
) -> PageResult<Html<String>> {
    let track = find_track(&state, id).await?;
    let body = format!(
        r#"        <form method="post" action="/tracks/{id}/delete/" class="card">
            <p>Are you sure you want to delete "{title}"?</p>
            <p><button type="submit">Yes, delete</button> <a href="/tracks/{id}/">Cancel</a></p>
        </form>"#,
        title = escape(&track_title(&track)),
    );
    Ok(Html(layout("Delete track", &body)))
}

/// POST /tracks/{id}/delete/
pub async fn delete_track(
    State(state): State<AppState>,
    PageTrackId(id): PageTrackId,
) -> PageResult<Redirect> {
    if !TrackRepo::delete(&state.pool, id).await? {
        return Err(CoreError::NotFound { entity: "Track", id }.into());
    }
    tracing::info!(id, "Track deleted from form");
    Ok(Redirect::to(LIST_URL))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_track(state: &AppState, id: DbId) -> PageResult<Track> {
    TrackRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::NotFound { entity: "Track", id }.into())
}

fn track_title(track: &Track) -> String {
    format!("{} - {}", track.track_name, track.artist_name)
}

fn today() -> chrono::NaiveDate {
    chrono::Utc::now().date_naive()
}
