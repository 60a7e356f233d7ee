//! SQL predicate builder for track queries.
//!
//! [`TrackPredicate`] appends a `WHERE` clause to a [`QueryBuilder`] and
//! exposes one method per filter kind (substring, case-insensitive equality,
//! lower bound, year, date range, free-text search). Every value is bound as
//! a parameter; column names only ever come from the constants below.

use std::fmt::Write as _;

use chrono::NaiveDate;
use sqlx::{Encode, Postgres, QueryBuilder, Type};
use tracklist_core::filter::{contains_pattern, SortKey, TrackFilter};
use tracklist_core::insights::CleanHitsFilter;

pub const COL_TRACK_NAME: &str = "track_name";
pub const COL_ARTIST_NAME: &str = "artist_name";
pub const COL_ALBUM_NAME: &str = "album_name";
pub const COL_ARTIST_GENRES: &str = "artist_genres";
pub const COL_ALBUM_TYPE: &str = "album_type";
pub const COL_EXPLICIT: &str = "explicit";
pub const COL_TRACK_POPULARITY: &str = "track_popularity";
pub const COL_ARTIST_FOLLOWERS: &str = "artist_followers";
pub const COL_RELEASE_DATE: &str = "album_release_date";

/// Columns scanned by free-text search.
pub const SEARCH_COLUMNS: [&str; 4] = [
    COL_TRACK_NAME,
    COL_ARTIST_NAME,
    COL_ALBUM_NAME,
    COL_ARTIST_GENRES,
];

/// A conjunction of predicates being appended to a query.
///
/// Starts with `WHERE TRUE` so every clause can uniformly prepend `AND`.
pub struct TrackPredicate<'q, 'args> {
    qb: &'q mut QueryBuilder<'args, Postgres>,
}

impl<'q, 'args> TrackPredicate<'q, 'args> {
    pub fn new(qb: &'q mut QueryBuilder<'args, Postgres>) -> Self {
        qb.push(" WHERE TRUE");
        Self { qb }
    }

    /// `column ILIKE '%value%'`, with `LIKE` metacharacters escaped.
    pub fn contains(&mut self, column: &'static str, value: &str) -> &mut Self {
        self.qb
            .push(format_args!(" AND {column} ILIKE "))
            .push_bind(contains_pattern(value));
        self
    }

    /// Case-insensitive equality.
    pub fn iexact(&mut self, column: &'static str, value: &str) -> &mut Self {
        self.qb
            .push(format_args!(" AND LOWER({column}) = LOWER("))
            .push_bind(value.to_string())
            .push(")");
        self
    }

    pub fn equals<T>(&mut self, column: &'static str, value: T) -> &mut Self
    where
        T: 'args + Encode<'args, Postgres> + Type<Postgres> + Send,
    {
        self.qb
            .push(format_args!(" AND {column} = "))
            .push_bind(value);
        self
    }

    /// Inclusive lower bound.
    pub fn at_least<T>(&mut self, column: &'static str, value: T) -> &mut Self
    where
        T: 'args + Encode<'args, Postgres> + Type<Postgres> + Send,
    {
        self.qb
            .push(format_args!(" AND {column} >= "))
            .push_bind(value);
        self
    }

    /// Inclusive upper bound.
    pub fn at_most<T>(&mut self, column: &'static str, value: T) -> &mut Self
    where
        T: 'args + Encode<'args, Postgres> + Type<Postgres> + Send,
    {
        self.qb
            .push(format_args!(" AND {column} <= "))
            .push_bind(value);
        self
    }

    /// Year component of a date column compared with `op` (`=`, `>=`, `<=`).
    fn year_cmp(&mut self, column: &'static str, op: &'static str, year: i32) -> &mut Self {
        self.qb
            .push(format_args!(" AND EXTRACT(YEAR FROM {column})::int {op} "))
            .push_bind(year);
        self
    }

    pub fn year_equals(&mut self, column: &'static str, year: i32) -> &mut Self {
        self.year_cmp(column, "=", year)
    }

    pub fn year_at_least(&mut self, column: &'static str, year: i32) -> &mut Self {
        self.year_cmp(column, ">=", year)
    }

    pub fn year_at_most(&mut self, column: &'static str, year: i32) -> &mut Self {
        self.year_cmp(column, "<=", year)
    }

    /// Inclusive date range; either end may be open.
    pub fn date_between(
        &mut self,
        column: &'static str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> &mut Self {
        if let Some(from) = from {
            self.at_least(column, from);
        }
        if let Some(to) = to {
            self.at_most(column, to);
        }
        self
    }

    /// Substring match against any of [`SEARCH_COLUMNS`].
    pub fn search(&mut self, value: &str) -> &mut Self {
        let pattern = contains_pattern(value);
        self.qb.push(" AND (");
        for (i, column) in SEARCH_COLUMNS.iter().enumerate() {
            if i > 0 {
                self.qb.push(" OR ");
            }
            self.qb
                .push(format_args!("{column} ILIKE "))
                .push_bind(pattern.clone());
        }
        self.qb.push(")");
        self
    }

    /// Apply every active clause of a list filter.
    pub fn track_filter(&mut self, filter: &TrackFilter) -> &mut Self {
        if let Some(search) = &filter.search {
            self.search(search);
        }
        if let Some(artist) = &filter.artist {
            self.contains(COL_ARTIST_NAME, artist);
        }
        if let Some(album_type) = &filter.album_type {
            self.iexact(COL_ALBUM_TYPE, album_type);
        }
        if let Some(genre) = &filter.genre {
            self.contains(COL_ARTIST_GENRES, genre);
        }
        if let Some(explicit) = filter.explicit {
            self.equals(COL_EXPLICIT, explicit);
        }
        if let Some(min) = filter.min_popularity {
            self.at_least(COL_TRACK_POPULARITY, min);
        }
        if let Some(min) = filter.min_followers {
            self.at_least(COL_ARTIST_FOLLOWERS, min);
        }
        if let Some(year) = filter.year {
            self.year_equals(COL_RELEASE_DATE, year);
        }
        self.date_between(COL_RELEASE_DATE, filter.from_date, filter.to_date)
    }

    /// Non-explicit tracks at or above the popularity threshold, narrowed by
    /// the optional genre, album type and release-year range.
    pub fn clean_hits(&mut self, filter: &CleanHitsFilter) -> &mut Self {
        self.equals(COL_EXPLICIT, false)
            .at_least(COL_TRACK_POPULARITY, filter.min_popularity);
        if let Some(genre) = &filter.genre {
            self.contains(COL_ARTIST_GENRES, genre);
        }
        if let Some(album_type) = &filter.album_type {
            self.iexact(COL_ALBUM_TYPE, album_type);
        }
        if let Some(from) = filter.year_from {
            self.year_at_least(COL_RELEASE_DATE, from);
        }
        if let Some(to) = filter.year_to {
            self.year_at_most(COL_RELEASE_DATE, to);
        }
        self
    }
}

/// Append `ORDER BY` for the given keys, with `id` as the final tiebreaker.
pub fn push_order_by(qb: &mut QueryBuilder<'_, Postgres>, keys: &[SortKey]) {
    let mut clause = String::from(" ORDER BY ");
    for key in keys {
        let direction = if key.descending { "DESC" } else { "ASC" };
        let _ = write!(clause, "{} {direction}, ", key.field.column());
    }
    clause.push_str("id");
    qb.push(clause);
}
