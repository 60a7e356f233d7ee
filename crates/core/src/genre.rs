//! Genre text handling.
//!
//! Genres are stored per track as one comma-separated string
//! (e.g. `"pop, dance pop"`). Reports split that text into normalised tokens
//! and count them in memory.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::Serialize;

/// Split raw genre text into trimmed, lower-cased, non-empty tokens.
pub fn split_genres(raw: &str) -> impl Iterator<Item = String> + '_ {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
}

/// One row of a genre frequency report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenreCount {
    pub genre: String,
    pub count: i64,
}

/// Frequency counter that remembers the order genres were first seen.
///
/// Ties in [`GenreTally::top`] fall back to that discovery order, so callers
/// should feed genre strings in a deterministic order (e.g. by track id).
#[derive(Debug, Default)]
pub struct GenreTally {
    counts: IndexMap<String, i64>,
}

impl GenreTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every token of one track's genre text.
    pub fn add(&mut self, raw: &str) {
        for token in split_genres(raw) {
            *self.counts.entry(token).or_insert(0) += 1;
        }
    }

    /// Number of distinct genres seen.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// The `n` most frequent genres, count descending, ties in discovery order.
    pub fn top(&self, n: usize) -> Vec<GenreCount> {
        let mut rows: Vec<GenreCount> = self
            .counts
            .iter()
            .map(|(genre, &count)| GenreCount {
                genre: genre.clone(),
                count,
            })
            .collect();
        // Stable sort keeps discovery order among equal counts.
        rows.sort_by(|a, b| b.count.cmp(&a.count));
        rows.truncate(n);
        rows
    }
}

impl<'a> FromIterator<&'a str> for GenreTally {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut tally = GenreTally::new();
        for raw in iter {
            tally.add(raw);
        }
        tally
    }
}

/// Every distinct genre token across `raws`, sorted alphabetically.
pub fn distinct_genres<'a>(raws: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    raws.into_iter()
        .flat_map(split_genres)
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect()
}
