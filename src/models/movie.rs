use serde::{Deserialize, Serialize};

use super::YearRange;

/// A single catalog entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieRecord {
    /// Display title, never empty. Not guaranteed unique across the catalog
    pub title: String,
    /// Release year
    pub year: i32,
    /// Rating on a 0.0 - 10.0 scale
    pub rating: f64,
    /// Plot summary, used for keyword search and for the similarity index
    pub description: String,
    /// Opaque poster reference (URL or path), passed through untouched
    pub cover: String,
}

impl MovieRecord {
    /// Creates a new movie record
    pub fn new(
        title: impl Into<String>,
        year: i32,
        rating: f64,
        description: impl Into<String>,
        cover: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            year,
            rating,
            description: description.into(),
            cover: cover.into(),
        }
    }
}

/// Immutable, ordered table of movies
///
/// Records are addressed by their row position. The catalog is built once at
/// startup and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    movies: Vec<MovieRecord>,
}

impl Catalog {
    pub fn new(movies: Vec<MovieRecord>) -> Self {
        Self { movies }
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Returns the record at a row position
    pub fn get(&self, position: usize) -> Option<&MovieRecord> {
        self.movies.get(position)
    }

    pub fn movies(&self) -> &[MovieRecord] {
        &self.movies
    }

    /// Iterates over `(position, record)` pairs in catalog order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &MovieRecord)> {
        self.movies.iter().enumerate()
    }

    /// Full year span covered by the catalog, `None` when empty
    pub fn year_span(&self) -> Option<YearRange> {
        let min = self.movies.iter().map(|m| m.year).min()?;
        let max = self.movies.iter().map(|m| m.year).max()?;
        Some(YearRange { min, max })
    }
}
