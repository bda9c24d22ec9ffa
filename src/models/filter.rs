use std::{collections::BTreeSet, fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Closed genre vocabulary recognised in queries and genre selections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Genre {
    Action,
    Comedy,
    Thriller,
    Romance,
    Horror,
    Animation,
    Drama,
    Fantasy,
    Documentary,
    Crime,
    Adventure,
}

impl Genre {
    /// Every genre, in the order queries are scanned
    pub const ALL: [Genre; 11] = [
        Genre::Action,
        Genre::Comedy,
        Genre::Thriller,
        Genre::Romance,
        Genre::Horror,
        Genre::Animation,
        Genre::Drama,
        Genre::Fantasy,
        Genre::Documentary,
        Genre::Crime,
        Genre::Adventure,
    ];

    /// Lowercase keyword matched against query and description text
    pub fn keyword(&self) -> &'static str {
        match self {
            Genre::Action => "action",
            Genre::Comedy => "comedy",
            Genre::Thriller => "thriller",
            Genre::Romance => "romance",
            Genre::Horror => "horror",
            Genre::Animation => "animation",
            Genre::Drama => "drama",
            Genre::Fantasy => "fantasy",
            Genre::Documentary => "documentary",
            Genre::Crime => "crime",
            Genre::Adventure => "adventure",
        }
    }

    /// Capitalised name shown in genre pickers
    pub fn display_name(&self) -> &'static str {
        match self {
            Genre::Action => "Action",
            Genre::Comedy => "Comedy",
            Genre::Thriller => "Thriller",
            Genre::Romance => "Romance",
            Genre::Horror => "Horror",
            Genre::Animation => "Animation",
            Genre::Drama => "Drama",
            Genre::Fantasy => "Fantasy",
            Genre::Documentary => "Documentary",
            Genre::Crime => "Crime",
            Genre::Adventure => "Adventure",
        }
    }
}

impl Display for Genre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[derive(Debug, Error, PartialEq)]
#[error("Unknown genre: {0}")]
pub struct UnknownGenre(pub String);

impl FromStr for Genre {
    type Err = UnknownGenre;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Genre::ALL
            .into_iter()
            .find(|genre| genre.keyword() == needle)
            .ok_or_else(|| UnknownGenre(s.trim().to_string()))
    }
}

/// Inclusive rating window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingRange {
    pub min: f64,
    pub max: f64,
}

impl RatingRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, rating: f64) -> bool {
        rating >= self.min && rating <= self.max
    }
}

/// Inclusive year window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

impl YearRange {
    pub fn contains(&self, year: i32) -> bool {
        year >= self.min && year <= self.max
    }
}

/// Structured reading of a free-text query
///
/// An absent field means "no constraint from that axis". `free_text` is
/// always populated with the lowercased query, even when it is empty.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterIntent {
    /// Every year mentioned in the query; the search engine decides how to use them
    pub year_candidates: Option<BTreeSet<i32>>,
    pub rating_range: Option<RatingRange>,
    pub genre: Option<Genre>,
    pub free_text: String,
}

impl FilterIntent {
    /// Intent carrying only a keyword constraint
    pub fn keywords(free_text: impl Into<String>) -> Self {
        Self {
            free_text: free_text.into(),
            ..Default::default()
        }
    }
}

/// Caller-supplied refinements applied alongside a parsed intent
///
/// Year and rating overrides only take effect when the matching axis of the
/// intent is active. Unset bounds fall back to the derived defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SearchRefinement {
    pub year_min: Option<i32>,
    pub year_max: Option<i32>,
    pub rating_min: Option<f64>,
    pub rating_max: Option<f64>,
    /// Genres that must appear in the description (any of them)
    #[serde(default)]
    pub genres: Vec<Genre>,
}

impl SearchRefinement {
    /// Effective year window given the derived default span
    pub fn year_bounds(&self, default: Option<YearRange>) -> Option<YearRange> {
        let min = self.year_min.or(default.map(|span| span.min))?;
        let max = self.year_max.or(default.map(|span| span.max))?;
        Some(YearRange { min, max })
    }

    /// Effective rating window given the parsed range
    pub fn rating_bounds(&self, parsed: RatingRange) -> RatingRange {
        RatingRange {
            min: self.rating_min.unwrap_or(parsed.min),
            max: self.rating_max.unwrap_or(parsed.max),
        }
    }
}
