use serde::{Deserialize, Serialize};

pub mod feedback;
pub mod filter;
pub mod movie;

pub use feedback::{FeedbackEntry, FeedbackSummary, Verdict};
pub use filter::{FilterIntent, Genre, RatingRange, SearchRefinement, UnknownGenre, YearRange};
pub use movie::{Catalog, MovieRecord};

/// A catalog record selected by a search or recommendation
///
/// `score` is the cosine similarity for recommendations (or the title match
/// ratio for a fuzzy match); plain filter results are unscored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedResult<'a> {
    pub position: usize,
    pub movie: &'a MovieRecord,
    pub score: Option<f64>,
}

// ============================================================================
// Response Types
// ============================================================================

/// Whether a request produced anything
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ResultStatus {
    Found,
    Empty,
}

impl ResultStatus {
    pub fn from_count(count: usize) -> Self {
        if count == 0 {
            ResultStatus::Empty
        } else {
            ResultStatus::Found
        }
    }
}

/// A "more like this" entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimilarTitle {
    pub title: String,
    pub year: i32,
    pub score: f64,
}

impl From<RankedResult<'_>> for SimilarTitle {
    fn from(result: RankedResult<'_>) -> Self {
        Self {
            title: result.movie.title.clone(),
            year: result.movie.year,
            score: result.score.unwrap_or_default(),
        }
    }
}

/// A search hit returned to the client, with its similar titles
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieResponse {
    pub position: usize,
    pub title: String,
    pub year: i32,
    pub rating: f64,
    pub description: String,
    pub cover: String,
    pub similar: Vec<SimilarTitle>,
}

impl MovieResponse {
    pub fn new(result: RankedResult<'_>, similar: Vec<SimilarTitle>) -> Self {
        let movie = result.movie;
        Self {
            position: result.position,
            title: movie.title.clone(),
            year: movie.year,
            rating: movie.rating,
            description: movie.description.clone(),
            cover: movie.cover.clone(),
            similar,
        }
    }
}

/// Response for a free-text movie search
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResponse {
    pub query: String,
    pub intent: FilterIntent,
    /// Year window applied, present only when the query mentions a year
    pub year_bounds: Option<YearRange>,
    /// Rating window applied, present only when the query mentions a rating
    pub rating_bounds: Option<RatingRange>,
    pub genres: Vec<Genre>,
    pub status: ResultStatus,
    pub results: Vec<MovieResponse>,
}

/// Response for a "more like this" lookup
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationResponse {
    pub query: String,
    /// Catalog title the query resolved to, `None` when nothing was close enough
    pub matched_title: Option<String>,
    pub status: ResultStatus,
    pub recommendations: Vec<SimilarTitle>,
}
