pub mod catalog;
pub mod feedback;
pub mod matcher;
pub mod query_parser;
pub mod recommendations;
pub mod search;
pub mod similarity;

pub use catalog::{load_catalog, read_catalog, CatalogError};
pub use feedback::FeedbackCollector;
pub use matcher::{SequenceMatcher, StringSimilarityMatcher};
pub use query_parser::parse_query;
pub use recommendations::{recommend, recommend_with, Recommendation};
pub use search::search_movies;
pub use similarity::{SimilarityIndex, TermVectorIndex};
