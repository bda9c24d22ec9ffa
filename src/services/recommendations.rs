use crate::{
    models::{Catalog, RankedResult},
    services::{
        matcher::{SequenceMatcher, StringSimilarityMatcher},
        similarity::TermVectorIndex,
    },
};

/// Minimum title match ratio for a reference title to resolve
pub const MATCH_THRESHOLD: f64 = 0.6;

/// Maximum number of similar titles returned
pub const RECOMMENDATION_LIMIT: usize = 5;

/// Outcome of a "more like this" lookup
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation<'a> {
    /// Catalog row the reference title resolved to, scored by match ratio
    pub matched: Option<RankedResult<'a>>,
    /// Nearest neighbours of the matched row, scored by cosine similarity
    pub similar: Vec<RankedResult<'a>>,
}

/// Resolves a free-form title to the closest catalog row
///
/// Returns the candidate with the highest ratio at or above
/// [`MATCH_THRESHOLD`]; ties go to the earliest row.
pub fn best_match<'a, M>(matcher: &M, title: &str, catalog: &'a Catalog) -> Option<RankedResult<'a>>
where
    M: StringSimilarityMatcher + ?Sized,
{
    catalog
        .iter()
        .map(|(position, movie)| RankedResult {
            position,
            movie,
            score: Some(matcher.ratio(&movie.title, title)),
        })
        .filter(|candidate| candidate.score.unwrap_or_default() >= MATCH_THRESHOLD)
        .fold(None, |best: Option<RankedResult<'a>>, candidate| match best {
            Some(best) if best.score >= candidate.score => Some(best),
            _ => Some(candidate),
        })
}

/// Full recommendation lookup with explicit collaborators
pub fn recommend_with<'a, M, I>(
    matcher: &M,
    index: &I,
    title: &str,
    catalog: &'a Catalog,
) -> Recommendation<'a>
where
    M: StringSimilarityMatcher + ?Sized,
    I: TermVectorIndex + ?Sized,
{
    let Some(matched) = best_match(matcher, title, catalog) else {
        tracing::debug!(title, "No catalog title close enough");
        return Recommendation {
            matched: None,
            similar: Vec::new(),
        };
    };

    let similar = index
        .similar_to(matched.position, RECOMMENDATION_LIMIT)
        .into_iter()
        .filter_map(|(position, score)| {
            catalog.get(position).map(|movie| RankedResult {
                position,
                movie,
                score: Some(score),
            })
        })
        .collect::<Vec<_>>();

    tracing::debug!(
        title,
        matched = %matched.movie.title,
        similar_count = similar.len(),
        "Resolved recommendations"
    );

    Recommendation {
        matched: Some(matched),
        similar,
    }
}

/// Up to [`RECOMMENDATION_LIMIT`] movies similar to the catalog title closest
/// to `title`, best first. Empty when no title clears the match threshold.
pub fn recommend<'a, I>(title: &str, catalog: &'a Catalog, index: &I) -> Vec<RankedResult<'a>>
where
    I: TermVectorIndex + ?Sized,
{
    recommend_with(&SequenceMatcher, index, title, catalog).similar
}
