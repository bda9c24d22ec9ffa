use crate::models::{Catalog, FilterIntent, RankedResult, RatingRange, SearchRefinement, YearRange};

/// Maximum number of search results returned
pub const SEARCH_LIMIT: usize = 15;

/// Year window used when the caller does not override it: the catalog's full span
pub fn default_year_bounds(catalog: &Catalog) -> Option<YearRange> {
    catalog.year_span()
}

/// Year window the year stage applies, `None` when the stage is inactive
pub fn effective_year_bounds(
    intent: &FilterIntent,
    catalog: &Catalog,
    refinement: &SearchRefinement,
) -> Option<YearRange> {
    intent.year_candidates.as_ref()?;
    refinement.year_bounds(default_year_bounds(catalog))
}

/// Rating window the rating stage applies, `None` when the stage is inactive
pub fn effective_rating_bounds(
    intent: &FilterIntent,
    refinement: &SearchRefinement,
) -> Option<RatingRange> {
    intent
        .rating_range
        .map(|parsed| refinement.rating_bounds(parsed))
}

/// Narrows the catalog by an intent and caller refinements
///
/// Stages run in sequence, each one filtering what the previous stage left:
/// year window, rating window, selected genres, then the keyword stage which
/// always runs. Catalog order is preserved and the result is truncated to
/// [`SEARCH_LIMIT`]. An empty result is a normal outcome.
pub fn search_movies<'a>(
    intent: &FilterIntent,
    catalog: &'a Catalog,
    refinement: &SearchRefinement,
) -> Vec<RankedResult<'a>> {
    let mut remaining: Vec<RankedResult<'a>> = catalog
        .iter()
        .map(|(position, movie)| RankedResult {
            position,
            movie,
            score: None,
        })
        .collect();

    if let Some(years) = effective_year_bounds(intent, catalog, refinement) {
        remaining.retain(|result| years.contains(result.movie.year));
        tracing::debug!(?years, remaining = remaining.len(), "Applied year stage");
    }

    if let Some(ratings) = effective_rating_bounds(intent, refinement) {
        remaining.retain(|result| ratings.contains(result.movie.rating));
        tracing::debug!(?ratings, remaining = remaining.len(), "Applied rating stage");
    }

    if !refinement.genres.is_empty() {
        remaining.retain(|result| {
            let description = result.movie.description.to_lowercase();
            refinement
                .genres
                .iter()
                .any(|genre| description.contains(genre.keyword()))
        });
        tracing::debug!(
            genres = ?refinement.genres,
            remaining = remaining.len(),
            "Applied genre stage"
        );
    }

    let keywords = intent.free_text.to_lowercase();
    remaining.retain(|result| {
        result.movie.title.to_lowercase().contains(&keywords)
            || result.movie.description.to_lowercase().contains(&keywords)
    });

    remaining.truncate(SEARCH_LIMIT);
    tracing::debug!(results = remaining.len(), "Search completed");
    remaining
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::models::{Genre, MovieRecord};

    fn sample_catalog() -> Catalog {
        Catalog::new(vec![
            MovieRecord::new("Heat", 1995, 8.3, "A crime thriller about a heist crew", ""),
            MovieRecord::new("Airplane!", 1980, 7.7, "A disaster comedy in the sky", ""),
            MovieRecord::new("Alien", 1979, 8.5, "Horror aboard a space freighter", ""),
            MovieRecord::new("Catwoman", 2004, 3.4, "An action heroine with feline powers", ""),
            MovieRecord::new("Spirited Away", 2001, 8.6, "An animation fantasy adventure", ""),
        ])
    }

    fn titles(results: &[RankedResult<'_>]) -> Vec<String> {
        results.iter().map(|r| r.movie.title.clone()).collect()
    }

    #[test]
    fn test_empty_intent_returns_catalog_prefix() {
        let catalog = Catalog::new(
            (0..20)
                .map(|i| MovieRecord::new(format!("Movie {i}"), 2000, 5.0, "plot", ""))
                .collect(),
        );
        let results = search_movies(&FilterIntent::keywords(""), &catalog, &SearchRefinement::default());

        assert_eq!(results.len(), SEARCH_LIMIT);
        let positions: Vec<usize> = results.iter().map(|r| r.position).collect();
        assert_eq!(positions, (0..SEARCH_LIMIT).collect::<Vec<_>>());
        assert!(results.iter().all(|r| r.score.is_none()));
    }

    #[test]
    fn test_keyword_matches_title_or_description_case_insensitively() {
        let catalog = sample_catalog();
        let refinement = SearchRefinement::default();

        let results = search_movies(&FilterIntent::keywords("alien"), &catalog, &refinement);
        assert_eq!(titles(&results), vec!["Alien"]);

        let results = search_movies(&FilterIntent::keywords("HEIST"), &catalog, &refinement);
        assert_eq!(titles(&results), vec!["Heat"]);
    }

    #[test]
    fn test_no_match_is_empty() {
        let catalog = sample_catalog();
        let results = search_movies(
            &FilterIntent::keywords("zzz-nothing"),
            &catalog,
            &SearchRefinement::default(),
        );
        assert!(results.is_empty());
    }

    #[test]
    fn test_year_stage_defaults_to_full_span() {
        let catalog = sample_catalog();
        let intent = FilterIntent {
            year_candidates: Some(BTreeSet::from([1990])),
            ..FilterIntent::keywords("")
        };

        let results = search_movies(&intent, &catalog, &SearchRefinement::default());
        assert_eq!(results.len(), catalog.len());
        assert_eq!(
            effective_year_bounds(&intent, &catalog, &SearchRefinement::default()),
            Some(YearRange { min: 1979, max: 2004 })
        );
    }

    #[test]
    fn test_year_override_only_applies_when_year_stage_is_active() {
        let catalog = sample_catalog();
        let refinement = SearchRefinement {
            year_min: Some(1990),
            year_max: Some(2002),
            ..Default::default()
        };

        let inactive = search_movies(&FilterIntent::keywords(""), &catalog, &refinement);
        assert_eq!(inactive.len(), catalog.len());

        let intent = FilterIntent {
            year_candidates: Some(BTreeSet::from([1995])),
            ..FilterIntent::keywords("")
        };
        let active = search_movies(&intent, &catalog, &refinement);
        assert_eq!(titles(&active), vec!["Heat", "Spirited Away"]);
    }

    #[test]
    fn test_rating_stage_uses_parsed_range_then_override() {
        let catalog = sample_catalog();
        let intent = FilterIntent {
            rating_range: Some(RatingRange::new(8.0, 10.0)),
            ..FilterIntent::keywords("")
        };

        let results = search_movies(&intent, &catalog, &SearchRefinement::default());
        assert_eq!(titles(&results), vec!["Heat", "Alien", "Spirited Away"]);

        let refinement = SearchRefinement {
            rating_max: Some(8.4),
            ..Default::default()
        };
        let results = search_movies(&intent, &catalog, &refinement);
        assert_eq!(titles(&results), vec!["Heat"]);
    }

    #[test]
    fn test_genre_selection_is_any_of() {
        let catalog = sample_catalog();
        let refinement = SearchRefinement {
            genres: vec![Genre::Comedy, Genre::Horror],
            ..Default::default()
        };

        let results = search_movies(&FilterIntent::keywords(""), &catalog, &refinement);
        assert_eq!(titles(&results), vec!["Airplane!", "Alien"]);
    }

    #[test]
    fn test_parsed_genre_alone_does_not_filter() {
        let catalog = sample_catalog();
        let intent = FilterIntent {
            genre: Some(Genre::Horror),
            ..FilterIntent::keywords("")
        };
        let results = search_movies(&intent, &catalog, &SearchRefinement::default());
        assert_eq!(results.len(), catalog.len());
    }

    #[test]
    fn test_stages_are_conjunctive() {
        let catalog = sample_catalog();
        let intent = FilterIntent {
            rating_range: Some(RatingRange::new(8.0, 10.0)),
            ..FilterIntent::keywords("a")
        };
        let refinement = SearchRefinement {
            genres: vec![Genre::Fantasy, Genre::Crime, Genre::Action],
            ..Default::default()
        };

        let results = search_movies(&intent, &catalog, &refinement);
        assert_eq!(titles(&results), vec!["Heat", "Spirited Away"]);
        for result in &results {
            assert!(result.movie.rating >= 8.0);
        }
    }

    #[test]
    fn test_search_is_idempotent() {
        let catalog = sample_catalog();
        let intent = FilterIntent::keywords("a");
        let refinement = SearchRefinement::default();
        assert_eq!(
            search_movies(&intent, &catalog, &refinement),
            search_movies(&intent, &catalog, &refinement)
        );
    }
}
