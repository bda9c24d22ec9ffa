use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{FilterIntent, Genre, RatingRange};

/// Either a full year (19xx / 20xx) or two digits followed by a decade marker
static YEAR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(19\d{2}|20\d{2})|(\d{2})\s?(?:s|st)").expect("year pattern is valid")
});

/// Century applied to two-digit decades ("90s" -> 1990). Always the 1900s.
const DECADE_CENTURY: i32 = 1900;

/// Rating triggers in priority order; the first one found in the query wins
const RATING_TRIGGERS: [(&[&str], RatingRange); 3] = [
    (&["top", "best"], RatingRange::new(8.0, 10.0)),
    (
        &["high rating", "bien noté", "well rated"],
        RatingRange::new(7.0, 10.0),
    ),
    (&["low rating"], RatingRange::new(0.0, 4.0)),
];

/// Turns a free-text query into a structured [`FilterIntent`]
///
/// Total over every input: fragments that do not match anything simply leave
/// the corresponding field empty.
pub fn parse_query(query: &str) -> FilterIntent {
    let query = query.to_lowercase();

    let intent = FilterIntent {
        year_candidates: extract_years(&query),
        rating_range: extract_rating(&query),
        genre: extract_genre(&query),
        free_text: query,
    };

    tracing::debug!(?intent, "Parsed query");
    intent
}

fn extract_years(query: &str) -> Option<BTreeSet<i32>> {
    let years: BTreeSet<i32> = YEAR_REGEX
        .captures_iter(query)
        .filter_map(|caps| {
            if let Some(full) = caps.get(1) {
                full.as_str().parse().ok()
            } else {
                caps.get(2)
                    .and_then(|decade| decade.as_str().parse::<i32>().ok())
                    .map(|decade| DECADE_CENTURY + decade)
            }
        })
        .collect();

    (!years.is_empty()).then_some(years)
}

fn extract_rating(query: &str) -> Option<RatingRange> {
    RATING_TRIGGERS
        .iter()
        .find(|(phrases, _)| phrases.iter().any(|phrase| query.contains(phrase)))
        .map(|(_, range)| *range)
}

/// Last genre of the vocabulary found in the query
fn extract_genre(query: &str) -> Option<Genre> {
    Genre::ALL
        .into_iter()
        .filter(|genre| query.contains(genre.keyword()))
        .last()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn years(query: &str) -> Vec<i32> {
        parse_query(query)
            .year_candidates
            .map(|set| set.into_iter().collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_empty_query() {
        let intent = parse_query("");
        assert_eq!(intent, FilterIntent::keywords(""));
    }

    #[test]
    fn test_free_text_is_lowercased_query() {
        let intent = parse_query("Best ACTION Movies of the 90s");
        assert_eq!(intent.free_text, "best action movies of the 90s");
    }

    #[test]
    fn test_full_years() {
        assert_eq!(years("movies from 1994"), vec![1994]);
        assert_eq!(years("between 2020-2025"), vec![2020, 2025]);
        assert_eq!(years("released in 1899"), Vec::<i32>::new());
    }

    #[test]
    fn test_decades_map_to_nineteen_hundreds() {
        assert_eq!(years("90s thrillers"), vec![1990]);
        assert_eq!(years("05s"), vec![1905]);
        assert_eq!(years("the 20s"), vec![1920]);
        assert_eq!(years("80 s movies"), vec![1980]);
    }

    #[test]
    fn test_full_year_with_decade_suffix() {
        assert_eq!(years("the 1980s"), vec![1980]);
    }

    #[test]
    fn test_multiple_years_accumulate() {
        assert_eq!(years("70s or 1999 or 1999"), vec![1970, 1999]);
    }

    #[test]
    fn test_no_year() {
        assert!(parse_query("space opera").year_candidates.is_none());
    }

    #[test]
    fn test_rating_triggers() {
        assert_eq!(
            parse_query("a well rated comedy").rating_range,
            Some(RatingRange::new(7.0, 10.0))
        );
        assert_eq!(
            parse_query("Film bien noté").rating_range,
            Some(RatingRange::new(7.0, 10.0))
        );
        assert_eq!(
            parse_query("best horror").rating_range,
            Some(RatingRange::new(8.0, 10.0))
        );
        assert_eq!(
            parse_query("low rating drama").rating_range,
            Some(RatingRange::new(0.0, 4.0))
        );
        assert_eq!(parse_query("drama").rating_range, None);
    }

    #[test]
    fn test_rating_trigger_priority() {
        assert_eq!(
            parse_query("top rated, high rating").rating_range,
            Some(RatingRange::new(8.0, 10.0))
        );
        assert_eq!(
            parse_query("high rating but low rating").rating_range,
            Some(RatingRange::new(7.0, 10.0))
        );
    }

    #[test]
    fn test_genre_extraction() {
        assert_eq!(parse_query("a HORROR night").genre, Some(Genre::Horror));
        assert_eq!(parse_query("nothing here").genre, None);
    }

    #[test]
    fn test_last_genre_in_vocabulary_order_wins() {
        // Vocabulary order is action, ..., crime, adventure
        assert_eq!(
            parse_query("adventure and action").genre,
            Some(Genre::Adventure)
        );
        assert_eq!(parse_query("crime comedy").genre, Some(Genre::Crime));
    }

    #[test]
    fn test_parse_is_deterministic() {
        let query = "Top 80s action in 1985";
        assert_eq!(parse_query(query), parse_query(query));
    }
}
