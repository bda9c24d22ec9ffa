//! Content similarity over movie descriptions.
//!
//! Each description becomes a TF-IDF vector over the vocabulary of the whole
//! catalog: raw term counts weighted by a smoothed inverse document frequency
//! `ln((1 + n) / (1 + df)) + 1`, then scaled to unit length. Similarity is the
//! cosine between two vectors.
//!
//! Weights are corpus-relative, so the index is built once from a fixed
//! catalog and never updated.

use std::{
    cmp::Ordering,
    collections::{BTreeMap, HashMap},
};

use crate::models::Catalog;

pub mod tokenizer;

/// Nearest-neighbour lookups over catalog rows
pub trait TermVectorIndex: Send + Sync {
    /// Number of indexed rows
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cosine similarity between two rows, `None` if either is out of range
    fn similarity(&self, a: usize, b: usize) -> Option<f64>;

    /// Up to `k` other rows most similar to `position`, as `(position, score)`
    /// in non-increasing score order. The row itself is never included.
    fn similar_to(&self, position: usize, k: usize) -> Vec<(usize, f64)>;
}

/// Sparse unit-length vector, entries sorted by term id
#[derive(Debug, Clone, Default, PartialEq)]
struct TermVector {
    weights: Vec<(usize, f64)>,
}

impl TermVector {
    fn normalized(mut weights: Vec<(usize, f64)>) -> Self {
        weights.sort_by_key(|(term, _)| *term);

        let norm = weights.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, weight) in &mut weights {
                *weight /= norm;
            }
        } else {
            weights.clear();
        }

        Self { weights }
    }

    /// Cosine with another unit vector. Zero vectors score 0 against everything.
    fn cosine(&self, other: &TermVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut dot = 0.0;

        while i < self.weights.len() && j < other.weights.len() {
            let (left_term, left) = self.weights[i];
            let (right_term, right) = other.weights[j];
            match left_term.cmp(&right_term) {
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
                Ordering::Equal => {
                    dot += left * right;
                    i += 1;
                    j += 1;
                }
            }
        }

        dot.clamp(-1.0, 1.0)
    }
}

/// TF-IDF index over every description in a catalog
#[derive(Debug, Clone, Default)]
pub struct SimilarityIndex {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    vectors: Vec<TermVector>,
}

impl SimilarityIndex {
    /// Builds the index, one vector per catalog row
    pub fn build(catalog: &Catalog) -> Self {
        let documents: Vec<HashMap<String, usize>> = catalog
            .movies()
            .iter()
            .map(|movie| tokenizer::term_counts(&movie.description))
            .collect();

        // Sorted so term ids are stable for a given catalog
        let mut document_frequency: BTreeMap<&str, usize> = BTreeMap::new();
        for counts in &documents {
            for term in counts.keys() {
                *document_frequency.entry(term.as_str()).or_insert(0) += 1;
            }
        }

        let document_count = documents.len() as f64;
        let idf: Vec<f64> = document_frequency
            .values()
            .map(|&df| ((1.0 + document_count) / (1.0 + df as f64)).ln() + 1.0)
            .collect();
        let vocabulary: HashMap<String, usize> = document_frequency
            .keys()
            .enumerate()
            .map(|(id, term)| (term.to_string(), id))
            .collect();

        let vectors: Vec<TermVector> = documents
            .iter()
            .map(|counts| {
                let weights = counts
                    .iter()
                    .filter_map(|(term, &count)| {
                        let id = *vocabulary.get(term)?;
                        Some((id, count as f64 * idf[id]))
                    })
                    .collect();
                TermVector::normalized(weights)
            })
            .collect();

        tracing::info!(
            documents = vectors.len(),
            vocabulary = vocabulary.len(),
            "Similarity index built"
        );

        Self {
            vocabulary,
            idf,
            vectors,
        }
    }

    /// Number of distinct indexed terms
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Inverse document frequency of a term, `None` if it is not indexed
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.vocabulary.get(term).map(|&id| self.idf[id])
    }
}

impl TermVectorIndex for SimilarityIndex {
    fn len(&self) -> usize {
        self.vectors.len()
    }

    fn similarity(&self, a: usize, b: usize) -> Option<f64> {
        Some(self.vectors.get(a)?.cosine(self.vectors.get(b)?))
    }

    fn similar_to(&self, position: usize, k: usize) -> Vec<(usize, f64)> {
        let Some(query) = self.vectors.get(position) else {
            tracing::warn!(position, rows = self.vectors.len(), "Similarity lookup out of range");
            return Vec::new();
        };

        let mut scores: Vec<(usize, f64)> = self
            .vectors
            .iter()
            .enumerate()
            .filter(|(other, _)| *other != position)
            .map(|(other, vector)| (other, query.cosine(vector)))
            .collect();

        // Ties keep catalog order
        scores.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });
        scores.truncate(k);
        scores
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MovieRecord;

    fn catalog(descriptions: &[&str]) -> Catalog {
        Catalog::new(
            descriptions
                .iter()
                .enumerate()
                .map(|(i, d)| MovieRecord::new(format!("Movie {i}"), 2000, 7.0, *d, ""))
                .collect(),
        )
    }

    #[test]
    fn test_smoothed_idf() {
        let index = SimilarityIndex::build(&catalog(&["robot war", "robot love", "cooking"]));

        // robot: df = 2, n = 3 -> ln(4 / 3) + 1
        let robot = index.idf("robot").unwrap();
        assert!((robot - ((4.0f64 / 3.0).ln() + 1.0)).abs() < 1e-12);
        // war: df = 1 -> ln(2) + 1
        let war = index.idf("war").unwrap();
        assert!((war - (2.0f64.ln() + 1.0)).abs() < 1e-12);
        assert!(index.idf("the").is_none());
        assert_eq!(index.vocabulary_size(), 4);
    }

    #[test]
    fn test_identical_descriptions_have_full_similarity() {
        let index = SimilarityIndex::build(&catalog(&["space robots", "space robots", "a cake"]));
        let score = index.similarity(0, 1).unwrap();
        assert!((score - 1.0).abs() < 1e-9);
        assert_eq!(index.similarity(0, 2), Some(0.0));
        assert_eq!(index.similarity(0, 9), None);
    }

    #[test]
    fn test_similar_to_excludes_self_and_orders_by_score() {
        let index = SimilarityIndex::build(&catalog(&[
            "heist crew robs bank vault",
            "cooking competition baking",
            "bank heist thriller",
            "crew robs bank vault heist night",
            "ocean documentary whales",
        ]));

        let similar = index.similar_to(0, 3);
        assert_eq!(similar.len(), 3);
        assert!(similar.iter().all(|(pos, _)| *pos != 0));
        assert_eq!(similar[0].0, 3);
        assert_eq!(similar[1].0, 2);
        assert!(similar.windows(2).all(|w| w[0].1 >= w[1].1));
    }

    #[test]
    fn test_similar_to_excludes_self_even_with_duplicates() {
        let index = SimilarityIndex::build(&catalog(&["same words", "same words", "same words"]));
        let similar = index.similar_to(1, 5);
        assert_eq!(similar.iter().map(|(pos, _)| *pos).collect::<Vec<_>>(), vec![0, 2]);
    }

    #[test]
    fn test_empty_description_scores_zero() {
        let index = SimilarityIndex::build(&catalog(&["", "robots"]));
        assert_eq!(index.similar_to(0, 1), vec![(1, 0.0)]);
    }

    #[test]
    fn test_out_of_range_lookup_is_empty() {
        let index = SimilarityIndex::build(&catalog(&["robots"]));
        assert!(index.similar_to(5, 3).is_empty());
        assert!(index.similar_to(0, 3).is_empty());
    }

    #[test]
    fn test_empty_catalog() {
        let index = SimilarityIndex::build(&Catalog::default());
        assert!(index.is_empty());
        assert_eq!(index.vocabulary_size(), 0);
    }
}
