use std::{io::Read, path::Path};

use crate::{
    models::{Catalog, FilterIntent, RankedResult, SearchRefinement},
    services::{
        catalog::{self, CatalogError},
        query_parser, recommendations, search, SequenceMatcher, SimilarityIndex,
    },
};

/// Catalog and similarity index, built once before any query is served
///
/// Read-only after construction, so it can be shared behind an `Arc` and
/// read concurrently without locking.
#[derive(Debug)]
pub struct Context {
    catalog: Catalog,
    index: SimilarityIndex,
}

/// Builds a context from a CSV catalog source
pub fn build_context<R: Read>(source: R) -> Result<Context, CatalogError> {
    Ok(Context::new(catalog::read_catalog(source)?))
}

impl Context {
    pub fn new(catalog: Catalog) -> Self {
        let index = SimilarityIndex::build(&catalog);
        Self { catalog, index }
    }

    /// Builds a context from a CSV catalog file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        Ok(Self::new(catalog::load_catalog(path)?))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn index(&self) -> &SimilarityIndex {
        &self.index
    }

    /// Parses a free-text query and runs it against the catalog
    pub fn search(
        &self,
        query: &str,
        refinement: &SearchRefinement,
    ) -> (FilterIntent, Vec<RankedResult<'_>>) {
        let intent = query_parser::parse_query(query);
        let results = search::search_movies(&intent, &self.catalog, refinement);
        (intent, results)
    }

    /// "More like this" for the catalog title closest to `title`
    pub fn recommend(&self, title: &str) -> recommendations::Recommendation<'_> {
        recommendations::recommend_with(&SequenceMatcher, &self.index, title, &self.catalog)
    }
}
