use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{
        Genre, MovieResponse, RecommendationResponse, ResultStatus, SearchRefinement,
        SearchResponse, SimilarTitle,
    },
    services::search,
    state::AppState,
};

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    pub year_min: Option<i32>,
    pub year_max: Option<i32>,
    pub rating_min: Option<f64>,
    pub rating_max: Option<f64>,
    /// Comma-separated genre names
    pub genres: Option<String>,
}

impl SearchParams {
    fn refinement(&self) -> AppResult<SearchRefinement> {
        if let (Some(min), Some(max)) = (self.year_min, self.year_max) {
            if min > max {
                return Err(AppError::InvalidInput(format!(
                    "year_min {min} is greater than year_max {max}"
                )));
            }
        }

        for rating in [self.rating_min, self.rating_max].into_iter().flatten() {
            if !(0.0..=10.0).contains(&rating) {
                return Err(AppError::InvalidInput(format!(
                    "rating bound {rating} is outside 0-10"
                )));
            }
        }
        if let (Some(min), Some(max)) = (self.rating_min, self.rating_max) {
            if min > max {
                return Err(AppError::InvalidInput(format!(
                    "rating_min {min} is greater than rating_max {max}"
                )));
            }
        }

        let genres = self
            .genres
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .filter(|name| !name.trim().is_empty())
            .map(|name| {
                name.parse::<Genre>()
                    .map_err(|e| AppError::InvalidInput(e.to_string()))
            })
            .collect::<AppResult<Vec<Genre>>>()?;

        Ok(SearchRefinement {
            year_min: self.year_min,
            year_max: self.year_max,
            rating_min: self.rating_min,
            rating_max: self.rating_max,
            genres,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct SimilarParams {
    pub title: String,
}

/// Handler for free-text movie search
///
/// Every hit carries its own "more like this" list.
pub async fn search(
    State(state): State<AppState>,
    request_id: RequestId,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<SearchResponse>> {
    let refinement = params.refinement()?;
    let context = &state.context;

    let (intent, results) = context.search(&params.q, &refinement);

    let movies: Vec<MovieResponse> = results
        .iter()
        .map(|result| {
            let similar = context
                .recommend(&result.movie.title)
                .similar
                .into_iter()
                .map(SimilarTitle::from)
                .collect();
            MovieResponse::new(*result, similar)
        })
        .collect();

    tracing::info!(
        request_id = %request_id,
        query = %params.q,
        result_count = movies.len(),
        "Search completed"
    );

    Ok(Json(SearchResponse {
        query: params.q.clone(),
        year_bounds: search::effective_year_bounds(&intent, context.catalog(), &refinement),
        rating_bounds: search::effective_rating_bounds(&intent, &refinement),
        genres: refinement.genres,
        status: ResultStatus::from_count(movies.len()),
        results: movies,
        intent,
    }))
}

/// Handler for "more like this" lookups by title
pub async fn similar(
    State(state): State<AppState>,
    request_id: RequestId,
    Query(params): Query<SimilarParams>,
) -> AppResult<Json<RecommendationResponse>> {
    let outcome = state.context.recommend(&params.title);

    let recommendations: Vec<SimilarTitle> =
        outcome.similar.into_iter().map(SimilarTitle::from).collect();

    tracing::info!(
        request_id = %request_id,
        title = %params.title,
        matched = outcome.matched.is_some(),
        recommendation_count = recommendations.len(),
        "Recommendations resolved"
    );

    Ok(Json(RecommendationResponse {
        query: params.title,
        matched_title: outcome.matched.map(|m| m.movie.title.clone()),
        status: ResultStatus::from_count(recommendations.len()),
        recommendations,
    }))
}

/// Handler listing the genre vocabulary
pub async fn genres() -> Json<Vec<&'static str>> {
    Json(Genre::ALL.iter().map(Genre::display_name).collect())
}
