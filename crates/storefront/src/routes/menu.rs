//! Menu route handlers.

use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use crate::search::SearchResults;
use crate::state::AppState;

/// Menu query parameters.
#[derive(Debug, Deserialize)]
pub struct MenuQuery {
    #[serde(default)]
    pub q: String,
}

/// Display the menu, filtered by `q` when present.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>, Query(query): Query<MenuQuery>) -> Response {
    let results = SearchResults::new(&query.q, state.catalog());
    tracing::debug!(count = results.count, "Menu search");
    Json(results).into_response()
}
