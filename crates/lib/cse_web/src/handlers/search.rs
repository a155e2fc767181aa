use axum::extract::State;
use axum::response::Response;
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use tracing::debug;

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::extract::Query;
use crate::handlers::{Page, render};
use crate::middleware::session::Session;
use crate::views;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchQuery {
    pub search_term: String,
}

/// `GET /search/results?search_term=`
pub async fn results(
    State(state): State<AppState>,
    session: Session,
    jar: CookieJar,
    Query(query): Query<SearchQuery>,
) -> AppResult<Response> {
    let term = query.search_term.trim();
    if term.is_empty() {
        return Err(AppError::BadRequest("Please enter a search term.".into()));
    }
    let vehicles = state.store.search_vehicles(term).await?;
    debug!(term, matches = vehicles.len(), "inventory searched");
    let page = Page::new(
        format!("Search Results: {term}"),
        views::inventory::search_results(term, &vehicles),
    );
    Ok(render(&state, &session, jar, page).await)
}
