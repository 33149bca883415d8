//! Feed handlers
//!
//! Home feed and the comment-labeled alternate feed. Both accept an optional
//! `q` to narrow the page by title or description.

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;

use crate::app::FeedPage;
use crate::domain::entities::Viewer;
use crate::error::AppError;
use crate::AppState;

/// Query parameters for feed endpoints
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// GET /feed
///
/// Without a connected wallet the page is empty and interactions are disabled.
pub async fn get_feed(
    State(state): State<AppState>,
    viewer: Option<Extension<Viewer>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<FeedPage>, AppError> {
    let Some(Extension(viewer)) = viewer else {
        return Ok(Json(FeedPage::disconnected()));
    };

    let page = state.feed_service.home_feed(&viewer).await?;
    Ok(Json(page.filtered(&query.q)))
}

/// GET /feed/labeled
pub async fn get_labeled_feed(
    State(state): State<AppState>,
    viewer: Option<Extension<Viewer>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<FeedPage>, AppError> {
    let Some(Extension(viewer)) = viewer else {
        return Ok(Json(FeedPage::disconnected()));
    };

    let page = state.feed_service.labeled_feed(&viewer).await?;
    Ok(Json(page.filtered(&query.q)))
}
