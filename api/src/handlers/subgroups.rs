//! Subgroup handlers
//!
//! Directory, per-subgroup feed, creation and membership.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use super::feed::SearchQuery;
use crate::app::{SubgroupDirectory, SubgroupFeed};
use crate::domain::entities::{SubgroupId, Viewer};
use crate::error::AppError;
use crate::AppState;

/// GET /subgroups
pub async fn list_subgroups(
    State(state): State<AppState>,
    viewer: Option<Extension<Viewer>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SubgroupDirectory>, AppError> {
    let Some(Extension(viewer)) = viewer else {
        return Ok(Json(SubgroupDirectory::empty()));
    };

    let directory = state.subgroup_service.directory(&viewer, &query.q).await?;
    Ok(Json(directory))
}

/// GET /subgroups/:id
pub async fn get_subgroup_feed(
    State(state): State<AppState>,
    viewer: Option<Extension<Viewer>>,
    Path(id): Path<u64>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SubgroupFeed>, AppError> {
    let viewer = viewer.map(|Extension(v)| v);
    let feed = state
        .subgroup_service
        .subgroup_feed(viewer.as_ref(), SubgroupId(id), &query.q)
        .await?;
    Ok(Json(feed))
}

#[derive(Debug, Deserialize)]
pub struct CreateSubgroupRequest {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct MembershipResponse {
    pub subgroup_id: SubgroupId,
    pub joined: bool,
}

/// POST /subgroups
pub async fn create_subgroup(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Json(body): Json<CreateSubgroupRequest>,
) -> Result<StatusCode, AppError> {
    state
        .subgroup_service
        .create_subgroup(&viewer, &body.name)
        .await?;
    Ok(StatusCode::CREATED)
}

/// POST /subgroups/:id/join
pub async fn join_subgroup(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Path(id): Path<u64>,
) -> Result<Json<MembershipResponse>, AppError> {
    let subgroup_id = SubgroupId(id);
    state.subgroup_service.join(&viewer, subgroup_id).await?;
    Ok(Json(MembershipResponse {
        subgroup_id,
        joined: true,
    }))
}

/// POST /subgroups/:id/leave
pub async fn leave_subgroup(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Path(id): Path<u64>,
) -> Result<Json<MembershipResponse>, AppError> {
    let subgroup_id = SubgroupId(id);
    state.subgroup_service.leave(&viewer, subgroup_id).await?;
    Ok(Json(MembershipResponse {
        subgroup_id,
        joined: false,
    }))
}
