//! Post handlers
//!
//! Interaction endpoints for a single post, author follows and publishing.
//! Like, save and comment load the viewer's card, apply the action and
//! answer with the updated card.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use super::upload::read_upload_form;
use crate::app::{CardView, PostDraft};
use crate::domain::entities::{Address, PostId, SubgroupId, Viewer};
use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct CardQuery {
    /// Show a blurred post's content
    #[serde(default)]
    pub reveal: bool,
}

/// GET /posts/:id/card
pub async fn get_card(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Path(id): Path<u64>,
    Query(query): Query<CardQuery>,
) -> Result<Json<CardView>, AppError> {
    let mut card = state
        .interaction_service
        .load_card(&viewer, PostId(id))
        .await?;
    if query.reveal {
        card.reveal();
    }
    Ok(Json(card.to_view()))
}

/// POST /posts/:id/like
///
/// Toggles the like; the counter moves by exactly one.
pub async fn like_post(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Path(id): Path<u64>,
) -> Result<Json<CardView>, AppError> {
    let mut card = state
        .interaction_service
        .load_card(&viewer, PostId(id))
        .await?;
    state
        .interaction_service
        .toggle_like(&viewer, &mut card)
        .await?;
    Ok(Json(card.to_view()))
}

/// POST /posts/:id/save
pub async fn save_post(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Path(id): Path<u64>,
) -> Result<Json<CardView>, AppError> {
    let mut card = state
        .interaction_service
        .load_card(&viewer, PostId(id))
        .await?;
    state
        .interaction_service
        .toggle_save(&viewer, &mut card)
        .await?;
    Ok(Json(card.to_view()))
}

#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub content: String,
}

/// POST /posts/:id/comments
pub async fn add_comment(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Path(id): Path<u64>,
    Json(body): Json<CommentRequest>,
) -> Result<(StatusCode, Json<CardView>), AppError> {
    let mut card = state
        .interaction_service
        .load_card(&viewer, PostId(id))
        .await?;
    state
        .interaction_service
        .add_comment(&viewer, &mut card, &body.content)
        .await?;
    Ok((StatusCode::CREATED, Json(card.to_view())))
}

#[derive(Debug, Serialize)]
pub struct FollowResponse {
    pub target: Address,
    pub following: bool,
}

fn parse_address(raw: &str) -> Result<Address, AppError> {
    raw.parse().map_err(AppError::BadRequest)
}

/// POST /users/:addr/follow
pub async fn follow_user(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Path(addr): Path<String>,
) -> Result<Json<FollowResponse>, AppError> {
    let target = parse_address(&addr)?;
    state.interaction_service.follow(&viewer, &target).await?;
    Ok(Json(FollowResponse {
        target,
        following: true,
    }))
}

/// POST /users/:addr/unfollow
pub async fn unfollow_user(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Path(addr): Path<String>,
) -> Result<Json<FollowResponse>, AppError> {
    let target = parse_address(&addr)?;
    state.interaction_service.unfollow(&viewer, &target).await?;
    Ok(Json(FollowResponse {
        target,
        following: false,
    }))
}

#[derive(Debug, Serialize)]
pub struct PublishResponse {
    pub title: String,
    pub subgroup_ids: Vec<SubgroupId>,
    pub image: Option<String>,
}

/// POST /posts
///
/// Multipart fields: `title`, `description`, `subgroups` (comma-separated
/// ids) and an optional `image` file.
pub async fn create_post(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<PublishResponse>), AppError> {
    let mut form = read_upload_form(multipart).await?;
    let draft = PostDraft {
        title: form.field("title"),
        description: form.field("description"),
        subgroups: form.field("subgroups"),
        image: form.image.take(),
    };

    let post = state.publish_service.publish_post(&viewer, draft).await?;

    Ok((
        StatusCode::CREATED,
        Json(PublishResponse {
            title: post.title,
            subgroup_ids: post.subgroup_ids,
            image: post.image_hash,
        }),
    ))
}
