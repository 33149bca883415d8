//! Profile handlers

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Serialize;

use super::upload::read_upload_form;
use crate::app::ProfileView;
use crate::domain::entities::Viewer;
use crate::error::{AppError, DomainError};
use crate::AppState;

/// GET /profile
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
) -> Result<Json<ProfileView>, AppError> {
    let profile = state.profile_service.profile(&viewer).await?;
    Ok(Json(profile))
}

#[derive(Debug, Serialize)]
pub struct CreateProfileResponse {
    pub image: String,
    pub image_url: String,
}

/// POST /profile
///
/// Multipart with a required `image` file used as the avatar.
pub async fn create_profile(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<CreateProfileResponse>), AppError> {
    let form = read_upload_form(multipart).await?;
    let image = form
        .image
        .ok_or_else(|| DomainError::Validation("A profile image is required".to_string()))?;

    let hash = state.profile_service.create_profile(&viewer, image).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateProfileResponse {
            image_url: state.media.url_for(&hash),
            image: hash,
        }),
    ))
}
