use axum::{extract::State, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::requests::UpdateProfileRequest;
use crate::api::dtos::responses::{ProfileResponse, ProfileStats};
use crate::domain::models::auth::UserProfile;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let reg_stats = state.registration_repo.user_stats(&user.id).await?;
    let societies_owned = state.society_repo.count_owned(&user.id).await?;

    Ok(Json(ProfileResponse {
        user: UserProfile::from(user),
        stats: ProfileStats {
            registrations: reg_stats.registrations,
            attended: reg_stats.attended,
            societies_owned,
            upcoming_events: reg_stats.upcoming_events,
        },
    }))
}

pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    AuthUser(mut user): AuthUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Some(val) = payload.name {
        if val.trim().is_empty() {
            return Err(AppError::Validation("Name cannot be empty".into()));
        }
        user.name = val;
    }
    if let Some(val) = payload.branch { user.branch = Some(val); }
    if let Some(val) = payload.year { user.year = Some(val); }
    if let Some(val) = payload.linkedin_url { user.linkedin_url = Some(val); }
    if let Some(val) = payload.instagram_url { user.instagram_url = Some(val); }

    let updated = state.user_repo.update(&user).await?;
    info!("Profile updated: {}", updated.id);
    Ok(Json(UserProfile::from(updated)))
}
