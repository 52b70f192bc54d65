use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::requests::CheckInRequest;
use crate::api::handlers::can_manage_event;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn list_attendees(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    if !can_manage_event(&state, &event, &user).await? {
        return Err(AppError::Forbidden("Not an organizer of this event".into()));
    }

    let attendees = state.registration_repo.list_attendees(&event.id).await?;
    Ok(Json(attendees))
}

pub async fn check_in(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path((event_id, user_id)): Path<(String, String)>,
    Json(payload): Json<CheckInRequest>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    if !can_manage_event(&state, &event, &user).await? {
        return Err(AppError::Forbidden("Not an organizer of this event".into()));
    }

    state.registration_repo.set_attended(&event.id, &user_id, payload.status).await?;

    info!("Check-in for user {} on event {}: {}", user_id, event_id, payload.status);
    Ok(Json(serde_json::json!({"attended": payload.status})))
}
