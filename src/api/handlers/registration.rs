use axum::{extract::{State, Path}, response::IntoResponse, Json, http::StatusCode};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::notification::Notification;
use crate::domain::models::registration::Registration;
use crate::error::AppError;
use std::sync::Arc;
use chrono::Utc;
use tracing::{info, warn};

pub async fn register(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    if let Some(deadline) = event.registration_deadline {
        if Utc::now() > deadline {
            return Err(AppError::Validation("Registration closed".into()));
        }
    }

    let registration = Registration::new(user.id.clone(), event.id.clone());

    // The capacity bound is enforced inside the repository, atomically
    // with the insert.
    let created = state.registration_repo.register(&registration, event.capacity).await?;

    let notification = Notification::new(user.id.clone(), format!("Registered for {}", event.title));
    if let Err(e) = state.notification_repo.create(&notification).await {
        warn!("Failed to write registration notification for {}: {:?}", created.id, e);
    }

    info!("User {} registered for event {}", user.id, event.id);
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn unregister(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    state.registration_repo.unregister(&event.id, &user.id).await?;

    info!("User {} unregistered from event {}", user.id, event.id);
    Ok(Json(serde_json::json!({"status": "unregistered"})))
}

pub async fn my_registrations(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let registrations = state.registration_repo.list_for_user(&user.id).await?;
    Ok(Json(registrations))
}
