use axum::{extract::{State, Path, Query}, response::IntoResponse, Json, http::StatusCode};
use crate::state::AppState;
use crate::api::extractors::{auth::AuthUser, maybe_auth::MaybeAuthUser};
use crate::api::dtos::requests::{CreateEventRequest, EventFeedQuery, UpdateEventRequest};
use crate::api::handlers::{can_manage_event, can_manage_society};
use crate::domain::models::event::{Event, EventFilter};
use crate::domain::models::notification::Notification;
use crate::error::AppError;
use std::sync::Arc;
use uuid::Uuid;
use chrono::Utc;
use tracing::{info, warn};

pub async fn list_events(
    State(state): State<Arc<AppState>>,
    Query(params): Query<EventFeedQuery>,
) -> Result<impl IntoResponse, AppError> {
    let filter = EventFilter {
        query: params.q.filter(|q| !q.trim().is_empty()),
        event_type: params.event_type.or(params.category).filter(|t| !t.trim().is_empty()),
        society_id: params.society_id.filter(|s| !s.trim().is_empty()),
    };

    let events = state.event_repo.search(&filter).await?;
    Ok(Json(events))
}

pub async fn get_event(
    State(state): State<Arc<AppState>>,
    MaybeAuthUser(maybe_user): MaybeAuthUser,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    let mut event_json = serde_json::to_value(&event).map_err(|_| AppError::Internal)?;

    if let Some(user) = maybe_user {
        let registered = state.registration_repo.find(&event.id, &user.id).await?.is_some();
        event_json["isRegistered"] = serde_json::Value::Bool(registered);
    }

    Ok(Json(event_json))
}

pub async fn create_event(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Json(payload): Json<CreateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    let society = state.society_repo.find_by_id(&payload.society_id).await?
        .ok_or(AppError::NotFound("Society not found".into()))?;

    if !can_manage_society(&state, &society, &user).await? {
        return Err(AppError::Forbidden("Not an organizer of this society".into()));
    }

    if payload.title.trim().is_empty() {
        return Err(AppError::Validation("Event title is required".into()));
    }
    if let Some(end) = payload.end_date {
        if end < payload.start_date {
            return Err(AppError::Validation("End date must be after start date".into()));
        }
    }
    if let Some(cap) = payload.capacity {
        if cap < 0 {
            return Err(AppError::Validation("Capacity cannot be negative".into()));
        }
    }

    let event = Event {
        id: Uuid::new_v4().to_string(),
        society_id: society.id.clone(),
        title: payload.title,
        description: payload.description,
        details: payload.details,
        event_type: payload.event_type,
        banner_url: payload.banner_url,
        location: payload.location,
        start_date: payload.start_date,
        end_date: payload.end_date,
        registration_deadline: payload.registration_deadline,
        capacity: payload.capacity,
        created_by: user.id.clone(),
        created_at: Utc::now(),
    };

    let created = state.event_repo.create(&event).await?;
    info!("Event created: {} for society {}", created.id, society.id);
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_event(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(event_id): Path<String>,
    Json(payload): Json<UpdateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    if !can_manage_event(&state, &event, &user).await? {
        return Err(AppError::Forbidden("Not an organizer of this event".into()));
    }

    if let Some(val) = payload.title {
        if val.trim().is_empty() {
            return Err(AppError::Validation("Event title cannot be empty".into()));
        }
        event.title = val;
    }
    if let Some(val) = payload.description { event.description = val; }
    if let Some(val) = payload.details { event.details = Some(val); }
    if let Some(val) = payload.event_type { event.event_type = val; }
    if let Some(val) = payload.banner_url { event.banner_url = Some(val); }
    if let Some(val) = payload.location { event.location = Some(val); }
    if let Some(val) = payload.start_date { event.start_date = val; }
    if let Some(val) = payload.end_date { event.end_date = Some(val); }
    if let Some(val) = payload.registration_deadline { event.registration_deadline = Some(val); }
    if let Some(val) = payload.capacity {
        if val < 0 {
            return Err(AppError::Validation("Capacity cannot be negative".into()));
        }
        event.capacity = Some(val);
    }

    if let Some(end) = event.end_date {
        if end < event.start_date {
            return Err(AppError::Validation("End date must be after start date".into()));
        }
    }

    let updated = state.event_repo.update(&event).await?;
    info!("Event updated: {}", event_id);
    Ok(Json(updated))
}

pub async fn delete_event(
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

    state.event_repo.delete(&event.id).await?;

    let notifications: Vec<Notification> = attendees.into_iter()
        .map(|a| Notification::new(a.user_id, format!("{} has been cancelled", event.title)))
        .collect();

    if let Err(e) = state.notification_repo.create_many(&notifications).await {
        warn!("Failed to write cancellation notifications for {}: {:?}", event_id, e);
    }

    info!("Event deleted: {}", event_id);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
