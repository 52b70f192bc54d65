use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::error::AppError;
use std::sync::Arc;

pub async fn my_notifications(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let notifications = state.notification_repo.list_for_user(&user.id).await?;
    Ok(Json(notifications))
}

pub async fn mark_read(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(notification_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.notification_repo.mark_read(&notification_id, &user.id).await?;
    Ok(Json(serde_json::json!({"status": "read"})))
}
