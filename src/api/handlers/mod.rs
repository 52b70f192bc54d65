pub mod attendance;
pub mod auth;
pub mod event;
pub mod health;
pub mod notification;
pub mod profile;
pub mod registration;
pub mod society;

use crate::domain::models::{event::Event, society::Society, user::User};
use crate::error::AppError;
use crate::state::AppState;

/// Owner, co-manager or admin.
pub(crate) async fn can_manage_society(
    state: &AppState,
    society: &Society,
    user: &User,
) -> Result<bool, AppError> {
    if user.is_admin() || society.owner_id == user.id {
        return Ok(true);
    }
    state.society_repo.is_manager(&society.id, &user.id).await
}

/// Organizer check: the event's creator, or anyone who can manage the
/// owning society.
pub(crate) async fn can_manage_event(
    state: &AppState,
    event: &Event,
    user: &User,
) -> Result<bool, AppError> {
    if event.created_by == user.id {
        return Ok(true);
    }

    let society = state.society_repo.find_by_id(&event.society_id).await?
        .ok_or(AppError::Internal)?;

    can_manage_society(state, &society, user).await
}
