use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::requests::{AddManagerRequest, CreateSocietyRequest, UpdateSocietyRequest};
use crate::api::handlers::can_manage_society;
use crate::domain::models::society::{Society, SocietyManager};
use crate::error::AppError;
use std::sync::Arc;
use uuid::Uuid;
use chrono::Utc;
use tracing::info;

pub async fn create_society(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Json(payload): Json<CreateSocietyRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("Society name is required".into()));
    }
    if payload.category.trim().is_empty() {
        return Err(AppError::Validation("Category is required".into()));
    }

    let society = Society {
        id: Uuid::new_v4().to_string(),
        name: payload.name,
        category: payload.category,
        description: payload.description,
        college_name: payload.college_name,
        president_name: payload.president_name,
        website_url: payload.website_url,
        instagram_url: payload.instagram_url,
        logo_url: payload.logo_url,
        owner_id: user.id.clone(),
        created_at: Utc::now(),
    };

    let created = state.society_repo.create(&society).await?;
    info!("Society created: {} by {}", created.id, user.id);
    Ok(Json(created))
}

pub async fn list_societies(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let societies = state.society_repo.list().await?;
    Ok(Json(societies))
}

pub async fn my_societies(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let societies = state.society_repo.list_for_user(&user.id).await?;
    Ok(Json(societies))
}

pub async fn get_society(
    State(state): State<Arc<AppState>>,
    Path(society_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let society = state.society_repo.find_by_id(&society_id).await?
        .ok_or(AppError::NotFound("Society not found".into()))?;
    Ok(Json(society))
}

pub async fn update_society(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(society_id): Path<String>,
    Json(payload): Json<UpdateSocietyRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut society = state.society_repo.find_by_id(&society_id).await?
        .ok_or(AppError::NotFound("Society not found".into()))?;

    if society.owner_id != user.id && !user.is_admin() {
        return Err(AppError::Forbidden("Only the society owner can update it".into()));
    }

    if let Some(val) = payload.name {
        if val.trim().is_empty() {
            return Err(AppError::Validation("Society name cannot be empty".into()));
        }
        society.name = val;
    }
    if let Some(val) = payload.category { society.category = val; }
    if let Some(val) = payload.description { society.description = Some(val); }
    if let Some(val) = payload.college_name { society.college_name = Some(val); }
    if let Some(val) = payload.president_name { society.president_name = Some(val); }
    if let Some(val) = payload.website_url { society.website_url = Some(val); }
    if let Some(val) = payload.instagram_url { society.instagram_url = Some(val); }
    if let Some(val) = payload.logo_url { society.logo_url = Some(val); }

    let updated = state.society_repo.update(&society).await?;
    info!("Society updated: {}", society_id);
    Ok(Json(updated))
}

pub async fn delete_society(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(society_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let society = state.society_repo.find_by_id(&society_id).await?
        .ok_or(AppError::NotFound("Society not found".into()))?;

    if society.owner_id != user.id && !user.is_admin() {
        return Err(AppError::Forbidden("Only the society owner can delete it".into()));
    }

    state.society_repo.delete(&society.id).await?;
    info!("Society deleted: {}", society_id);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}

pub async fn add_manager(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(society_id): Path<String>,
    Json(payload): Json<AddManagerRequest>,
) -> Result<impl IntoResponse, AppError> {
    let society = state.society_repo.find_by_id(&society_id).await?
        .ok_or(AppError::NotFound("Society not found".into()))?;

    if society.owner_id != user.id && !user.is_admin() {
        return Err(AppError::Forbidden("Only the society owner can add managers".into()));
    }

    let target = state.user_repo.find_by_email(&payload.email.trim().to_lowercase()).await?
        .ok_or(AppError::NotFound("User not found".into()))?;

    if target.id == society.owner_id {
        return Err(AppError::Validation("The owner is already a manager".into()));
    }

    if state.society_repo.is_manager(&society.id, &target.id).await? {
        return Err(AppError::Validation("User is already a manager of this society".into()));
    }

    let grant = SocietyManager::new(target.id.clone(), society.id.clone());
    let created = state.society_repo.add_manager(&grant).await?;

    info!("Manager {} added to society {}", target.id, society_id);
    Ok(Json(created))
}

pub async fn remove_manager(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path((society_id, user_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let society = state.society_repo.find_by_id(&society_id).await?
        .ok_or(AppError::NotFound("Society not found".into()))?;

    if society.owner_id != user.id && !user.is_admin() {
        return Err(AppError::Forbidden("Only the society owner can remove managers".into()));
    }

    state.society_repo.remove_manager(&society.id, &user_id).await?;
    info!("Manager {} removed from society {}", user_id, society_id);
    Ok(Json(serde_json::json!({"status": "removed"})))
}

pub async fn society_stats(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(society_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let society = state.society_repo.find_by_id(&society_id).await?
        .ok_or(AppError::NotFound("Society not found".into()))?;

    if !can_manage_society(&state, &society, &user).await? {
        return Err(AppError::Forbidden("Not an organizer of this society".into()));
    }

    let stats = state.registration_repo.society_stats(&society.id).await?;
    Ok(Json(stats))
}
