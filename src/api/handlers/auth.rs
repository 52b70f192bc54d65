use axum::{extract::State, response::IntoResponse, Json, http::StatusCode};
use crate::state::AppState;
use crate::error::AppError;
use crate::api::dtos::requests::{LoginRequest, SignupRequest};
use crate::domain::models::auth::AuthResponse;
use crate::domain::models::user::User;
use std::sync::Arc;
use argon2::{password_hash::{SaltString, PasswordHasher}, Argon2, PasswordHash, PasswordVerifier};
use rand::rngs::OsRng;
use tracing::info;

pub async fn signup(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SignupRequest>,
) -> Result<impl IntoResponse, AppError> {
    let name = payload.name.trim();
    let email = payload.email.trim().to_lowercase();

    if name.is_empty() || email.is_empty() || payload.password.is_empty() {
        return Err(AppError::Validation("Name, email and password are required".into()));
    }

    if state.user_repo.find_by_email(&email).await?.is_some() {
        return Err(AppError::Validation("Email already registered".into()));
    }

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(payload.password.as_bytes(), &salt)
        .map_err(|_| AppError::Internal)?
        .to_string();

    let mut user = User::new(name.to_string(), email, password_hash);
    user.branch = payload.branch;
    user.year = payload.year;

    let created = state.user_repo.create(&user).await?;
    let token = state.token_service.issue(&created)?;

    info!("User signed up: {}", created.id);

    Ok((StatusCode::CREATED, Json(AuthResponse {
        token,
        user: created.into(),
    })))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let email = payload.email.trim().to_lowercase();

    let user = state.user_repo.find_by_email(&email).await?
        .ok_or(AppError::Unauthorized)?;

    let parsed_hash = PasswordHash::new(&user.password_hash)
        .map_err(|_| AppError::Internal)?;

    Argon2::default().verify_password(payload.password.as_bytes(), &parsed_hash)
        .map_err(|_| AppError::Unauthorized)?;

    let token = state.token_service.issue(&user)?;

    info!("User logged in: {}", user.id);

    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}
