use axum::{
    extract::{FromRequestParts, FromRef},
    http::{header, request::Parts, StatusCode},
};
use crate::state::AppState;
use crate::domain::models::user::User;
use std::sync::Arc;

pub struct MaybeAuthUser(pub Option<User>);

impl<S> FromRequestParts<S> for MaybeAuthUser
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = <Arc<AppState> as FromRef<S>>::from_ref(state);

        let token = parts.headers.get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "));

        let token = match token {
            Some(t) => t,
            None => return Ok(MaybeAuthUser(None)),
        };

        let claims = match app_state.token_service.verify(token) {
            Ok(claims) => claims,
            // Invalid token (expired, bad signature) -> Treat as guest
            Err(_) => return Ok(MaybeAuthUser(None)),
        };

        let user = app_state.user_repo.find_by_id(&claims.sub).await
            .ok()
            .flatten();

        Ok(MaybeAuthUser(user))
    }
}
