use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::domain::models::user::User;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub exp: usize,
    pub iat: usize,
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserProfile,
}

/// User projection without the password hash.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub branch: Option<String>,
    pub year: Option<i32>,
    pub linkedin_url: Option<String>,
    pub instagram_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            branch: user.branch,
            year: user.year,
            linkedin_url: user.linkedin_url,
            instagram_url: user.instagram_url,
            created_at: user.created_at,
        }
    }
}
