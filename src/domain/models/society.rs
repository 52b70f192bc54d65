use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Society {
    pub id: String,
    pub name: String,
    pub category: String,
    pub description: Option<String>,
    pub college_name: Option<String>,
    pub president_name: Option<String>,
    pub website_url: Option<String>,
    pub instagram_url: Option<String>,
    pub logo_url: Option<String>,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
}

/// Co-manager grant. One row per (user, society) pair, enforced by the schema.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SocietyManager {
    pub id: String,
    pub user_id: String,
    pub society_id: String,
    pub created_at: DateTime<Utc>,
}

impl SocietyManager {
    pub fn new(user_id: String, society_id: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            society_id,
            created_at: Utc::now(),
        }
    }
}
