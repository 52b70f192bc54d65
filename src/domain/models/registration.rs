use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub id: String,
    pub user_id: String,
    pub event_id: String,
    pub registered_at: DateTime<Utc>,
    pub attended: bool,
}

impl Registration {
    pub fn new(user_id: String, event_id: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            event_id,
            registered_at: Utc::now(),
            attended: false,
        }
    }
}

/// Registration row joined with the registrant, for organizer check-in lists.
#[derive(Debug, Serialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AttendeeRecord {
    pub user_id: String,
    pub student_name: String,
    pub student_email: String,
    pub registered_at: DateTime<Utc>,
    pub attended: bool,
}

/// Registration row joined with its event, for the registrant's dashboard.
#[derive(Debug, Serialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationWithEvent {
    pub id: String,
    pub event_id: String,
    pub event_title: String,
    pub start_date: DateTime<Utc>,
    pub registered_at: DateTime<Utc>,
    pub attended: bool,
}

#[derive(Debug, Serialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub registrations: i64,
    pub attended: i64,
    pub upcoming_events: i64,
}

#[derive(Debug, Serialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SocietyStats {
    pub events: i64,
    pub registrations: i64,
    pub attended: i64,
}
