use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub society_id: String,
    pub title: String,
    pub description: String,
    pub details: Option<String>,
    pub event_type: String,
    pub banner_url: Option<String>,
    pub location: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub registration_deadline: Option<DateTime<Utc>>,
    pub capacity: Option<i32>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

/// Public feed filters. All optional; an empty filter lists everything.
#[derive(Debug, Default, Clone)]
pub struct EventFilter {
    pub query: Option<String>,
    pub event_type: Option<String>,
    pub society_id: Option<String>,
}
