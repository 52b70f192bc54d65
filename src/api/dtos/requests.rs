use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub branch: Option<String>,
    pub year: Option<i32>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSocietyRequest {
    pub name: String,
    pub category: String,
    pub description: Option<String>,
    pub college_name: Option<String>,
    pub president_name: Option<String>,
    pub website_url: Option<String>,
    pub instagram_url: Option<String>,
    pub logo_url: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSocietyRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub college_name: Option<String>,
    pub president_name: Option<String>,
    pub website_url: Option<String>,
    pub instagram_url: Option<String>,
    pub logo_url: Option<String>,
}

#[derive(Deserialize)]
pub struct AddManagerRequest {
    pub email: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
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
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub details: Option<String>,
    pub event_type: Option<String>,
    pub banner_url: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub registration_deadline: Option<DateTime<Utc>>,
    pub capacity: Option<i32>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventFeedQuery {
    pub q: Option<String>,
    pub event_type: Option<String>,
    // Legacy clients send the type filter as `category`.
    pub category: Option<String>,
    pub society_id: Option<String>,
}

#[derive(Deserialize)]
pub struct CheckInRequest {
    pub status: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub branch: Option<String>,
    pub year: Option<i32>,
    pub linkedin_url: Option<String>,
    pub instagram_url: Option<String>,
}
