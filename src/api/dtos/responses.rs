use serde::Serialize;
use crate::domain::models::auth::UserProfile;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileStats {
    pub registrations: i64,
    pub attended: i64,
    pub societies_owned: i64,
    pub upcoming_events: i64,
}

#[derive(Serialize)]
pub struct ProfileResponse {
    pub user: UserProfile,
    pub stats: ProfileStats,
}
