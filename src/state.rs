use std::sync::Arc;
use crate::domain::ports::{
    EventRepository, NotificationRepository, RegistrationRepository,
    SocietyRepository, UserRepository,
};
use crate::domain::services::token_service::TokenService;
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub user_repo: Arc<dyn UserRepository>,
    pub society_repo: Arc<dyn SocietyRepository>,
    pub event_repo: Arc<dyn EventRepository>,
    pub registration_repo: Arc<dyn RegistrationRepository>,
    pub notification_repo: Arc<dyn NotificationRepository>,
    pub token_service: Arc<TokenService>,
}
