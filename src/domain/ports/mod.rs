use crate::domain::models::{
    event::{Event, EventFilter},
    notification::Notification,
    registration::{AttendeeRecord, Registration, RegistrationWithEvent, SocietyStats, UserStats},
    society::{Society, SocietyManager},
    user::User,
};
use crate::error::AppError;
use async_trait::async_trait;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<User, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;
    async fn update(&self, user: &User) -> Result<User, AppError>;
}

#[async_trait]
pub trait SocietyRepository: Send + Sync {
    async fn create(&self, society: &Society) -> Result<Society, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Society>, AppError>;
    async fn list(&self) -> Result<Vec<Society>, AppError>;
    /// Societies the user owns or co-manages.
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Society>, AppError>;
    async fn count_owned(&self, user_id: &str) -> Result<i64, AppError>;
    async fn update(&self, society: &Society) -> Result<Society, AppError>;
    /// Deletes the society together with its managers, events and their
    /// registrations in one transaction.
    async fn delete(&self, id: &str) -> Result<(), AppError>;
    async fn add_manager(&self, grant: &SocietyManager) -> Result<SocietyManager, AppError>;
    async fn remove_manager(&self, society_id: &str, user_id: &str) -> Result<(), AppError>;
    async fn is_manager(&self, society_id: &str, user_id: &str) -> Result<bool, AppError>;
}

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, event: &Event) -> Result<Event, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Event>, AppError>;
    async fn search(&self, filter: &EventFilter) -> Result<Vec<Event>, AppError>;
    async fn update(&self, event: &Event) -> Result<Event, AppError>;
    /// Deletes the event and its registrations in one transaction.
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    /// Inserts the registration iff the accepted count for the event is
    /// still below `capacity` (no limit when `None`). The check and the
    /// insert are atomic with respect to concurrent registrations.
    /// Fails with `Validation("Event is full")` at capacity and
    /// `Validation("Already registered for this event")` on a duplicate.
    async fn register(&self, registration: &Registration, capacity: Option<i32>) -> Result<Registration, AppError>;
    async fn unregister(&self, event_id: &str, user_id: &str) -> Result<(), AppError>;
    async fn find(&self, event_id: &str, user_id: &str) -> Result<Option<Registration>, AppError>;
    async fn list_attendees(&self, event_id: &str) -> Result<Vec<AttendeeRecord>, AppError>;
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<RegistrationWithEvent>, AppError>;
    async fn set_attended(&self, event_id: &str, user_id: &str, attended: bool) -> Result<(), AppError>;
    async fn user_stats(&self, user_id: &str) -> Result<UserStats, AppError>;
    async fn society_stats(&self, society_id: &str) -> Result<SocietyStats, AppError>;
}

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn create(&self, notification: &Notification) -> Result<Notification, AppError>;
    async fn create_many(&self, notifications: &[Notification]) -> Result<(), AppError>;
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Notification>, AppError>;
    async fn mark_read(&self, id: &str, user_id: &str) -> Result<(), AppError>;
}
