use crate::domain::{
    models::registration::{AttendeeRecord, Registration, RegistrationWithEvent, SocietyStats, UserStats},
    ports::RegistrationRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;
use chrono::Utc;

pub struct SqliteRegistrationRepo {
    pool: SqlitePool,
}

impl SqliteRegistrationRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn map_duplicate(e: sqlx::Error) -> AppError {
    if let Some(db_err) = e.as_database_error() {
        // 2067 = SQLite Unique Constraint, i.e. the (user_id, event_id) key
        if db_err.code().as_deref() == Some("2067") {
            return AppError::Validation("Already registered for this event".into());
        }
    }
    AppError::Database(e)
}

#[async_trait]
impl RegistrationRepository for SqliteRegistrationRepo {
    async fn register(&self, registration: &Registration, capacity: Option<i32>) -> Result<Registration, AppError> {
        // Count check and insert are a single statement; SQLite serializes
        // writers, so there is no over-admission window.
        let result = match capacity {
            Some(cap) => {
                sqlx::query(
                    r#"INSERT INTO registrations (id, user_id, event_id, registered_at, attended)
                       SELECT ?, ?, ?, ?, ?
                       WHERE (SELECT COUNT(*) FROM registrations WHERE event_id = ?) < ?"#
                )
                    .bind(&registration.id)
                    .bind(&registration.user_id)
                    .bind(&registration.event_id)
                    .bind(registration.registered_at)
                    .bind(registration.attended)
                    .bind(&registration.event_id)
                    .bind(cap)
                    .execute(&self.pool)
                    .await
            }
            None => {
                sqlx::query(
                    "INSERT INTO registrations (id, user_id, event_id, registered_at, attended) VALUES (?, ?, ?, ?, ?)"
                )
                    .bind(&registration.id)
                    .bind(&registration.user_id)
                    .bind(&registration.event_id)
                    .bind(registration.registered_at)
                    .bind(registration.attended)
                    .execute(&self.pool)
                    .await
            }
        };

        let result = result.map_err(map_duplicate)?;

        if result.rows_affected() == 0 {
            return Err(AppError::Validation("Event is full".into()));
        }

        Ok(registration.clone())
    }

    async fn unregister(&self, event_id: &str, user_id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM registrations WHERE event_id = ? AND user_id = ?")
            .bind(event_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Registration not found".into()));
        }
        Ok(())
    }

    async fn find(&self, event_id: &str, user_id: &str) -> Result<Option<Registration>, AppError> {
        sqlx::query_as::<_, Registration>("SELECT * FROM registrations WHERE event_id = ? AND user_id = ?")
            .bind(event_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_attendees(&self, event_id: &str) -> Result<Vec<AttendeeRecord>, AppError> {
        sqlx::query_as::<_, AttendeeRecord>(
            r#"SELECT r.user_id, u.name AS student_name, u.email AS student_email,
                      r.registered_at, r.attended
               FROM registrations r
               JOIN users u ON u.id = r.user_id
               WHERE r.event_id = ?
               ORDER BY r.registered_at ASC"#
        )
            .bind(event_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<RegistrationWithEvent>, AppError> {
        sqlx::query_as::<_, RegistrationWithEvent>(
            r#"SELECT r.id, r.event_id, e.title AS event_title, e.start_date,
                      r.registered_at, r.attended
               FROM registrations r
               JOIN events e ON e.id = r.event_id
               WHERE r.user_id = ?
               ORDER BY r.registered_at DESC"#
        )
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn set_attended(&self, event_id: &str, user_id: &str, attended: bool) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE registrations SET attended = ? WHERE event_id = ? AND user_id = ?")
            .bind(attended)
            .bind(event_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Registration not found".into()));
        }
        Ok(())
    }

    async fn user_stats(&self, user_id: &str) -> Result<UserStats, AppError> {
        sqlx::query_as::<_, UserStats>(
            r#"SELECT COUNT(*) AS registrations,
                      COALESCE(SUM(CASE WHEN r.attended THEN 1 ELSE 0 END), 0) AS attended,
                      COALESCE(SUM(CASE WHEN e.start_date > ? THEN 1 ELSE 0 END), 0) AS upcoming_events
               FROM registrations r
               JOIN events e ON e.id = r.event_id
               WHERE r.user_id = ?"#
        )
            .bind(Utc::now())
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn society_stats(&self, society_id: &str) -> Result<SocietyStats, AppError> {
        sqlx::query_as::<_, SocietyStats>(
            r#"SELECT (SELECT COUNT(*) FROM events WHERE society_id = ?) AS events,
                      COUNT(r.id) AS registrations,
                      COALESCE(SUM(CASE WHEN r.attended THEN 1 ELSE 0 END), 0) AS attended
               FROM registrations r
               JOIN events e ON e.id = r.event_id
               WHERE e.society_id = ?"#
        )
            .bind(society_id)
            .bind(society_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
