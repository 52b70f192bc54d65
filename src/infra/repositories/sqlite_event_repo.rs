use crate::domain::{models::event::{Event, EventFilter}, ports::EventRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteEventRepo {
    pool: SqlitePool,
}

impl SqliteEventRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for SqliteEventRepo {
    async fn create(&self, event: &Event) -> Result<Event, AppError> {
        sqlx::query_as::<_, Event>(
            r#"INSERT INTO events (
                id, society_id, title, description, details, event_type,
                banner_url, location, start_date, end_date, registration_deadline,
                capacity, created_by, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *"#
        )
            .bind(&event.id)
            .bind(&event.society_id)
            .bind(&event.title)
            .bind(&event.description)
            .bind(&event.details)
            .bind(&event.event_type)
            .bind(&event.banner_url)
            .bind(&event.location)
            .bind(event.start_date)
            .bind(event.end_date)
            .bind(event.registration_deadline)
            .bind(event.capacity)
            .bind(&event.created_by)
            .bind(event.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Event>, AppError> {
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn search(&self, filter: &EventFilter) -> Result<Vec<Event>, AppError> {
        let mut sql = String::from("SELECT * FROM events WHERE 1=1");
        if filter.query.is_some() {
            sql.push_str(" AND LOWER(title) LIKE ?");
        }
        if filter.event_type.is_some() {
            sql.push_str(" AND event_type = ?");
        }
        if filter.society_id.is_some() {
            sql.push_str(" AND society_id = ?");
        }
        sql.push_str(" ORDER BY start_date ASC");

        let mut query = sqlx::query_as::<_, Event>(&sql);
        if let Some(ref term) = filter.query {
            query = query.bind(format!("%{}%", term.trim().to_lowercase()));
        }
        if let Some(ref event_type) = filter.event_type {
            query = query.bind(event_type);
        }
        if let Some(ref society_id) = filter.society_id {
            query = query.bind(society_id);
        }

        query.fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn update(&self, event: &Event) -> Result<Event, AppError> {
        sqlx::query_as::<_, Event>(
            r#"UPDATE events SET
                title=?, description=?, details=?, event_type=?, banner_url=?,
                location=?, start_date=?, end_date=?, registration_deadline=?, capacity=?
               WHERE id=? RETURNING *"#
        )
            .bind(&event.title)
            .bind(&event.description)
            .bind(&event.details)
            .bind(&event.event_type)
            .bind(&event.banner_url)
            .bind(&event.location)
            .bind(event.start_date)
            .bind(event.end_date)
            .bind(event.registration_deadline)
            .bind(event.capacity)
            .bind(&event.id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        sqlx::query("DELETE FROM registrations WHERE event_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        let result = sqlx::query("DELETE FROM events WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Event not found".into()));
        }

        tx.commit().await.map_err(AppError::Database)?;
        Ok(())
    }
}
