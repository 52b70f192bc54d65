use crate::domain::{models::event::{Event, EventFilter}, ports::EventRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresEventRepo {
    pool: PgPool,
}

impl PostgresEventRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for PostgresEventRepo {
    async fn create(&self, event: &Event) -> Result<Event, AppError> {
        sqlx::query_as::<_, Event>(
            r#"INSERT INTO events (
                id, society_id, title, description, details, event_type,
                banner_url, location, start_date, end_date, registration_deadline,
                capacity, created_by, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
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
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn search(&self, filter: &EventFilter) -> Result<Vec<Event>, AppError> {
        let mut sql = String::from("SELECT * FROM events WHERE 1=1");
        let mut idx = 0;
        if filter.query.is_some() {
            idx += 1;
            sql.push_str(&format!(" AND LOWER(title) LIKE ${}", idx));
        }
        if filter.event_type.is_some() {
            idx += 1;
            sql.push_str(&format!(" AND event_type = ${}", idx));
        }
        if filter.society_id.is_some() {
            idx += 1;
            sql.push_str(&format!(" AND society_id = ${}", idx));
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
                title=$1, description=$2, details=$3, event_type=$4, banner_url=$5,
                location=$6, start_date=$7, end_date=$8, registration_deadline=$9, capacity=$10
               WHERE id=$11 RETURNING *"#
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

        sqlx::query("DELETE FROM registrations WHERE event_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        let result = sqlx::query("DELETE FROM events WHERE id = $1")
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
