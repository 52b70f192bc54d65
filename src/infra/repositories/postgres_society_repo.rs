use crate::domain::{models::society::{Society, SocietyManager}, ports::SocietyRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{PgPool, Row};

pub struct PostgresSocietyRepo {
    pool: PgPool,
}

impl PostgresSocietyRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SocietyRepository for PostgresSocietyRepo {
    async fn create(&self, society: &Society) -> Result<Society, AppError> {
        sqlx::query_as::<_, Society>(
            r#"INSERT INTO societies (
                id, name, category, description, college_name, president_name,
                website_url, instagram_url, logo_url, owner_id, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *"#
        )
            .bind(&society.id)
            .bind(&society.name)
            .bind(&society.category)
            .bind(&society.description)
            .bind(&society.college_name)
            .bind(&society.president_name)
            .bind(&society.website_url)
            .bind(&society.instagram_url)
            .bind(&society.logo_url)
            .bind(&society.owner_id)
            .bind(society.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Society>, AppError> {
        sqlx::query_as::<_, Society>("SELECT * FROM societies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<Society>, AppError> {
        sqlx::query_as::<_, Society>("SELECT * FROM societies ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Society>, AppError> {
        sqlx::query_as::<_, Society>(
            r#"SELECT DISTINCT s.* FROM societies s
               LEFT JOIN society_managers m ON m.society_id = s.id
               WHERE s.owner_id = $1 OR m.user_id = $1
               ORDER BY s.created_at DESC"#
        )
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn count_owned(&self, user_id: &str) -> Result<i64, AppError> {
        let result = sqlx::query("SELECT COUNT(*) as count FROM societies WHERE owner_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(result.get::<i64, _>("count"))
    }

    async fn update(&self, society: &Society) -> Result<Society, AppError> {
        sqlx::query_as::<_, Society>(
            r#"UPDATE societies SET
                name=$1, category=$2, description=$3, college_name=$4, president_name=$5,
                website_url=$6, instagram_url=$7, logo_url=$8
               WHERE id=$9 RETURNING *"#
        )
            .bind(&society.name)
            .bind(&society.category)
            .bind(&society.description)
            .bind(&society.college_name)
            .bind(&society.president_name)
            .bind(&society.website_url)
            .bind(&society.instagram_url)
            .bind(&society.logo_url)
            .bind(&society.id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        sqlx::query("DELETE FROM registrations WHERE event_id IN (SELECT id FROM events WHERE society_id = $1)")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;
        sqlx::query("DELETE FROM events WHERE society_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;
        sqlx::query("DELETE FROM society_managers WHERE society_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        let result = sqlx::query("DELETE FROM societies WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Society not found".into()));
        }

        tx.commit().await.map_err(AppError::Database)?;
        Ok(())
    }

    async fn add_manager(&self, grant: &SocietyManager) -> Result<SocietyManager, AppError> {
        sqlx::query_as::<_, SocietyManager>(
            "INSERT INTO society_managers (id, user_id, society_id, created_at) VALUES ($1, $2, $3, $4) RETURNING *"
        )
            .bind(&grant.id)
            .bind(&grant.user_id)
            .bind(&grant.society_id)
            .bind(grant.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn remove_manager(&self, society_id: &str, user_id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM society_managers WHERE society_id = $1 AND user_id = $2")
            .bind(society_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Manager not found".into()));
        }
        Ok(())
    }

    async fn is_manager(&self, society_id: &str, user_id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("SELECT COUNT(*) as count FROM society_managers WHERE society_id = $1 AND user_id = $2")
            .bind(society_id)
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(result.get::<i64, _>("count") > 0)
    }
}
