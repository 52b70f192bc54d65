use crate::domain::{models::notification::Notification, ports::NotificationRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteNotificationRepo {
    pool: SqlitePool,
}

impl SqliteNotificationRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationRepository for SqliteNotificationRepo {
    async fn create(&self, notification: &Notification) -> Result<Notification, AppError> {
        sqlx::query_as::<_, Notification>(
            "INSERT INTO notifications (id, user_id, message, read, created_at) VALUES (?, ?, ?, ?, ?) RETURNING *"
        )
            .bind(&notification.id)
            .bind(&notification.user_id)
            .bind(&notification.message)
            .bind(notification.read)
            .bind(notification.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn create_many(&self, notifications: &[Notification]) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        for notification in notifications {
            sqlx::query("INSERT INTO notifications (id, user_id, message, read, created_at) VALUES (?, ?, ?, ?, ?)")
                .bind(&notification.id)
                .bind(&notification.user_id)
                .bind(&notification.message)
                .bind(notification.read)
                .bind(notification.created_at)
                .execute(&mut *tx)
                .await
                .map_err(AppError::Database)?;
        }
        tx.commit().await.map_err(AppError::Database)?;
        Ok(())
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Notification>, AppError> {
        sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications WHERE user_id = ? ORDER BY created_at DESC"
        )
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn mark_read(&self, id: &str, user_id: &str) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE notifications SET read = TRUE WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Notification not found".into()));
        }
        Ok(())
    }
}
