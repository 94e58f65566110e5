//! MySQL implementation of the SessionRepository trait.
//!
//! Rotation runs inside a transaction so no request can observe a user with
//! both the old and the new session, or with neither.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::MySqlPool;
use uuid::Uuid;

use ev_core::domain::entities::Session;
use ev_core::errors::DomainError;
use ev_core::repositories::SessionRepository;

use super::{column, db_error, uuid_column};

/// MySQL implementation of SessionRepository
pub struct MySqlSessionRepository {
    pool: MySqlPool,
}

impl MySqlSessionRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_session(row: &sqlx::mysql::MySqlRow) -> Result<Session, DomainError> {
        Ok(Session {
            id: column(row, "id")?,
            user_id: uuid_column(row, "user_id")?,
            created_at: column(row, "created_at")?,
            expires_at: column(row, "expires_at")?,
            fresh: false,
        })
    }
}

#[async_trait]
impl SessionRepository for MySqlSessionRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<Session>, DomainError> {
        let row = sqlx::query(
            "SELECT id, user_id, created_at, expires_at FROM sessions WHERE id = ? LIMIT 1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find session", e))?;

        row.as_ref().map(Self::row_to_session).transpose()
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<Session>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, created_at, expires_at FROM sessions
            WHERE user_id = ?
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list sessions", e))?;

        rows.iter().map(Self::row_to_session).collect()
    }

    async fn create(&self, session: Session) -> Result<Session, DomainError> {
        sqlx::query(
            "INSERT INTO sessions (id, user_id, created_at, expires_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&session.id)
        .bind(session.user_id.to_string())
        .bind(session.created_at)
        .bind(session.expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to create session", e))?;

        Ok(session)
    }

    async fn update_expiration(
        &self,
        id: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query("UPDATE sessions SET expires_at = ? WHERE id = ?")
            .bind(expires_at)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to extend session", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM sessions WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete session", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_user_id(&self, user_id: Uuid) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM sessions WHERE user_id = ?")
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete user sessions", e))?;

        Ok(result.rows_affected())
    }

    async fn replace_user_sessions(&self, session: Session) -> Result<u64, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin session rotation", e))?;

        let removed = sqlx::query("DELETE FROM sessions WHERE user_id = ?")
            .bind(session.user_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to remove old sessions", e))?
            .rows_affected();

        sqlx::query(
            "INSERT INTO sessions (id, user_id, created_at, expires_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&session.id)
        .bind(session.user_id.to_string())
        .bind(session.created_at)
        .bind(session.expires_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to insert rotated session", e))?;

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit session rotation", e))?;

        Ok(removed)
    }

    async fn delete_expired(&self) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete expired sessions", e))?;

        Ok(result.rows_affected())
    }
}
