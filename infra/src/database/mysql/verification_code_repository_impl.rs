//! MySQL implementation of the VerificationCodeRepository trait.

use async_trait::async_trait;
use sqlx::MySqlPool;
use uuid::Uuid;

use ev_core::domain::entities::VerificationCode;
use ev_core::errors::DomainError;
use ev_core::repositories::VerificationCodeRepository;

use super::{column, db_error, uuid_column};

/// MySQL implementation of VerificationCodeRepository
///
/// `verification_codes.user_id` is unique: a user holds at most one code.
pub struct MySqlVerificationCodeRepository {
    pool: MySqlPool,
}

impl MySqlVerificationCodeRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_code(row: &sqlx::mysql::MySqlRow) -> Result<VerificationCode, DomainError> {
        Ok(VerificationCode {
            id: uuid_column(row, "id")?,
            user_id: uuid_column(row, "user_id")?,
            email: column(row, "email")?,
            code: column(row, "code")?,
            created_at: column(row, "created_at")?,
            expires_at: column(row, "expires_at")?,
            is_used: column(row, "is_used")?,
        })
    }
}

#[async_trait]
impl VerificationCodeRepository for MySqlVerificationCodeRepository {
    async fn replace_for_user(
        &self,
        code: VerificationCode,
    ) -> Result<VerificationCode, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin code replacement", e))?;

        sqlx::query("DELETE FROM verification_codes WHERE user_id = ?")
            .bind(code.user_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to remove previous code", e))?;

        sqlx::query(
            r#"
            INSERT INTO verification_codes (
                id, user_id, email, code, created_at, expires_at, is_used
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(code.id.to_string())
        .bind(code.user_id.to_string())
        .bind(&code.email)
        .bind(&code.code)
        .bind(code.created_at)
        .bind(code.expires_at)
        .bind(code.is_used)
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to store verification code", e))?;

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit code replacement", e))?;

        Ok(code)
    }

    async fn find_by_user_id(
        &self,
        user_id: Uuid,
    ) -> Result<Option<VerificationCode>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, email, code, created_at, expires_at, is_used
            FROM verification_codes
            WHERE user_id = ?
            LIMIT 1
            "#,
        )
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find verification code", e))?;

        row.as_ref().map(Self::row_to_code).transpose()
    }

    async fn mark_as_used(&self, code_id: Uuid) -> Result<bool, DomainError> {
        // Conditional update: exactly one caller can flip the flag
        let result = sqlx::query(
            "UPDATE verification_codes SET is_used = TRUE WHERE id = ? AND is_used = FALSE",
        )
        .bind(code_id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to consume verification code", e))?;

        Ok(result.rows_affected() == 1)
    }

    async fn delete_by_user_id(&self, user_id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM verification_codes WHERE user_id = ?")
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete verification code", e))?;

        Ok(result.rows_affected() > 0)
    }
}
