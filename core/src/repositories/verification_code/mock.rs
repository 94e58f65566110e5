//! Mock implementation of VerificationCodeRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::verification_code::VerificationCode;
use crate::errors::DomainError;

use super::trait_::VerificationCodeRepository;

/// Mock verification code repository keyed by user
pub struct MockVerificationCodeRepository {
    codes: Arc<RwLock<HashMap<Uuid, VerificationCode>>>,
    should_fail: bool,
}

impl MockVerificationCodeRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            codes: Arc::new(RwLock::new(HashMap::new())),
            should_fail: false,
        }
    }

    /// Create a repository whose every call fails
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::new()
        }
    }

    fn check_failure(&self) -> Result<(), DomainError> {
        if self.should_fail {
            return Err(DomainError::Internal {
                message: "Code store unavailable".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for MockVerificationCodeRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VerificationCodeRepository for MockVerificationCodeRepository {
    async fn replace_for_user(
        &self,
        code: VerificationCode,
    ) -> Result<VerificationCode, DomainError> {
        self.check_failure()?;
        let mut codes = self.codes.write().await;
        codes.insert(code.user_id, code.clone());
        Ok(code)
    }

    async fn find_by_user_id(
        &self,
        user_id: Uuid,
    ) -> Result<Option<VerificationCode>, DomainError> {
        self.check_failure()?;
        let codes = self.codes.read().await;
        Ok(codes.get(&user_id).cloned())
    }

    async fn mark_as_used(&self, code_id: Uuid) -> Result<bool, DomainError> {
        self.check_failure()?;
        let mut codes = self.codes.write().await;
        match codes.values_mut().find(|c| c.id == code_id) {
            Some(code) if !code.is_used => {
                code.mark_as_used();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete_by_user_id(&self, user_id: Uuid) -> Result<bool, DomainError> {
        self.check_failure()?;
        let mut codes = self.codes.write().await;
        Ok(codes.remove(&user_id).is_some())
    }
}
