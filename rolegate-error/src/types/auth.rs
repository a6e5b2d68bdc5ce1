use thiserror::Error;

use crate::{ErrorExt, PasswordError, StatusCode, StoreError, ValidationError};

/// Ошибка регистрации или входа.
///
/// `UserNotFound` и `PasswordMismatch` различаются только во внутренних
/// логах: пользователь в обоих случаях видит одно и то же сообщение.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("User not found: {username}")]
    UserNotFound { username: String },
    #[error("Password mismatch for user: {username}")]
    PasswordMismatch { username: String },
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Password error: {0}")]
    Password(#[from] PasswordError),
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

impl AuthError {
    /// `true` для любого исхода «неверные учётные данные».
    pub fn is_invalid_credentials(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound { .. }
                | Self::PasswordMismatch { .. }
                | Self::Password(PasswordError::Mismatch)
        )
    }
}

impl ErrorExt for AuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::UserNotFound { .. } => StatusCode::UserNotFound,
            Self::PasswordMismatch { .. } => StatusCode::InvalidCredentials,
            Self::Validation(err) => err.status_code(),
            Self::Password(err) => err.status_code(),
            Self::Store(err) => err.status_code(),
        }
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn client_message(&self) -> String {
        match self {
            // Одинаковый текст, чтобы по ответу нельзя было перебрать имена
            Self::UserNotFound { .. } | Self::PasswordMismatch { .. } => {
                "Invalid username or password".to_string()
            }
            Self::Validation(err) => err.client_message(),
            Self::Password(err) => err.client_message(),
            Self::Store(err) => err.client_message(),
        }
    }
}
