use thiserror::Error;

use crate::{ErrorExt, StatusCode};

/// Ошибки хеширования и проверки паролей.
///
/// [`PasswordError::Mismatch`] — ожидаемый исход проверки (неверный пароль),
/// а не сбой: вызывающий код обязан отличать его от повреждённой записи.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    Hash(String),
    #[error("Stored password hash is malformed: {0}")]
    MalformedHash(String),
    #[error("Password does not match")]
    Mismatch,
}

impl PasswordError {
    pub fn is_mismatch(&self) -> bool {
        matches!(self, Self::Mismatch)
    }
}

impl ErrorExt for PasswordError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Hash(_) => StatusCode::PasswordHashFailed,
            Self::MalformedHash(_) => StatusCode::CorruptedData,
            Self::Mismatch => StatusCode::InvalidCredentials,
        }
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn client_message(&self) -> String {
        match self {
            Self::Mismatch => "Invalid username or password".to_string(),
            _ => "Internal error".to_string(),
        }
    }
}
