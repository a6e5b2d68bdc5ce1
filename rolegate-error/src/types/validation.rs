use thiserror::Error;

use crate::{ErrorExt, StatusCode, StoreError};

/// Нарушение правил для имени пользователя или пароля.
///
/// Порядок вариантов совпадает с порядком проверок: при нескольких
/// нарушениях сообщается только первое.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Usernames must not contain spaces!")]
    UsernameWhitespace,
    #[error("Usernames must only contain letters and numbers!")]
    UsernameNotAlphanumeric,
    #[error("Usernames must be {min}-{max} characters long!")]
    UsernameLength { min: usize, max: usize },
    #[error("Username already chosen!")]
    UsernameTaken,

    #[error("Passwords must not contain spaces!")]
    PasswordWhitespace,
    #[error("Passwords must contain at least one upper-case letter!")]
    PasswordMissingUppercase,
    #[error("Passwords must contain at least one lower-case letter!")]
    PasswordMissingLowercase,
    #[error("Passwords must contain at least one numerical digit!")]
    PasswordMissingDigit,
    #[error("Passwords must contain at least one special character from the following: {allowed}.")]
    PasswordMissingSpecial { allowed: String },
    #[error("Passwords must be {min}-{max} characters long!")]
    PasswordLength { min: usize, max: usize },
    #[error("Passwords cannot be the same as your username!")]
    PasswordMatchesUsername,
    #[error("Password too weak!")]
    PasswordWeak,

    /// Проверка уникальности не смогла прочитать хранилище. Это не нарушение
    /// правила: повторный ввод не поможет.
    #[error("Username lookup failed: {0}")]
    Store(#[from] StoreError),
}

impl ValidationError {
    /// `true`, если ошибка — нарушение правила и ввод можно повторить.
    pub fn is_rule_violation(&self) -> bool {
        !matches!(self, Self::Store(_))
    }
}

impl ErrorExt for ValidationError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::UsernameWhitespace
            | Self::UsernameNotAlphanumeric
            | Self::UsernameLength { .. } => StatusCode::InvalidUsername,
            Self::UsernameTaken => StatusCode::UsernameTaken,
            Self::PasswordWeak => StatusCode::WeakPassword,
            Self::PasswordWhitespace
            | Self::PasswordMissingUppercase
            | Self::PasswordMissingLowercase
            | Self::PasswordMissingDigit
            | Self::PasswordMissingSpecial { .. }
            | Self::PasswordLength { .. }
            | Self::PasswordMatchesUsername => StatusCode::InvalidPassword,
            Self::Store(err) => err.status_code(),
        }
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn client_message(&self) -> String {
        match self {
            Self::Store(err) => err.client_message(),
            _ => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            ValidationError::UsernameLength { min: 6, max: 12 }.to_string(),
            "Usernames must be 6-12 characters long!"
        );
        assert_eq!(
            ValidationError::PasswordMissingSpecial {
                allowed: "!, @, #, $, %, *, &".into()
            }
            .to_string(),
            "Passwords must contain at least one special character from the following: !, @, #, $, %, *, &."
        );
    }

    #[test]
    fn test_store_failure_is_not_rule_violation() {
        let err = ValidationError::from(StoreError::malformed("passwd.txt", 1, "no delimiter"));
        assert!(!err.is_rule_violation());
        assert_eq!(err.status_code(), StatusCode::CorruptedData);
        assert_eq!(err.client_message(), "Internal error");
        assert!(ValidationError::PasswordWeak.is_rule_violation());
    }
}
