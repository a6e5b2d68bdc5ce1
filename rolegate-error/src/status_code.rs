use std::fmt;

use num_enum::TryFromPrimitive;

/// Коды статуса для категоризации ошибок.
///
/// # Диапазоны:
/// - 1xxx: Общие ошибки
/// - 2xxx: Ошибки входных данных (валидация)
/// - 3xxx: Аутентификация / Авторизация
/// - 5xxx: Хранилище
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
#[repr(u32)]
#[non_exhaustive]
pub enum StatusCode {
    // === 1xxx: Общие ошибки ===
    Unknown = 1000,
    Internal = 1003,

    // === 2xxx: Ошибки входных данных ===
    InvalidUsername = 2010,
    UsernameTaken = 2011,
    InvalidPassword = 2012,
    WeakPassword = 2013,

    // === 3xxx: Аутентификация/Авторизация ===
    UserNotFound = 3004,
    InvalidCredentials = 3006,
    PasswordHashFailed = 3007,

    // === 5xxx: Хранилище ===
    StorageUnavailable = 5000,
    CorruptedData = 5002,
    SerializationFailed = 5003,
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl StatusCode {
    /// Числовое представление кода статуса.
    pub const fn code(self) -> u32 {
        self as u32
    }
}

impl fmt::Display for StatusCode {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{:?} ({})", self, self.code())
    }
}

impl From<StatusCode> for u32 {
    fn from(code: StatusCode) -> Self {
        code.code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Тест проверяет конвертацию через `TryFrom<u32>`.
    #[test]
    fn test_try_from_u32() {
        let n = StatusCode::UserNotFound.code();
        assert_eq!(StatusCode::try_from(n).unwrap(), StatusCode::UserNotFound);
        assert!(StatusCode::try_from(99999u32).is_err());
        assert!(StatusCode::try_from(0u32).is_err());
    }

    /// Тест проверяет числовое представление и `From<StatusCode> for u32`.
    #[test]
    fn test_code_and_into() {
        let c = StatusCode::CorruptedData;
        assert_eq!(c.code(), 5002);
        let n: u32 = c.into();
        assert_eq!(n, 5002);
        assert_eq!(c.to_string(), "CorruptedData (5002)");
    }
}
