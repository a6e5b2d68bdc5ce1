use std::io;

use thiserror::Error;

use crate::{ErrorExt, StatusCode};

/// Ошибки хранилищ записей (файл учётных данных, файл ролей, список слабых
/// паролей).
///
/// Отсутствие хранилища ошибкой не является: несуществующий файл эквивалентен
/// пустому и создаётся при первой записи.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Ошибка ввода-вывода при чтении или дозаписи.
    #[error("I/O error on {location}: {source}")]
    Io {
        location: String,
        #[source]
        source: io::Error,
    },
    /// Строка хранилища не разбирается в ожидаемые поля или содержит
    /// неизвестный токен роли.
    #[error("Malformed record at {location}:{line}: {reason}")]
    MalformedRecord {
        location: String,
        line: usize,
        reason: String,
    },
    /// Поле записи нельзя сериализовать без порчи формата (например,
    /// содержит разделитель).
    #[error("Invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

impl StoreError {
    pub fn io(
        location: impl Into<String>,
        source: io::Error,
    ) -> Self {
        Self::Io {
            location: location.into(),
            source,
        }
    }

    pub fn malformed(
        location: impl Into<String>,
        line: usize,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedRecord {
            location: location.into(),
            line,
            reason: reason.into(),
        }
    }

    /// Признак повреждения данных (в отличие от сбоя ввода-вывода).
    pub fn is_corruption(&self) -> bool {
        matches!(self, Self::MalformedRecord { .. })
    }
}

impl ErrorExt for StoreError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Io { .. } => StatusCode::StorageUnavailable,
            Self::MalformedRecord { .. } => StatusCode::CorruptedData,
            Self::InvalidField { .. } => StatusCode::SerializationFailed,
        }
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn client_message(&self) -> String {
        "Internal error".to_string()
    }
}
