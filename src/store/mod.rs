//! Хранилища записей учётных данных и ролей.
//!
//! Типизированные хранилища ([`CredentialStore`], [`RoleStore`]) работают
//! поверх трейта [`RecordStore`] — простого репозитория «дописать запись /
//! найти первую запись по ключу». Это позволяет заменить плоский файл на
//! другой движок, не трогая валидацию и авторизацию.

pub mod credential;
pub mod file;
pub mod memory;
pub mod role;

pub use credential::{CredentialRecord, CredentialStore};
pub use file::FlatFileStore;
pub use memory::MemoryStore;
pub use role::{RoleAssignment, RoleStore};
pub use rolegate_error::StoreError;

pub type StoreResult<T> = Result<T, StoreError>;

/// Разделитель полей записи.
pub const RECORD_DELIMITER: char = ':';

/// Сырая запись хранилища: ключ, значение и номер строки (с 1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub line: usize,
    pub key: String,
    pub value: String,
}

/// Репозиторий записей `ключ -> значение` с семантикой только-дозаписи.
///
/// Уникальность ключей не гарантируется: при дубликатах [`find_first`]
/// возвращает первую запись в порядке добавления.
///
/// [`find_first`]: RecordStore::find_first
pub trait RecordStore: Send + Sync {
    /// Дописывает одну запись. Каждый вызов независим, атомарности между
    /// несколькими вызовами нет.
    fn append(
        &self,
        key: &str,
        value: &str,
    ) -> StoreResult<()>;

    /// Линейный поиск первой записи с точно совпадающим ключом.
    ///
    /// Отсутствующее хранилище эквивалентно пустому и даёт `Ok(None)`.
    fn find_first(
        &self,
        key: &str,
    ) -> StoreResult<Option<RawRecord>>;

    /// Человекочитаемое расположение хранилища (для ошибок и логов).
    fn location(&self) -> String;
}

/// Проверяет, что поле можно записать без порчи построчного формата.
pub(crate) fn check_field(
    field: &'static str,
    value: &str,
) -> StoreResult<()> {
    if value.contains(RECORD_DELIMITER) {
        return Err(StoreError::InvalidField {
            field,
            reason: format!("must not contain '{RECORD_DELIMITER}'"),
        });
    }
    if value.contains(['\n', '\r']) {
        return Err(StoreError::InvalidField {
            field,
            reason: "must not contain line breaks".to_string(),
        });
    }
    Ok(())
}

/// Проверка ключа и значения перед дозаписью.
pub(crate) fn check_record(
    key: &str,
    value: &str,
) -> StoreResult<()> {
    if key.is_empty() {
        return Err(StoreError::InvalidField {
            field: "key",
            reason: "must not be empty".to_string(),
        });
    }
    check_field("key", key)?;
    check_field("value", value)
}

/// Разбирает строку `key:value`. Значение может быть пустым.
pub(crate) fn parse_line(
    location: &str,
    line_no: usize,
    line: &str,
) -> StoreResult<RawRecord> {
    let (key, value) = line.split_once(RECORD_DELIMITER).ok_or_else(|| {
        StoreError::malformed(
            location,
            line_no,
            format!("missing '{RECORD_DELIMITER}' delimiter"),
        )
    })?;

    Ok(RawRecord {
        line: line_no,
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line_splits_on_first_delimiter() {
        let rec = parse_line("passwd.txt", 1, "hubertdang:$argon2id$v=19").unwrap();
        assert_eq!(rec.key, "hubertdang");
        assert_eq!(rec.value, "$argon2id$v=19");

        let rec = parse_line("roles.txt", 2, "johndoe:").unwrap();
        assert_eq!(rec.key, "johndoe");
        assert_eq!(rec.value, "");
    }

    #[test]
    fn test_parse_line_without_delimiter_is_malformed() {
        let err = parse_line("passwd.txt", 7, "hubertdang").unwrap_err();
        assert!(err.is_corruption());
        assert!(err.to_string().contains("passwd.txt:7"));
    }

    #[test]
    fn test_check_record() {
        assert!(check_record("hubertdang", "Client,Premium Client").is_ok());
        assert!(check_record("johndoe", "").is_ok());
        assert!(check_record("", "x").is_err());
        assert!(check_record("bad:name", "x").is_err());
        assert!(check_record("name", "a:b").is_err());
        assert!(check_record("name", "a\nb").is_err());
    }
}
