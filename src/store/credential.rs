use tracing::debug;

use rolegate_error::AuthError;

use super::{FlatFileStore, RecordStore, StoreError, StoreResult};
use crate::auth::password::{PasswordError, PasswordHasher};

/// Запись учётных данных: имя пользователя и PHC-строка хеша пароля.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    pub username: String,
    pub hash: String,
}

impl CredentialRecord {
    /// Проверяет пароль по сохранённому хешу.
    pub fn verify(
        &self,
        hasher: &PasswordHasher,
        plaintext: &str,
    ) -> Result<(), PasswordError> {
        hasher.verify(&self.hash, plaintext)
    }
}

/// Хранилище учётных данных `username -> hash`.
///
/// Уникальность имён здесь не проверяется — это делает валидация до вызова
/// [`add_record`](Self::add_record).
#[derive(Debug)]
pub struct CredentialStore<S: RecordStore = FlatFileStore> {
    records: S,
    hasher: PasswordHasher,
}

impl<S: RecordStore> CredentialStore<S> {
    pub fn new(
        records: S,
        hasher: PasswordHasher,
    ) -> Self {
        Self { records, hasher }
    }

    pub fn hasher(&self) -> &PasswordHasher {
        &self.hasher
    }

    /// Хеширует пароль и дописывает запись. Ошибка — либо хеширование
    /// ([`AuthError::Password`]), либо запись ([`AuthError::Store`]).
    pub fn add_record(
        &self,
        username: &str,
        plaintext: &str,
    ) -> Result<CredentialRecord, AuthError> {
        let hash = self.hasher.hash(plaintext)?;
        self.records.append(username, &hash)?;

        debug!(
            username,
            store = %self.records.location(),
            "Credential record appended"
        );

        Ok(CredentialRecord {
            username: username.to_string(),
            hash,
        })
    }

    /// Первая запись с точно совпадающим именем либо `None`.
    pub fn get_record(
        &self,
        username: &str,
    ) -> StoreResult<Option<CredentialRecord>> {
        let Some(raw) = self.records.find_first(username)? else {
            return Ok(None);
        };

        if raw.value.is_empty() {
            return Err(StoreError::malformed(
                self.records.location(),
                raw.line,
                "empty password hash",
            ));
        }

        Ok(Some(CredentialRecord {
            username: raw.key,
            hash: raw.value,
        }))
    }

    /// Есть ли уже запись для этого имени.
    pub fn contains(
        &self,
        username: &str,
    ) -> StoreResult<bool> {
        Ok(self.records.find_first(username)?.is_some())
    }
}
