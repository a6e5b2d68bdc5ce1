use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

pub use rolegate_error::ValidationError;

use crate::store::{CredentialStore, RecordStore, StoreError, StoreResult};

pub const USERNAME_MIN_LEN: usize = 6;
pub const USERNAME_MAX_LEN: usize = 12;

pub const PASSWORD_MIN_LEN: usize = 8;
pub const PASSWORD_MAX_LEN: usize = 12;

/// Допустимые спецсимволы пароля.
pub const SPECIAL_CHARACTERS: [char; 7] = ['!', '@', '#', '$', '%', '*', '&'];

/// Список слабых паролей (denylist). Только для чтения.
#[derive(Debug, Clone, Default)]
pub struct WeakPasswordList {
    entries: Vec<String>,
}

impl WeakPasswordList {
    /// Читает список: один пароль на строку.
    ///
    /// В отличие от хранилищ записей, отсутствие файла — ошибка: без списка
    /// слабые пароли молча проходили бы проверку.
    pub fn load<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let path = path.as_ref();
        let location = path.display().to_string();
        let file = File::open(path).map_err(|e| StoreError::io(&location, e))?;

        let entries = BufReader::new(file)
            .lines()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| StoreError::io(&location, e))?;

        Ok(Self { entries })
    }

    pub fn from_lines<I, T>(lines: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            entries: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Точное совпадение с учётом регистра.
    pub fn is_weak(
        &self,
        candidate: &str,
    ) -> bool {
        self.entries.iter().any(|weak| weak == candidate)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Проверки имени пользователя и пароля при регистрации.
///
/// Правила применяются строго по порядку; возвращается первое нарушение.
pub struct Validator<'a, S: RecordStore> {
    credentials: &'a CredentialStore<S>,
    weak_passwords: &'a WeakPasswordList,
}

impl<'a, S: RecordStore> Validator<'a, S> {
    pub fn new(
        credentials: &'a CredentialStore<S>,
        weak_passwords: &'a WeakPasswordList,
    ) -> Self {
        Self {
            credentials,
            weak_passwords,
        }
    }

    /// Пробелы → не буквенно-цифровые символы → длина → уже занято.
    pub fn validate_username(
        &self,
        candidate: &str,
    ) -> Result<(), ValidationError> {
        if candidate.chars().any(char::is_whitespace) {
            return Err(ValidationError::UsernameWhitespace);
        }
        if candidate.is_empty() || !candidate.chars().all(char::is_alphanumeric) {
            return Err(ValidationError::UsernameNotAlphanumeric);
        }
        if !(USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&candidate.chars().count()) {
            return Err(ValidationError::UsernameLength {
                min: USERNAME_MIN_LEN,
                max: USERNAME_MAX_LEN,
            });
        }
        if self.credentials.contains(candidate)? {
            return Err(ValidationError::UsernameTaken);
        }
        Ok(())
    }

    /// Пробелы → заглавная → строчная → цифра → спецсимвол → длина →
    /// совпадение с именем → слабый пароль.
    pub fn validate_password(
        &self,
        candidate: &str,
        username: &str,
    ) -> Result<(), ValidationError> {
        check_password_rules(candidate, username)?;
        if self.weak_passwords.is_weak(candidate) {
            return Err(ValidationError::PasswordWeak);
        }
        Ok(())
    }

    pub fn is_weak(
        &self,
        candidate: &str,
    ) -> bool {
        self.weak_passwords.is_weak(candidate)
    }
}

/// Правила пароля, не требующие внешних данных.
fn check_password_rules(
    candidate: &str,
    username: &str,
) -> Result<(), ValidationError> {
    if candidate.chars().any(char::is_whitespace) {
        return Err(ValidationError::PasswordWhitespace);
    }
    if !candidate.chars().any(char::is_uppercase) {
        return Err(ValidationError::PasswordMissingUppercase);
    }
    if !candidate.chars().any(char::is_lowercase) {
        return Err(ValidationError::PasswordMissingLowercase);
    }
    if !candidate.chars().any(|c| c.is_ascii_digit()) {
        return Err(ValidationError::PasswordMissingDigit);
    }
    if !candidate.chars().any(|c| SPECIAL_CHARACTERS.contains(&c)) {
        return Err(ValidationError::PasswordMissingSpecial {
            allowed: special_characters_list(),
        });
    }
    if !(PASSWORD_MIN_LEN..=PASSWORD_MAX_LEN).contains(&candidate.chars().count()) {
        return Err(ValidationError::PasswordLength {
            min: PASSWORD_MIN_LEN,
            max: PASSWORD_MAX_LEN,
        });
    }
    if candidate == username {
        return Err(ValidationError::PasswordMatchesUsername);
    }
    Ok(())
}

fn special_characters_list() -> String {
    SPECIAL_CHARACTERS
        .iter()
        .map(char::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
