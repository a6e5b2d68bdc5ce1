use argon2::{
    password_hash::{
        Error as HashError, PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
    },
    Algorithm, Argon2, Params, Version,
};
use rand::rngs::OsRng;
use serde::Deserialize;

pub use rolegate_error::PasswordError;

/// Длина соли в байтах (128 бит). `SaltString::generate` выдаёт ровно столько.
pub const SALT_LENGTH: usize = 16;
/// Длина выхода хеша в байтах (256 бит).
pub const HASH_LENGTH: usize = 32;
/// Нижняя граница объёма памяти (16 MiB).
pub const MIN_MEMORY_KIB: u32 = 16 * 1024;
/// Нижняя граница числа итераций.
pub const MIN_ITERATIONS: u32 = 2;

/// Параметры Argon2id (рекомендации OWASP).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HasherConfig {
    /// Объём памяти в KiB.
    pub memory_kib: u32,
    /// Количество итераций.
    pub iterations: u32,
    /// Количество линий.
    pub parallelism: u32,
}

impl Default for HasherConfig {
    fn default() -> Self {
        Self {
            memory_kib: 19_456,
            iterations: 2,
            parallelism: 1,
        }
    }
}

/// Хеширование и проверка паролей через Argon2id.
///
/// Выход — самоописывающая PHC-строка вида
/// `$argon2id$v=19$m=19456,t=2,p=1$<salt>$<hash>`: соль и параметры встроены,
/// поэтому для проверки не нужно никакого внешнего состояния. Строка не
/// содержит `:`, что позволяет хранить её в файле учётных данных как есть.
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Создаёт хешер, отклоняя параметры ниже [`MIN_MEMORY_KIB`] и
    /// [`MIN_ITERATIONS`].
    pub fn new(config: HasherConfig) -> Result<Self, PasswordError> {
        if config.memory_kib < MIN_MEMORY_KIB {
            return Err(PasswordError::Hash(format!(
                "memory cost {} KiB is below the minimum of {MIN_MEMORY_KIB} KiB",
                config.memory_kib
            )));
        }
        if config.iterations < MIN_ITERATIONS {
            return Err(PasswordError::Hash(format!(
                "time cost {} is below the minimum of {MIN_ITERATIONS}",
                config.iterations
            )));
        }
        Self::with_params(config)
    }

    /// Дешёвый хешер для модульных тестов, в обход нижних границ.
    #[cfg(test)]
    pub(crate) fn for_tests() -> Self {
        Self::with_params(HasherConfig {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
        .expect("test params are accepted by argon2")
    }

    fn with_params(config: HasherConfig) -> Result<Self, PasswordError> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            Some(HASH_LENGTH),
        )
        .map_err(|e| PasswordError::Hash(e.to_string()))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Хеширует пароль со свежей случайной солью.
    pub fn hash(
        &self,
        plaintext: &str,
    ) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::Hash(e.to_string()))
    }

    /// Проверяет пароль по PHC-строке, используя параметры из самой строки.
    ///
    /// Сравнение выполняется за постоянное время. Несовпадение возвращается
    /// как [`PasswordError::Mismatch`], нечитаемая строка — как
    /// [`PasswordError::MalformedHash`].
    pub fn verify(
        &self,
        hash: &str,
        plaintext: &str,
    ) -> Result<(), PasswordError> {
        let parsed = PasswordHash::new(hash).map_err(|e| PasswordError::MalformedHash(e.to_string()))?;

        match self.argon2.verify_password(plaintext.as_bytes(), &parsed) {
            Ok(()) => Ok(()),
            Err(HashError::Password) => Err(PasswordError::Mismatch),
            Err(e) => Err(PasswordError::MalformedHash(e.to_string())),
        }
    }

    /// То же, что [`verify`](Self::verify), но несовпадение — это `Ok(false)`.
    pub fn is_match(
        &self,
        hash: &str,
        plaintext: &str,
    ) -> Result<bool, PasswordError> {
        match self.verify(hash, plaintext) {
            Ok(()) => Ok(true),
            Err(PasswordError::Mismatch) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

impl std::fmt::Debug for PasswordHasher {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("PasswordHasher")
            .field("algorithm", &Algorithm::Argon2id)
            .finish_non_exhaustive()
    }
}
