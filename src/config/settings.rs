use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::{auth::HasherConfig, logging::LoggingConfig};

/// Префикс переменных окружения: `ROLEGATE_DATA_DIR`,
/// `ROLEGATE_HASHER__MEMORY_KIB`, `ROLEGATE_LOGGING__LEVEL` и т.д.
pub const ENV_PREFIX: &str = "ROLEGATE";

/// Настройки приложения.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Каталог, относительно которого разрешаются файлы хранилищ.
    pub data_dir: PathBuf,
    pub passwd_file: PathBuf,
    pub roles_file: PathBuf,
    /// Список слабых паролей; относительный путь берётся от текущего
    /// каталога, а не от `data_dir`.
    pub weak_passwd_file: PathBuf,
    #[serde(default)]
    pub hasher: HasherConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Settings {
    /// Значения по умолчанию, затем файл (если указан), затем окружение.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            // Добавляем значения по умолчанию
            .set_default("data_dir", ".")?
            .set_default("passwd_file", "passwd.txt")?
            .set_default("roles_file", "roles.txt")?
            .set_default("weak_passwd_file", "data/weak_passwd.txt")?;

        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path).required(true));
        }

        let cfg = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        cfg.try_deserialize()
    }

    pub fn passwd_path(&self) -> PathBuf {
        self.data_dir.join(&self.passwd_file)
    }

    pub fn roles_path(&self) -> PathBuf {
        self.data_dir.join(&self.roles_file)
    }

    pub fn weak_passwd_path(&self) -> &Path {
        &self.weak_passwd_file
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            passwd_file: PathBuf::from("passwd.txt"),
            roles_file: PathBuf::from("roles.txt"),
            weak_passwd_file: PathBuf::from("data/weak_passwd.txt"),
            hasher: HasherConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}
