use std::{fs, io, path::PathBuf};

use serde::{Deserialize, Serialize};

/// Уровни, допустимые в `logging.level`.
pub const LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

/// Формат строк лога.
#[derive(Debug, Default, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
    Json,
}

/// Конфигурация логирования (секция `[logging]` настроек).
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Уровень для модулей крейта; зависимости всегда ограничены `warn`.
    pub level: String,
    pub format: LogFormat,
    /// Цветной вывод в stderr.
    pub with_ansi: bool,
    pub with_target: bool,
    /// Дополнительно писать лог в файл с ежедневной ротацией.
    pub file_enabled: bool,
    pub log_dir: PathBuf,
    pub file_name: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Compact,
            with_ansi: true,
            with_target: false,
            file_enabled: false,
            log_dir: PathBuf::from("logs"),
            file_name: "rolegate.log".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Проверяет уровень и имя файла.
    pub fn validate(&self) -> Result<(), String> {
        let level = self.level.to_ascii_lowercase();
        if !LEVELS.contains(&level.as_str()) {
            return Err(format!(
                "Invalid log level '{}': expected one of {}",
                self.level,
                LEVELS.join(", ")
            ));
        }
        if self.file_enabled && self.file_name.trim().is_empty() {
            return Err("Log file name must not be empty when file logging is enabled".into());
        }
        Ok(())
    }

    /// Директива для `EnvFilter`, например `warn,rolegate=debug`.
    pub fn build_filter_directive(&self) -> String {
        format!(
            "warn,{}={}",
            env!("CARGO_CRATE_NAME"),
            self.level.to_ascii_lowercase()
        )
    }

    /// Создаёт каталог логов, если файловый вывод включён.
    pub fn ensure_log_dir(&self) -> io::Result<()> {
        if self.file_enabled {
            fs::create_dir_all(&self.log_dir)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = LoggingConfig::default();
        assert_eq!(cfg.level, "warn");
        assert_eq!(cfg.format, LogFormat::Compact);
        assert!(!cfg.file_enabled);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_unknown_level() {
        let cfg = LoggingConfig {
            level: "verbose".into(),
            ..Default::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(err.contains("verbose"));
    }

    #[test]
    fn test_validate_is_case_insensitive() {
        let cfg = LoggingConfig {
            level: "DEBUG".into(),
            ..Default::default()
        };
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.build_filter_directive(), "warn,rolegate=debug");
    }

    /// Тест проверяет, что каталог создаётся только при включённом файловом
    /// выводе.
    #[test]
    fn test_ensure_log_dir() {
        let dir = tempdir().unwrap();
        let log_dir = dir.path().join("nested").join("logs");

        let mut cfg = LoggingConfig {
            log_dir: log_dir.clone(),
            ..Default::default()
        };
        cfg.ensure_log_dir().unwrap();
        assert!(!log_dir.exists());

        cfg.file_enabled = true;
        cfg.ensure_log_dir().unwrap();
        assert!(log_dir.is_dir());
    }
}
