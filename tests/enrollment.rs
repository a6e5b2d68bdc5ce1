use std::{collections::BTreeSet, fs, path::PathBuf};

use rolegate::{
    AuthError, AuthManager, ErrorExt, HasherConfig, PasswordError, Role, Settings, StatusCode,
    ValidationError,
};
use tempfile::{tempdir, TempDir};

fn settings_in(dir: &TempDir) -> Settings {
    Settings {
        data_dir: dir.path().to_path_buf(),
        weak_passwd_file: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/weak_passwd.txt"),
        hasher: HasherConfig {
            memory_kib: 16_384,
            iterations: 2,
            parallelism: 1,
        },
        ..Default::default()
    }
}

fn roles(items: &[Role]) -> BTreeSet<Role> {
    items.iter().copied().collect()
}

/// Тест проверяет формат обоих файлов после регистрации.
#[test]
fn test_enroll_writes_both_stores() {
    let dir = tempdir().unwrap();
    let settings = settings_in(&dir);
    let manager = AuthManager::from_settings(&settings).unwrap();

    manager
        .enroll(
            "hubertdang",
            "asdfQWE123!",
            &roles(&[Role::Teller, Role::Employee]),
        )
        .unwrap();
    manager
        .enroll("johndoe", "zxcvASD456@", &BTreeSet::new())
        .unwrap();

    let passwd = fs::read_to_string(settings.passwd_path()).unwrap();
    let lines: Vec<&str> = passwd.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("hubertdang:$argon2id$v=19$m=16384,t=2,p=1$"));
    assert!(lines[1].starts_with("johndoe:$argon2id$"));
    assert!(!passwd.contains("asdfQWE123!"));
    assert_eq!(lines[0].matches(':').count(), 1);

    let roles_file = fs::read_to_string(settings.roles_path()).unwrap();
    assert_eq!(roles_file, "hubertdang:Employee,Teller\njohndoe:\n");
}

/// Тест проверяет, что данные переживают пересоздание менеджера.
#[test]
fn test_login_after_reopen() {
    let dir = tempdir().unwrap();
    let settings = settings_in(&dir);

    AuthManager::from_settings(&settings)
        .unwrap()
        .enroll(
            "hubertdang",
            "asdfQWE123!",
            &roles(&[Role::Client, Role::PremiumClient]),
        )
        .unwrap();

    let manager = AuthManager::from_settings(&settings).unwrap();
    let report = manager.login("hubertdang", "asdfQWE123!").unwrap();
    assert_eq!(report.sorted_role_names(), vec!["Client", "Premium Client"]);
    assert_eq!(report.authorized.len(), 5);
}

#[test]
fn test_user_without_roles_is_denied_everything() {
    let dir = tempdir().unwrap();
    let manager = AuthManager::from_settings(&settings_in(&dir)).unwrap();

    manager
        .enroll("johndoe", "zxcvASD456@", &BTreeSet::new())
        .unwrap();
    let report = manager.login("johndoe", "zxcvASD456@").unwrap();
    assert!(report.roles.is_empty());
    assert!(report.authorized.is_empty());
    assert!(report.to_string().contains("Role(s): \n"));
}

#[test]
fn test_weak_list_from_data_file() {
    let dir = tempdir().unwrap();
    let manager = AuthManager::from_settings(&settings_in(&dir)).unwrap();

    let err = manager
        .enroll("hubertdang", "P@ssw0rd", &BTreeSet::new())
        .unwrap_err();
    assert_eq!(err.to_string(), "Password too weak!");
    assert_eq!(err.status_code(), StatusCode::WeakPassword);
    assert!(!settings_in(&dir).passwd_path().exists());
}

#[test]
fn test_duplicate_username_rejected() {
    let dir = tempdir().unwrap();
    let manager = AuthManager::from_settings(&settings_in(&dir)).unwrap();

    manager
        .enroll("hubertdang", "asdfQWE123!", &BTreeSet::new())
        .unwrap();
    assert!(matches!(
        manager.validator().validate_username("hubertdang"),
        Err(ValidationError::UsernameTaken)
    ));
}

/// Тест проверяет, что неизвестный пользователь и неверный пароль дают
/// одинаковое сообщение, а внутренние причины различаются.
#[test]
fn test_no_username_enumeration() {
    let dir = tempdir().unwrap();
    let manager = AuthManager::from_settings(&settings_in(&dir)).unwrap();
    manager
        .enroll("hubertdang", "asdfQWE123!", &BTreeSet::new())
        .unwrap();

    let mismatch = manager.login("hubertdang", "asdfQWE123").unwrap_err();
    let missing = manager.login("janedoe1", "asdfQWE123!").unwrap_err();

    assert!(matches!(mismatch, AuthError::PasswordMismatch { .. }));
    assert!(matches!(missing, AuthError::UserNotFound { .. }));
    assert!(mismatch.is_invalid_credentials() && missing.is_invalid_credentials());
    assert_eq!(mismatch.client_message(), "Invalid username or password");
    assert_eq!(mismatch.client_message(), missing.client_message());
}

/// Тест проверяет, что при дубликатах побеждает первая запись в файле.
#[test]
fn test_first_record_wins() {
    let dir = tempdir().unwrap();
    let settings = settings_in(&dir);
    let manager = AuthManager::from_settings(&settings).unwrap();

    manager
        .enroll("hubertdang", "asdfQWE123!", &roles(&[Role::Client]))
        .unwrap();
    manager
        .credentials()
        .add_record("hubertdang", "zxcvASD456@")
        .unwrap();
    manager
        .roles()
        .add_record("hubertdang", &roles(&[Role::Employee]))
        .unwrap();

    let report = manager.login("hubertdang", "asdfQWE123!").unwrap();
    assert_eq!(report.sorted_role_names(), vec!["Client"]);
    assert!(manager.login("hubertdang", "zxcvASD456@").is_err());
}

#[test]
fn test_corrupted_role_record_is_an_error() {
    let dir = tempdir().unwrap();
    let settings = settings_in(&dir);
    let manager = AuthManager::from_settings(&settings).unwrap();

    manager
        .credentials()
        .add_record("hubertdang", "asdfQWE123!")
        .unwrap();
    fs::write(settings.roles_path(), "hubertdang:Client,Janitor\n").unwrap();

    let err = manager.login("hubertdang", "asdfQWE123!").unwrap_err();
    assert!(matches!(err, AuthError::Store(ref e) if e.is_corruption()));
    assert!(!err.is_invalid_credentials());
    assert_eq!(err.client_message(), "Internal error");
}

#[test]
fn test_missing_weak_list_fails_startup() {
    let dir = tempdir().unwrap();
    let settings = Settings {
        weak_passwd_file: dir.path().join("absent.txt"),
        ..settings_in(&dir)
    };
    assert!(matches!(
        AuthManager::from_settings(&settings),
        Err(AuthError::Store(_))
    ));
}

#[test]
fn test_weak_hasher_config_fails_startup() {
    let dir = tempdir().unwrap();
    let settings = Settings {
        hasher: HasherConfig {
            memory_kib: 8,
            iterations: 1,
            parallelism: 1,
        },
        ..settings_in(&dir)
    };
    assert!(matches!(
        AuthManager::from_settings(&settings),
        Err(AuthError::Password(PasswordError::Hash(_)))
    ));
}
