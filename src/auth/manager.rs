use std::{collections::BTreeSet, fmt};

use rolegate_error::{AuthError, ErrorExt, PasswordError};
use strum::IntoEnumIterator;
use tracing::{info, warn};

use super::{
    password::PasswordHasher,
    policy::AuthorizationEngine,
    role::{sorted_role_names, Operation, Role},
    validation::{Validator, WeakPasswordList},
};
use crate::{
    config::Settings,
    store::{CredentialRecord, CredentialStore, FlatFileStore, RecordStore, RoleStore},
};

/// Результат успешного входа.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginReport {
    pub username: String,
    pub roles: BTreeSet<Role>,
    pub authorized: BTreeSet<Operation>,
}

impl LoginReport {
    pub fn sorted_role_names(&self) -> Vec<&'static str> {
        sorted_role_names(&self.roles)
    }
}

impl fmt::Display for LoginReport {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "Username: {}", self.username)?;
        writeln!(f, "Role(s): {}", self.sorted_role_names().join(", "))?;

        writeln!(f)?;
        writeln!(f, "System operations:")?;
        for op in Operation::iter() {
            writeln!(f, "- {op}")?;
        }

        writeln!(f)?;
        writeln!(f, "Authorized operations:")?;
        for op in &self.authorized {
            writeln!(f, "- {op}")?;
        }
        Ok(())
    }
}

/// Регистрация и вход: связывает хранилища, валидацию и движок авторизации.
#[derive(Debug)]
pub struct AuthManager<S: RecordStore = FlatFileStore> {
    credentials: CredentialStore<S>,
    roles: RoleStore<S>,
    weak_passwords: WeakPasswordList,
    engine: AuthorizationEngine,
}

impl AuthManager<FlatFileStore> {
    /// Собирает менеджер из настроек: файлы хранилищ, список слабых паролей,
    /// параметры Argon2.
    pub fn from_settings(settings: &Settings) -> Result<Self, AuthError> {
        let hasher = PasswordHasher::new(settings.hasher)?;
        let weak_passwords = WeakPasswordList::load(settings.weak_passwd_path())?;

        info!(
            passwd = %settings.passwd_path().display(),
            roles = %settings.roles_path().display(),
            weak_passwords = weak_passwords.len(),
            "Auth manager initialized"
        );

        Ok(Self::new(
            CredentialStore::new(FlatFileStore::new(settings.passwd_path()), hasher),
            RoleStore::new(FlatFileStore::new(settings.roles_path())),
            weak_passwords,
            AuthorizationEngine::new(),
        ))
    }
}

impl<S: RecordStore> AuthManager<S> {
    pub fn new(
        credentials: CredentialStore<S>,
        roles: RoleStore<S>,
        weak_passwords: WeakPasswordList,
        engine: AuthorizationEngine,
    ) -> Self {
        Self {
            credentials,
            roles,
            weak_passwords,
            engine,
        }
    }

    pub fn validator(&self) -> Validator<'_, S> {
        Validator::new(&self.credentials, &self.weak_passwords)
    }

    pub fn engine(&self) -> &AuthorizationEngine {
        &self.engine
    }

    pub fn credentials(&self) -> &CredentialStore<S> {
        &self.credentials
    }

    pub fn roles(&self) -> &RoleStore<S> {
        &self.roles
    }

    /// Регистрирует пользователя: валидация, запись учётных данных, затем
    /// запись ролей.
    ///
    /// Файлы обновляются независимо: сбой между двумя дозаписями оставит
    /// учётные данные без записи ролей. При входе такой пользователь
    /// получает пустой набор ролей.
    pub fn enroll(
        &self,
        username: &str,
        password: &str,
        roles: &BTreeSet<Role>,
    ) -> Result<(), AuthError> {
        let validator = self.validator();
        validator.validate_username(username)?;
        validator.validate_password(password, username)?;

        self.credentials.add_record(username, password)?;
        self.roles.add_record(username, roles)?;

        info!(
            username,
            roles = ?sorted_role_names(roles),
            "User enrolled"
        );
        Ok(())
    }

    /// Проверяет имя и пароль.
    pub fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<CredentialRecord, AuthError> {
        let record = self
            .credentials
            .get_record(username)?
            .ok_or_else(|| AuthError::UserNotFound {
                username: username.to_string(),
            })?;

        match record.verify(self.credentials.hasher(), password) {
            Ok(()) => Ok(record),
            Err(PasswordError::Mismatch) => Err(AuthError::PasswordMismatch {
                username: username.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// Вход: аутентификация, чтение ролей и вычисление разрешённых операций.
    pub fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<LoginReport, AuthError> {
        let record = match self.authenticate(username, password) {
            Ok(record) => record,
            Err(err) => {
                warn!(
                    username,
                    status = %err.status_code(),
                    reason = %err,
                    "Login failed"
                );
                return Err(err);
            }
        };

        let roles = match self.roles.get_record(&record.username)? {
            Some(assignment) => assignment.roles,
            None => {
                warn!(
                    username,
                    "Credential record has no role record; treating as no roles"
                );
                BTreeSet::new()
            }
        };

        let authorized = self.engine.authorized_operations(&roles);
        info!(
            username,
            roles = roles.len(),
            authorized = authorized.len(),
            "User logged in"
        );

        Ok(LoginReport {
            username: record.username,
            roles,
            authorized,
        })
    }
}
