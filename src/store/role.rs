use std::collections::BTreeSet;

use tracing::debug;

use super::{FlatFileStore, RecordStore, StoreError, StoreResult};
use crate::auth::role::{sorted_role_names, Role};

/// Разделитель ролей внутри поля.
pub const ROLE_SEPARATOR: char = ',';

/// Назначение ролей пользователю. Набор ролей может быть пустым.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleAssignment {
    pub username: String,
    pub roles: BTreeSet<Role>,
}

impl RoleAssignment {
    /// Роли по алфавиту отображаемой строки.
    pub fn sorted_role_names(&self) -> Vec<&'static str> {
        sorted_role_names(&self.roles)
    }
}

/// Хранилище ролей `username -> role1,role2,...`.
#[derive(Debug)]
pub struct RoleStore<S: RecordStore = FlatFileStore> {
    records: S,
}

impl<S: RecordStore> RoleStore<S> {
    pub fn new(records: S) -> Self {
        Self { records }
    }

    /// Дописывает назначение ролей. Пустой набор даёт строку `username:`.
    pub fn add_record(
        &self,
        username: &str,
        roles: &BTreeSet<Role>,
    ) -> StoreResult<()> {
        let field = roles
            .iter()
            .map(|r| r.as_str())
            .collect::<Vec<_>>()
            .join(&ROLE_SEPARATOR.to_string());

        self.records.append(username, &field)?;
        debug!(username, roles = %field, "Role record appended");
        Ok(())
    }

    /// Первая запись для имени либо `None`.
    ///
    /// Неизвестный токен роли — повреждение данных, а не повод пропустить
    /// запись.
    pub fn get_record(
        &self,
        username: &str,
    ) -> StoreResult<Option<RoleAssignment>> {
        let Some(raw) = self.records.find_first(username)? else {
            return Ok(None);
        };

        let mut roles = BTreeSet::new();
        if !raw.value.is_empty() {
            for token in raw.value.split(ROLE_SEPARATOR) {
                let role = Role::from_token(token).ok_or_else(|| {
                    StoreError::malformed(
                        self.records.location(),
                        raw.line,
                        format!("unknown role '{token}'"),
                    )
                })?;
                roles.insert(role);
            }
        }

        Ok(Some(RoleAssignment {
            username: raw.key,
            roles,
        }))
    }
}
