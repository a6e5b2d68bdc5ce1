use std::{collections::BTreeSet, str::FromStr};

use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// Роль пользователя.
///
/// Строковое представление (`Display`/`FromStr`) — это формат хранения в
/// файле ролей; оно не зависит от порядка вариантов, поэтому перестановка
/// вариантов не ломает сохранённые данные.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
    strum_macros::EnumCount,
)]
#[repr(u8)]
pub enum Role {
    #[strum(serialize = "Client")]
    Client,
    #[strum(serialize = "Premium Client")]
    PremiumClient,
    #[strum(serialize = "Employee")]
    Employee,
    #[strum(serialize = "Financial Advisor")]
    FinancialAdvisor,
    #[strum(serialize = "Financial Planner")]
    FinancialPlanner,
    #[strum(serialize = "Teller")]
    Teller,
}

/// Операция (право), которую система может разрешить пользователю.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
    strum_macros::EnumCount,
)]
#[repr(u8)]
pub enum Operation {
    #[strum(serialize = "View your own account balance")]
    ViewOwnAccountBalance,
    #[strum(serialize = "View any account balance")]
    ViewAnyAccountBalance,
    #[strum(serialize = "View your own investment portfolio")]
    ViewOwnInvestmentPortfolio,
    #[strum(serialize = "View any investment portfolio")]
    ViewAnyInvestmentPortfolio,
    #[strum(serialize = "Modify your own investment portfolio")]
    ModifyOwnInvestmentPortfolio,
    #[strum(serialize = "Modify any investment portfolio")]
    ModifyAnyInvestmentPortfolio,
    #[strum(serialize = "View Financial Advisor contact info")]
    ViewFinancialAdvisorContactInfo,
    #[strum(serialize = "View Financial Planner contact info")]
    ViewFinancialPlannerContactInfo,
    #[strum(serialize = "View money market instruments")]
    ViewMoneyMarketInstruments,
    #[strum(serialize = "View private consumer instruments")]
    ViewPrivateConsumerInstruments,
}

impl Role {
    /// Отображаемое имя роли (оно же токен в файле ролей).
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Индекс роли в статических таблицах.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Разбирает токен из хранилища. Сравнение точное, с учётом регистра.
    pub fn from_token(token: &str) -> Option<Self> {
        Self::from_str(token).ok()
    }
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Имена ролей, отсортированные по алфавиту отображаемой строки.
pub fn sorted_role_names(roles: &BTreeSet<Role>) -> Vec<&'static str> {
    let mut names: Vec<&'static str> = roles.iter().map(|r| r.as_str()).collect();
    names.sort_unstable();
    names
}

#[cfg(test)]
mod tests {
    use strum::{EnumCount, IntoEnumIterator};

    use super::*;

    /// Тест проверяет, что каждая роль переживает преобразование в токен и
    /// обратно.
    #[test]
    fn test_role_tokens() {
        assert_eq!(Role::PremiumClient.to_string(), "Premium Client");
        assert_eq!(Role::from_token("Financial Planner"), Some(Role::FinancialPlanner));
        for role in Role::iter() {
            assert_eq!(Role::from_token(role.as_str()), Some(role));
        }
    }

    #[test]
    fn test_role_tokens_are_case_sensitive() {
        assert_eq!(Role::from_token("client"), None);
        assert_eq!(Role::from_token("PremiumClient"), None);
        assert_eq!(Role::from_token(""), None);
    }

    #[test]
    fn test_indices_cover_enum() {
        let indices: Vec<usize> = Role::iter().map(Role::index).collect();
        assert_eq!(indices, (0..Role::COUNT).collect::<Vec<_>>());
        assert_eq!(Operation::COUNT, 10);
    }

    #[test]
    fn test_sorted_role_names() {
        let roles: BTreeSet<Role> = [Role::Teller, Role::PremiumClient, Role::Employee]
            .into_iter()
            .collect();
        assert_eq!(
            sorted_role_names(&roles),
            vec!["Employee", "Premium Client", "Teller"]
        );
    }

    #[test]
    fn test_operation_display() {
        assert_eq!(
            Operation::ViewFinancialAdvisorContactInfo.as_str(),
            "View Financial Advisor contact info"
        );
        assert_eq!(
            "View money market instruments".parse::<Operation>().ok(),
            Some(Operation::ViewMoneyMarketInstruments)
        );
    }
}
