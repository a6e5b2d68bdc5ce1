//! Ролевая модель доступа.
//!
//! Две статические таблицы, индексируемые дискриминантом [`Role`]:
//! - матрица авторизации `Role -> {Operation}`;
//! - окна активности `Role -> [start, end]` (обе границы включительно).
//!
//! Композиция ролей: если хотя бы одна роль сейчас вне своего окна, доступ
//! запрещается полностью; иначе разрешено объединение операций всех ролей.

use std::{collections::BTreeSet, fmt};

use chrono::{Local, NaiveTime, Timelike};
use once_cell::sync::Lazy;
use strum::{EnumCount, IntoEnumIterator};

use super::role::{Operation, Role};

/// Интервал времени суток, в течение которого права роли действуют.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl ActiveWindow {
    pub fn new(
        start: NaiveTime,
        end: NaiveTime,
    ) -> Self {
        debug_assert!(start <= end, "window must lie within a single day");
        Self { start, end }
    }

    /// Проверяет попадание в окно, включая обе границы.
    pub fn contains(
        &self,
        now: NaiveTime,
    ) -> bool {
        self.start <= now && now <= self.end
    }
}

impl fmt::Display for ActiveWindow {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.start.format("%H:%M:%S"),
            self.end.format("%H:%M:%S")
        )
    }
}

/// Источник текущего времени суток.
pub trait Clock: Send + Sync {
    fn time_of_day(&self) -> NaiveTime;
}

/// Локальное системное время, усечённое до секунды: окна заданы с точностью
/// до секунды, и `23:59:59.5` должно попадать в `[00:00:00, 23:59:59]`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn time_of_day(&self) -> NaiveTime {
        let now = Local::now().time();
        now.with_nanosecond(0).unwrap_or(now)
    }
}

/// Часы, всегда возвращающие одно и то же время. Используются в тестах.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveTime);

impl Clock for FixedClock {
    fn time_of_day(&self) -> NaiveTime {
        self.0
    }
}

fn hms(
    hour: u32,
    min: u32,
    sec: u32,
) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, min, sec).expect("valid time-of-day literal")
}

/// Операции, которые даёт каждая роль.
fn grants(role: Role) -> &'static [Operation] {
    use Operation::*;

    match role {
        Role::Client => &[
            ViewOwnAccountBalance,
            ViewOwnInvestmentPortfolio,
            ViewFinancialAdvisorContactInfo,
        ],
        Role::PremiumClient => &[
            ModifyOwnInvestmentPortfolio,
            ViewFinancialPlannerContactInfo,
        ],
        Role::Employee => &[ViewAnyAccountBalance, ViewAnyInvestmentPortfolio],
        Role::FinancialAdvisor => &[
            ModifyAnyInvestmentPortfolio,
            ViewPrivateConsumerInstruments,
        ],
        Role::FinancialPlanner => &[
            ModifyAnyInvestmentPortfolio,
            ViewMoneyMarketInstruments,
            ViewPrivateConsumerInstruments,
        ],
        // Собственных прав нет
        Role::Teller => &[],
    }
}

fn window(role: Role) -> ActiveWindow {
    match role {
        Role::Teller => ActiveWindow::new(hms(9, 0, 0), hms(17, 0, 0)),
        Role::Client
        | Role::PremiumClient
        | Role::Employee
        | Role::FinancialAdvisor
        | Role::FinancialPlanner => ActiveWindow::new(hms(0, 0, 0), hms(23, 59, 59)),
    }
}

static AUTHORIZATION_MATRIX: Lazy<[BTreeSet<Operation>; Role::COUNT]> = Lazy::new(|| {
    let mut matrix: [BTreeSet<Operation>; Role::COUNT] = Default::default();
    for role in Role::iter() {
        matrix[role.index()] = grants(role).iter().copied().collect();
    }
    matrix
});

static ACTIVE_WINDOWS: Lazy<[ActiveWindow; Role::COUNT]> = Lazy::new(|| {
    let mut windows = [window(Role::Client); Role::COUNT];
    for role in Role::iter() {
        windows[role.index()] = window(role);
    }
    windows
});

/// Операции роли из матрицы авторизации.
pub fn operations_for(role: Role) -> &'static BTreeSet<Operation> {
    &AUTHORIZATION_MATRIX[role.index()]
}

/// Окно активности роли.
pub fn active_window(role: Role) -> ActiveWindow {
    ACTIVE_WINDOWS[role.index()]
}

pub fn is_active_at(
    role: Role,
    now: NaiveTime,
) -> bool {
    active_window(role).contains(now)
}

/// Разрешённые операции для набора ролей в момент `now`.
///
/// Пустой набор ролей даёт пустой результат (deny by default).
pub fn authorized_operations_at(
    roles: &BTreeSet<Role>,
    now: NaiveTime,
) -> BTreeSet<Operation> {
    if roles.iter().any(|&role| !is_active_at(role, now)) {
        return BTreeSet::new();
    }

    roles
        .iter()
        .flat_map(|&role| operations_for(role).iter().copied())
        .collect()
}

/// Движок авторизации: статические таблицы плюс источник времени.
pub struct AuthorizationEngine {
    clock: Box<dyn Clock>,
}

impl AuthorizationEngine {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            clock: Box::new(clock),
        }
    }

    /// Активна ли роль прямо сейчас.
    pub fn is_active(
        &self,
        role: Role,
    ) -> bool {
        is_active_at(role, self.clock.time_of_day())
    }

    /// Время читается один раз, так что все роли проверяются на один и тот
    /// же момент.
    pub fn authorized_operations(
        &self,
        roles: &BTreeSet<Role>,
    ) -> BTreeSet<Operation> {
        authorized_operations_at(roles, self.clock.time_of_day())
    }
}

impl Default for AuthorizationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AuthorizationEngine {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("AuthorizationEngine")
            .field("time_of_day", &self.clock.time_of_day())
            .finish()
    }
}
