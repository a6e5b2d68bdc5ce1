//! Интерактивная оболочка: меню Signup / Login / Quit.
//!
//! Оболочка только собирает ввод и печатает результат; вся логика живёт в
//! [`AuthManager`]. Ввод идёт через трейт [`LineReader`], поэтому тесты
//! подставляют заранее заготовленные строки вместо терминала.

use std::{collections::BTreeSet, io::Write, str::FromStr};

use rolegate_error::{AuthError, ErrorExt, ValidationError};
use rustyline::{error::ReadlineError, DefaultEditor};
use strum::{EnumCount, IntoEnumIterator};
use thiserror::Error;
use tracing::{debug, error};

use crate::{
    auth::{AuthManager, Role},
    store::RecordStore,
};

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("Failed to read input: {0}")]
    Readline(#[from] ReadlineError),
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Auth(#[from] AuthError),
}

pub type ShellResult<T> = Result<T, ShellError>;

/// Источник строк ввода. `Ok(None)` означает конец ввода (EOF или Ctrl-C).
pub trait LineReader {
    fn read_line(
        &mut self,
        prompt: &str,
        add_to_history: bool,
    ) -> Result<Option<String>, ReadlineError>;
}

/// Терминал на базе `rustyline`.
pub struct TerminalReader {
    editor: DefaultEditor,
}

impl TerminalReader {
    pub fn new() -> Result<Self, ReadlineError> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }
}

impl LineReader for TerminalReader {
    fn read_line(
        &mut self,
        prompt: &str,
        add_to_history: bool,
    ) -> Result<Option<String>, ReadlineError> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if add_to_history && !line.trim().is_empty() {
                    self.editor.add_history_entry(line.as_str())?;
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Пункт главного меню.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    Signup,
    Login,
    Quit,
}

impl FromStr for MenuOption {
    type Err = String;

    /// Принимает номер пункта или его название без учёта регистра.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "signup" => Ok(Self::Signup),
            "2" | "login" => Ok(Self::Login),
            "3" | "quit" | "exit" => Ok(Self::Quit),
            other => Err(format!("Invalid option: '{other}'")),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid role selection: '{0}'")]
pub struct RoleSelectionError(pub String);

/// Разбирает выбор ролей: номера (с 1) или отображаемые имена через запятую.
/// Пустая строка означает отсутствие ролей; повторы схлопываются.
pub fn parse_role_selection(input: &str) -> Result<BTreeSet<Role>, RoleSelectionError> {
    let mut roles = BTreeSet::new();
    if input.trim().is_empty() {
        return Ok(roles);
    }

    for token in input.split(',').map(str::trim) {
        let role = match token.parse::<usize>() {
            Ok(index) if (1..=Role::COUNT).contains(&index) => Role::iter().nth(index - 1),
            Ok(_) => None,
            Err(_) => Role::from_token(token),
        };
        roles.insert(role.ok_or_else(|| RoleSelectionError(token.to_string()))?);
    }
    Ok(roles)
}

enum Flow {
    Continue,
    Exit,
}

/// Главный цикл оболочки.
pub struct Shell<'a, S: RecordStore, R: LineReader, W: Write> {
    manager: &'a AuthManager<S>,
    reader: R,
    out: W,
}

impl<'a, S: RecordStore, R: LineReader, W: Write> Shell<'a, S, R, W> {
    pub fn new(
        manager: &'a AuthManager<S>,
        reader: R,
        out: W,
    ) -> Self {
        Self {
            manager,
            reader,
            out,
        }
    }

    /// Работает до `Quit` или конца ввода.
    pub fn run(&mut self) -> ShellResult<()> {
        loop {
            self.print_menu()?;
            let Some(line) = self.reader.read_line("Select an option: ", true)? else {
                break;
            };

            let flow = match line.parse::<MenuOption>() {
                Ok(MenuOption::Signup) => self.signup()?,
                Ok(MenuOption::Login) => self.login()?,
                Ok(MenuOption::Quit) => Flow::Exit,
                Err(msg) => {
                    writeln!(self.out, "{msg}")?;
                    Flow::Continue
                }
            };

            if let Flow::Exit = flow {
                break;
            }
        }
        writeln!(self.out, "Goodbye!")?;
        Ok(())
    }

    /// Единичная регистрация (без меню).
    pub fn run_signup(&mut self) -> ShellResult<()> {
        self.signup().map(|_| ())
    }

    /// Единичный вход (без меню).
    pub fn run_login(&mut self) -> ShellResult<()> {
        self.login().map(|_| ())
    }

    pub fn into_output(self) -> W {
        self.out
    }

    fn print_menu(&mut self) -> ShellResult<()> {
        writeln!(self.out)?;
        writeln!(self.out, "Main Menu")?;
        writeln!(self.out, "1. Signup")?;
        writeln!(self.out, "2. Login")?;
        writeln!(self.out, "3. Quit")?;
        Ok(())
    }

    fn signup(&mut self) -> ShellResult<Flow> {
        let manager = self.manager;
        let validator = manager.validator();

        let username = loop {
            let Some(candidate) = self.reader.read_line("Enter username: ", true)? else {
                return Ok(Flow::Exit);
            };
            match validator.validate_username(&candidate) {
                Ok(()) => break candidate,
                Err(e) => self.report_validation(e)?,
            }
        };

        let password = loop {
            let Some(candidate) = self.reader.read_line("Enter password: ", false)? else {
                return Ok(Flow::Exit);
            };
            match validator.validate_password(&candidate, &username) {
                Ok(()) => break candidate,
                Err(e) => self.report_validation(e)?,
            }
        };

        let roles = loop {
            writeln!(self.out, "Roles:")?;
            for (i, role) in Role::iter().enumerate() {
                writeln!(self.out, "{}. {role}", i + 1)?;
            }
            let Some(selection) = self
                .reader
                .read_line("Select role(s) (comma-separated, blank for none): ", true)?
            else {
                return Ok(Flow::Exit);
            };
            match parse_role_selection(&selection) {
                Ok(roles) => break roles,
                Err(e) => writeln!(self.out, "{e}")?,
            }
        };

        match manager.enroll(&username, &password, &roles) {
            Ok(()) => writeln!(self.out, "Signup successful!")?,
            Err(AuthError::Validation(e)) if e.is_rule_violation() => {
                writeln!(self.out, "{e}")?;
            }
            Err(e) => return Err(e.into()),
        }
        Ok(Flow::Continue)
    }

    fn login(&mut self) -> ShellResult<Flow> {
        let Some(username) = self.reader.read_line("Enter username: ", true)? else {
            return Ok(Flow::Exit);
        };
        let Some(password) = self.reader.read_line("Enter password: ", false)? else {
            return Ok(Flow::Exit);
        };

        match self.manager.login(&username, &password) {
            Ok(report) => {
                writeln!(self.out)?;
                write!(self.out, "{report}")?;
            }
            Err(e) if e.is_invalid_credentials() => {
                debug!(status = %e.status_code(), "Login rejected");
                writeln!(self.out, "{}", e.client_message())?;
            }
            Err(e) => {
                error!(error = %e.log_message(), "Login aborted");
                writeln!(self.out, "Error: {}", e.client_message())?;
            }
        }
        Ok(Flow::Continue)
    }

    /// Нарушение правила печатается и ввод повторяется; сбой хранилища
    /// прерывает оболочку.
    fn report_validation(
        &mut self,
        err: ValidationError,
    ) -> ShellResult<()> {
        if !err.is_rule_violation() {
            return Err(AuthError::from(err).into());
        }
        writeln!(self.out, "{err}")?;
        Ok(())
    }
}
