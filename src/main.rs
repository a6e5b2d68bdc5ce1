//! CLI Rolegate
//!
//! Регистрация пользователей, вход и просмотр ролевой модели доступа.
//! Без подкоманды запускается интерактивное меню.

use std::{io, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rolegate::{
    auth::{active_window, operations_for},
    init_logging,
    shell::{Shell, TerminalReader},
    AuthManager, Role, Settings,
};
use strum::IntoEnumIterator;
use tracing::debug;

/// Аргументы командной строки.
#[derive(Parser)]
#[command(name = "rolegate")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Rolegate - user enrollment and role-based access control", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Файл настроек (TOML)
    #[arg(
        short,
        long,
        env = "ROLEGATE_CONFIG",
        help = "Path to a TOML settings file"
    )]
    config: Option<PathBuf>,
    /// Каталог с файлами учётных данных и ролей
    #[arg(long, help = "Directory holding the credential and role files")]
    data_dir: Option<PathBuf>,
    /// Включить подробный вывод (debug)
    #[arg(short, long, help = "Enable debug logging")]
    verbose: bool,
    /// Подавить логи (только ошибки)
    #[arg(short, long, conflicts_with = "verbose", help = "Only log errors")]
    quiet: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Подкоманды CLI
#[derive(Subcommand)]
enum Commands {
    /// Интерактивное меню (по умолчанию)
    Shell,
    /// Зарегистрировать одного пользователя и выйти
    Signup,
    /// Войти и показать разрешённые операции
    Login,
    /// Показать матрицу авторизации и окна активности ролей
    Operations,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref()).context("Failed to load settings")?;
    if let Some(dir) = &cli.data_dir {
        settings.data_dir = dir.clone();
    }
    if cli.quiet {
        settings.logging.level = "error".to_string();
    } else if cli.verbose {
        settings.logging.level = "debug".to_string();
    }

    let logging = init_logging(settings.logging.clone())
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;
    debug!(?settings, "Settings loaded");

    let result = handle_command(&cli, &settings);
    logging.shutdown();
    result
}

fn handle_command(
    cli: &Cli,
    settings: &Settings,
) -> Result<()> {
    let command = cli.command.as_ref().unwrap_or(&Commands::Shell);
    if let Commands::Operations = command {
        return print_operations();
    }

    let manager = AuthManager::from_settings(settings).with_context(|| {
        format!(
            "Failed to initialize auth manager (weak password list: {})",
            settings.weak_passwd_path().display()
        )
    })?;
    let reader = TerminalReader::new().context("Failed to open terminal")?;
    let mut shell = Shell::new(&manager, reader, io::stdout());

    match command {
        Commands::Signup => shell.run_signup(),
        Commands::Login => shell.run_login(),
        Commands::Shell | Commands::Operations => shell.run(),
    }
    .context("Shell terminated with an error")
}

fn print_operations() -> Result<()> {
    for role in Role::iter() {
        println!("{role} (active {})", active_window(role));
        let ops = operations_for(role);
        if ops.is_empty() {
            println!("  (no operations)");
        }
        for op in ops {
            println!("  - {op}");
        }
    }
    Ok(())
}
