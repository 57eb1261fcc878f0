//! Merged run options and the immutable per-mode execution parameters built from them.
use std::path::PathBuf;

use crate::lib::errors::RunnerError;

use super::versions::OdooVersion;

pub const DEFAULT_HTTP_PORT: u16 = 8069;
pub const DEFAULT_HTTP_INTERFACE: &str = "0.0.0.0";
pub const DEFAULT_LOG_LEVEL: &str = "warn";
pub const DEFAULT_DB_HOST: &str = "localhost";
pub const DEFAULT_DB_USER: &str = "odoo";
pub const DEFAULT_DB_PASSWORD: &str = "odoo";
/// Module used in derived database names when no addon is given.
const FALLBACK_MODULE: &str = "base";

/// Options after merging command-line overrides, profile values and defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    pub version: Option<OdooVersion>,
    pub addons: Vec<String>,
    pub db: Option<String>,
    pub path: Option<PathBuf>,
    pub enterprise: bool,
    pub themes: bool,
    pub http_port: u16,
    pub http_interface: String,
    pub log_level: String,
    pub workers: u32,
    pub max_cron_threads: u32,
    pub extra_params: Option<String>,
    pub install_modules: bool,
    pub db_host: String,
    pub db_user: String,
    pub db_password: String,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            version: None,
            addons: Vec::new(),
            db: None,
            path: None,
            enterprise: false,
            themes: false,
            http_port: DEFAULT_HTTP_PORT,
            http_interface: DEFAULT_HTTP_INTERFACE.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            workers: 0,
            max_cron_threads: 0,
            extra_params: None,
            install_modules: true,
            db_host: DEFAULT_DB_HOST.to_string(),
            db_user: DEFAULT_DB_USER.to_string(),
            db_password: DEFAULT_DB_PASSWORD.to_string(),
        }
    }
}

/// The four ways run-odoo drives `odoo-bin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Run,
    Test,
    Shell,
    Upgrade,
}

impl Mode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Mode::Run => "run",
            Mode::Test => "test",
            Mode::Shell => "shell",
            Mode::Upgrade => "upgrade",
        }
    }
}

/// What to do with the selected addons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleAction {
    Install,
    Upgrade,
}

impl ModuleAction {
    pub const fn flag(&self) -> &'static str {
        match self {
            ModuleAction::Install => "-i",
            ModuleAction::Upgrade => "-u",
        }
    }
}

/// Fully resolved parameters for one invocation. Built once per mode, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSpec {
    pub mode: Mode,
    pub version: OdooVersion,
    pub python_version: &'static str,
    pub addons: Vec<String>,
    pub database: String,
    pub enterprise: bool,
    pub themes: bool,
    pub custom_path: Option<PathBuf>,
    pub http_port: u16,
    pub http_interface: String,
    pub log_level: String,
    pub workers: u32,
    pub max_cron_threads: u32,
    pub module_action: Option<ModuleAction>,
    pub test_enable: bool,
    pub stop_after_init: bool,
    pub extra_params: Vec<String>,
    pub db_host: String,
    pub db_user: String,
    pub db_password: String,
}

impl RunSpec {
    /// Interactive run; derives the database name when none is given.
    pub fn run(options: RunOptions) -> Result<Self, RunnerError> {
        Self::build(Mode::Run, options)
    }

    /// Test run: tests enabled, stop after init, single process.
    pub fn test(options: RunOptions) -> Result<Self, RunnerError> {
        Self::build(
            Mode::Test,
            RunOptions {
                workers: 0,
                ..options
            },
        )
    }

    /// Interactive shell against an existing database.
    pub fn shell(options: RunOptions) -> Result<Self, RunnerError> {
        Self::build(Mode::Shell, options)
    }

    /// Upgrade the given addons in an existing database.
    pub fn upgrade(options: RunOptions) -> Result<Self, RunnerError> {
        if options.addons.is_empty() {
            return Err(RunnerError::NoModulesSpecified);
        }
        Self::build(Mode::Upgrade, options)
    }

    pub fn for_mode(mode: Mode, options: RunOptions) -> Result<Self, RunnerError> {
        match mode {
            Mode::Run => Self::run(options),
            Mode::Test => Self::test(options),
            Mode::Shell => Self::shell(options),
            Mode::Upgrade => Self::upgrade(options),
        }
    }

    fn build(mode: Mode, options: RunOptions) -> Result<Self, RunnerError> {
        let version = options.version.ok_or(RunnerError::MissingVersion)?;
        let python_version = version.python_version()?;

        let explicit_db = options.db.filter(|db| !db.trim().is_empty());
        let database = match (explicit_db, mode) {
            (Some(db), _) => db,
            (None, Mode::Run | Mode::Test) => {
                derive_database_name(version, &options.addons, options.enterprise)
            }
            (None, Mode::Shell | Mode::Upgrade) => {
                return Err(RunnerError::MissingDatabase {
                    mode: mode.as_str(),
                })
            }
        };

        let module_action = match mode {
            Mode::Run | Mode::Test => (options.install_modules && !options.addons.is_empty())
                .then_some(ModuleAction::Install),
            Mode::Upgrade => Some(ModuleAction::Upgrade),
            Mode::Shell => None,
        };

        let extra_params = options
            .extra_params
            .as_deref()
            .map(|raw| raw.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default();

        Ok(Self {
            mode,
            version,
            python_version,
            addons: options.addons,
            database,
            enterprise: options.enterprise,
            themes: options.themes,
            custom_path: options.path,
            http_port: options.http_port,
            http_interface: options.http_interface,
            log_level: options.log_level,
            workers: options.workers,
            max_cron_threads: options.max_cron_threads,
            module_action,
            test_enable: mode == Mode::Test,
            stop_after_init: mode == Mode::Test,
            extra_params,
            db_host: options.db_host,
            db_user: options.db_user,
            db_password: options.db_password,
        })
    }
}

/// `v<major><e|c>_<first addon or base>`, e.g. `v16c_sale`.
pub fn derive_database_name(version: OdooVersion, addons: &[String], enterprise: bool) -> String {
    let edition = if enterprise { 'e' } else { 'c' };
    let module = addons
        .first()
        .map(String::as_str)
        .unwrap_or(FALLBACK_MODULE);
    format!("v{}{edition}_{module}", version.major)
}
