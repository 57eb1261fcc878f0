//! CLI argument definitions.
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::{
    runner::{environment::PrepareOptions, OdooVersion},
    sql::ConnectionOverrides,
};

use super::profile::RunOverrides;

/// Command-line arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    author,
    version,
    about = "Bootstrap Odoo development environments and run, test, upgrade or inspect modules",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file to use instead of searching the working and user config directories.
    #[arg(long = "config", global = true)]
    pub config_path: Option<PathBuf>,
    /// Print external commands instead of running them.
    #[arg(long, global = true, default_value_t = false)]
    pub dry_run: bool,
    /// Debug logging on stderr (`RUST_LOG` takes precedence).
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Clone, Subcommand)]
pub enum CliCommand {
    /// Start an Odoo server with the module installed.
    TryModule(TryModuleArgs),
    /// Install the module with tests enabled and stop after init.
    TestModule(ModuleArgs),
    /// Upgrade the module in an existing database.
    UpgradeModule(ModuleArgs),
    /// Open an Odoo shell on an existing database.
    Shell(ModuleArgs),
    /// Open the Harlequin SQL client on a database.
    Harlequin(HarlequinArgs),
}

/// Arguments shared by every Odoo mode.
#[derive(Debug, Clone, Args)]
pub struct ModuleArgs {
    /// Module name, or several separated by commas. Defaults to the profile's addons.
    pub module: Option<String>,
    /// Odoo series such as 17.0. Defaults to the profile's version, then 18.0.
    #[arg(value_name = "VERSION", value_parser = parse_version)]
    pub odoo_version: Option<OdooVersion>,
    /// Profile to read defaults from (first declared profile when omitted).
    #[arg(long)]
    pub profile: Option<String>,
    /// Database name.
    #[arg(long)]
    pub db: Option<String>,
    /// Add the enterprise addons.
    #[arg(long, default_value_t = false)]
    pub enterprise: bool,
    /// Extra directory searched for addons.
    #[arg(long)]
    pub path: Option<PathBuf>,
    /// Additional raw arguments for odoo-bin, whitespace separated.
    #[arg(long, allow_hyphen_values = true)]
    pub extra_params: Option<String>,
    #[command(flatten)]
    pub setup: SetupArgs,
}

#[derive(Debug, Clone, Args)]
pub struct SetupArgs {
    /// Pull existing source checkouts before running.
    #[arg(long, default_value_t = false)]
    pub update: bool,
    /// Do not install distribution packages when creating a virtualenv.
    #[arg(long, default_value_t = false)]
    pub skip_system_deps: bool,
}

impl SetupArgs {
    pub fn prepare_options(&self) -> PrepareOptions {
        PrepareOptions {
            update_sources: self.update,
            system_packages: !self.skip_system_deps,
        }
    }
}

/// `try-module`: the shared arguments plus server tuning.
#[derive(Debug, Clone, Args)]
pub struct TryModuleArgs {
    #[command(flatten)]
    pub common: ModuleArgs,
    /// Add the design themes addons.
    #[arg(long, default_value_t = false)]
    pub themes: bool,
    /// HTTP port.
    #[arg(long)]
    pub port: Option<u16>,
    /// HTTP interface to bind.
    #[arg(long)]
    pub http_interface: Option<String>,
    /// Odoo log level.
    #[arg(long)]
    pub log_level: Option<String>,
    /// Number of worker processes (0 runs threaded).
    #[arg(long)]
    pub workers: Option<u32>,
    /// Number of cron threads.
    #[arg(long)]
    pub max_cron_threads: Option<u32>,
}

/// `harlequin`: database plus connection overrides.
#[derive(Debug, Clone, Args)]
pub struct HarlequinArgs {
    /// Database name. Defaults to the profile's `db`.
    pub db: Option<String>,
    /// Profile to read connection defaults from (first declared profile when omitted).
    #[arg(long)]
    pub profile: Option<String>,
    /// PostgreSQL host. Defaults to the profile's `db_host`, then localhost.
    #[arg(long)]
    pub host: Option<String>,
    /// PostgreSQL port. Defaults to the profile's `db_port`, then 5432.
    #[arg(long)]
    pub port: Option<u16>,
    /// PostgreSQL user. Defaults to the profile's `db_user`, then openerp.
    #[arg(long)]
    pub user: Option<String>,
    /// PostgreSQL password. Defaults to the profile's `db_password`, then openerp.
    #[arg(long)]
    pub password: Option<String>,
}

impl ModuleArgs {
    pub fn profile_name(&self) -> Option<&str> {
        self.profile.as_deref().filter(|name| !name.is_empty())
    }

    pub fn overrides(&self) -> RunOverrides {
        RunOverrides {
            addons: self.module.as_deref().map(split_modules),
            version: self.odoo_version,
            db: self.db.clone(),
            path: self.path.clone(),
            enterprise: self.enterprise,
            extra_params: self.extra_params.clone(),
            ..RunOverrides::default()
        }
    }
}

impl TryModuleArgs {
    pub fn overrides(&self) -> RunOverrides {
        RunOverrides {
            themes: self.themes,
            http_port: self.port,
            http_interface: self.http_interface.clone(),
            log_level: self.log_level.clone(),
            workers: self.workers,
            max_cron_threads: self.max_cron_threads,
            ..self.common.overrides()
        }
    }
}

impl HarlequinArgs {
    pub fn profile_name(&self) -> Option<&str> {
        self.profile.as_deref().filter(|name| !name.is_empty())
    }

    pub fn overrides(&self) -> ConnectionOverrides {
        ConnectionOverrides {
            database: self.db.clone(),
            host: self.host.clone(),
            port: self.port,
            user: self.user.clone(),
            password: self.password.clone(),
        }
    }
}

fn parse_version(value: &str) -> Result<OdooVersion, String> {
    OdooVersion::parse(value).map_err(|err| err.to_string())
}

fn split_modules(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
