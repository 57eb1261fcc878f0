//! Merging command-line values with the selected profile.
use std::path::PathBuf;

use crate::{
    config::Profile,
    lib::errors::RunnerError,
    runner::{
        versions::{OdooVersion, DEFAULT_VERSION},
        RunOptions,
    },
};

/// Values taken from the command line; `None` and `false` defer to the profile.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunOverrides {
    pub addons: Option<Vec<String>>,
    pub version: Option<OdooVersion>,
    pub db: Option<String>,
    pub path: Option<PathBuf>,
    pub enterprise: bool,
    pub themes: bool,
    pub http_port: Option<u16>,
    pub http_interface: Option<String>,
    pub log_level: Option<String>,
    pub workers: Option<u32>,
    pub max_cron_threads: Option<u32>,
    pub extra_params: Option<String>,
}

/// Resolve every option in the order command line → profile → built-in default.
pub fn resolve_run_options(
    overrides: RunOverrides,
    profile: &Profile,
) -> Result<RunOptions, RunnerError> {
    let version = match (overrides.version, profile.version) {
        (Some(version), _) => version,
        (None, Some(number)) => OdooVersion::from_number(number)?,
        (None, None) => DEFAULT_VERSION,
    };
    let defaults = RunOptions::default();

    Ok(RunOptions {
        version: Some(version),
        addons: overrides
            .addons
            .or_else(|| profile.addons.clone())
            .unwrap_or_default(),
        db: overrides.db.or_else(|| profile.db.clone()),
        path: overrides.path.or_else(|| profile.path.clone()),
        enterprise: overrides.enterprise || profile.enterprise.unwrap_or(false),
        themes: overrides.themes || profile.themes.unwrap_or(false),
        http_port: overrides
            .http_port
            .or(profile.http_port)
            .unwrap_or(defaults.http_port),
        http_interface: overrides
            .http_interface
            .or_else(|| profile.http_interface.clone())
            .unwrap_or(defaults.http_interface),
        log_level: overrides
            .log_level
            .or_else(|| profile.log_level.clone())
            .unwrap_or(defaults.log_level),
        workers: overrides
            .workers
            .or(profile.workers)
            .unwrap_or(defaults.workers),
        max_cron_threads: overrides
            .max_cron_threads
            .or(profile.max_cron_threads)
            .unwrap_or(defaults.max_cron_threads),
        extra_params: overrides
            .extra_params
            .or_else(|| profile.extra_params.clone()),
        install_modules: true,
        db_host: profile.db_host.clone().unwrap_or(defaults.db_host),
        db_user: profile.db_user.clone().unwrap_or(defaults.db_user),
        db_password: profile.db_password.clone().unwrap_or(defaults.db_password),
    })
}
