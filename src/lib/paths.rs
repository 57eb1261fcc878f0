//! Well-known directories used by run-odoo.
use std::{
    env,
    ffi::OsString,
    path::PathBuf,
};

use crate::lib::errors::RunnerError;

/// Directory name under the user configuration directory.
pub const APP_NAME: &str = "run_odoo";
/// Environment variable overriding the application directory.
const APP_HOME_ENV: &str = "RUN_ODOO_HOME";
/// Environment variable honoured by pyenv itself.
const PYENV_ROOT_ENV: &str = "PYENV_ROOT";

/// User-level configuration directory searched for config files (`<config_dir>/run_odoo`).
pub fn user_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME))
}

/// Directory holding source checkouts.
///
/// Resolution order:
/// 1. `$RUN_ODOO_HOME` when set and non-empty.
/// 2. `<config_dir>/run_odoo` otherwise.
pub fn app_dir() -> Result<PathBuf, RunnerError> {
    resolve_app_dir_from(env::var_os(APP_HOME_ENV), dirs::config_dir())
}

fn resolve_app_dir_from(
    app_home: Option<OsString>,
    config_dir: Option<PathBuf>,
) -> Result<PathBuf, RunnerError> {
    if let Some(home) = app_home.filter(|value| !value.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    config_dir
        .map(|dir| dir.join(APP_NAME))
        .ok_or(RunnerError::NoConfigDir)
}

/// Root of the pyenv installation (`$PYENV_ROOT`, else `~/.pyenv`).
pub fn pyenv_root() -> Result<PathBuf, RunnerError> {
    resolve_pyenv_root_from(env::var_os(PYENV_ROOT_ENV), dirs::home_dir())
}

fn resolve_pyenv_root_from(
    pyenv_root: Option<OsString>,
    home: Option<PathBuf>,
) -> Result<PathBuf, RunnerError> {
    if let Some(root) = pyenv_root.filter(|value| !value.is_empty()) {
        return Ok(PathBuf::from(root));
    }
    home.map(|home| home.join(".pyenv"))
        .ok_or(RunnerError::NoHomeDir)
}

/// Render a path list as the comma-separated form Odoo expects.
pub fn join_comma(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Keep only the candidates that exist on disk, preserving order.
pub fn existing(candidates: impl IntoIterator<Item = PathBuf>) -> Vec<PathBuf> {
    candidates.into_iter().filter(|path| path.exists()).collect()
}
