use std::path::Path;

use tracing::{debug, info};

use super::{Config, ConfigOrigin, FILENAMES};

pub fn log_source(path: &Path, origin: ConfigOrigin) {
    let origin = match origin {
        ConfigOrigin::Explicit => "explicit --config path",
        ConfigOrigin::WorkingDirectory => "current directory",
        ConfigOrigin::UserConfigDir => "user configuration directory",
    };
    info!(
        target: "run_odoo::config",
        path = %path.display(),
        origin,
        "Loading configuration file"
    );
}

pub fn log_not_found(cwd: Option<&Path>, user_dir: Option<&Path>) {
    debug!(
        target: "run_odoo::config",
        cwd = ?cwd,
        user_dir = ?user_dir,
        filenames = ?FILENAMES,
        "No configuration file found; continuing with an empty configuration"
    );
}

pub fn log_loaded(config: &Config) {
    info!(
        target: "run_odoo::config",
        path = ?config.source_path,
        profiles = ?config.profile_names().collect::<Vec<_>>(),
        extra_keys = config.extra.len(),
        "Configuration file loaded successfully"
    );
}
