//! Locate, load and validate the run-odoo configuration file, and select profiles from it.
use std::{
    env, fs,
    path::{Path, PathBuf},
};

use toml::{Table, Value};
use tracing::{debug, error, info};

use crate::lib::{errors::ConfigError, paths};

pub mod profile;
mod telemetry;

pub use profile::Profile;

/// File names checked in every search location, in order.
pub const FILENAMES: [&str; 2] = [".run_odoo.toml", "run_odoo.toml"];
/// The only top-level key run-odoo interprets.
pub const PROFILE_KEY: &str = "profile";

/// Where a configuration file was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigOrigin {
    Explicit,
    WorkingDirectory,
    UserConfigDir,
}

/// Parsed configuration: named profiles in declaration order plus any other top-level keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub profiles: Vec<(String, Table)>,
    pub extra: Table,
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Resolve the configuration from an explicit path, the working directory or the
    /// user configuration directory.
    pub fn find(explicit_path: Option<&Path>) -> Result<Self, ConfigError> {
        let cwd = env::current_dir().ok();
        let user_dir = paths::user_config_dir();
        Self::find_in(explicit_path, cwd.as_deref(), user_dir.as_deref())
    }

    /// Same as [`Config::find`] with the search directories given explicitly.
    ///
    /// A missing explicit path is an error; finding nothing in the search
    /// directories yields an empty configuration.
    pub fn find_in(
        explicit_path: Option<&Path>,
        cwd: Option<&Path>,
        user_dir: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        if let Some(path) = explicit_path {
            if !path.exists() {
                error!(
                    target: "run_odoo::config",
                    path = %path.display(),
                    "Explicit configuration file does not exist"
                );
                return Err(ConfigError::NotFound {
                    path: path.to_path_buf(),
                });
            }
            telemetry::log_source(path, ConfigOrigin::Explicit);
            return Self::load_from_path(path);
        }

        let searches = [
            (cwd, ConfigOrigin::WorkingDirectory),
            (user_dir, ConfigOrigin::UserConfigDir),
        ];
        for (dir, origin) in searches {
            if let Some(path) = dir.and_then(search_dir) {
                telemetry::log_source(&path, origin);
                return Self::load_from_path(&path);
            }
        }

        telemetry::log_not_found(cwd, user_dir);
        Ok(Self::default())
    }

    /// Read, parse and validate one configuration file.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let document: Table = toml::from_str(&content).map_err(|err| {
            let error = ConfigError::Parse {
                path: path.to_path_buf(),
                message: err.message().to_string(),
            };
            error!(
                target: "run_odoo::config",
                path = %path.display(),
                reason = %error,
                "Failed to parse configuration file"
            );
            error
        })?;

        let document = Value::Table(document);
        validate(&document)?;
        let config = Self::from_validated(document, Some(path.to_path_buf()));
        telemetry::log_loaded(&config);
        Ok(config)
    }

    /// Build from a document that already passed [`validate`].
    fn from_validated(document: Value, source_path: Option<PathBuf>) -> Self {
        let Value::Table(mut table) = document else {
            return Self::default();
        };

        let profiles = match table.remove(PROFILE_KEY) {
            Some(Value::Table(profiles)) => profiles
                .into_iter()
                .filter_map(|(name, entry)| match entry {
                    Value::Table(entry) => Some((name, entry)),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        };

        Self {
            profiles,
            extra: table,
            source_path,
        }
    }

    /// Build from an in-memory document, validating it first.
    pub fn from_document(document: Value) -> Result<Self, ConfigError> {
        validate(&document)?;
        Ok(Self::from_validated(document, None))
    }

    /// Profile names in declaration order.
    pub fn profile_names(&self) -> impl Iterator<Item = &str> {
        self.profiles.iter().map(|(name, _)| name.as_str())
    }

    /// Select a profile by name, or the first declared one when no name is given.
    ///
    /// With no name and no profiles the result is an empty profile.
    pub fn select_profile(&self, name: Option<&str>) -> Result<Profile, ConfigError> {
        let selected = match name {
            Some(name) => Some(
                self.profiles
                    .iter()
                    .find(|(candidate, _)| candidate == name)
                    .ok_or_else(|| ConfigError::ProfileNotFound {
                        profile: name.to_string(),
                    })?,
            ),
            None => self.profiles.first(),
        };

        match selected {
            Some((name, table)) => {
                debug!(target: "run_odoo::config", profile = %name, "Selected profile");
                Profile::from_table(name, table)
            }
            None => Ok(Profile::default()),
        }
    }
}

/// Look for a configuration file in `dir`, dot-prefixed name first.
pub fn search_dir(dir: &Path) -> Option<PathBuf> {
    FILENAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.is_file())
}

/// Check the structural shape of a configuration document.
///
/// Only `version` is type-checked here; the remaining profile fields are typed when a
/// profile is selected.
pub fn validate(document: &Value) -> Result<(), ConfigError> {
    let table = document.as_table().ok_or_else(|| {
        ConfigError::shape(format!(
            "top-level configuration must be a table, found {}",
            document.type_str()
        ))
    })?;

    let Some(profiles) = table.get(PROFILE_KEY) else {
        return Ok(());
    };
    let profiles = profiles.as_table().ok_or_else(|| {
        ConfigError::shape(format!(
            "`{PROFILE_KEY}` must be a table of named profiles, found {}",
            profiles.type_str()
        ))
    })?;

    for (name, entry) in profiles {
        let entry = entry.as_table().ok_or_else(|| {
            ConfigError::shape(format!(
                "profile `{name}` must be a table, found {}",
                entry.type_str()
            ))
        })?;
        if let Some(version) = entry.get("version") {
            if !matches!(version, Value::Integer(_) | Value::Float(_)) {
                return Err(ConfigError::Field {
                    profile: name.clone(),
                    field: "version".into(),
                    message: format!(
                        "expected a number such as 16.0, found {}",
                        version.type_str()
                    ),
                });
            }
        }
    }

    info!(
        target: "run_odoo::config",
        profiles = profiles.len(),
        "Configuration shape validated"
    );
    Ok(())
}
