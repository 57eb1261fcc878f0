use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that can occur while locating, parsing or validating the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicit configuration path was given but does not exist.
    #[error("Configuration file {path} does not exist")]
    NotFound { path: PathBuf },
    /// The configuration file exists but could not be read.
    #[error("Failed to read configuration file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The file is not valid TOML.
    #[error("Failed to parse configuration file {path}: {message}")]
    Parse { path: PathBuf, message: String },
    /// A structural value has the wrong type (top level, `profile`, or a profile entry).
    #[error("Invalid configuration shape: {message}")]
    Shape { message: String },
    /// A field inside a profile has the wrong type.
    #[error("Profile `{profile}` has invalid `{field}`: {message}")]
    Field {
        profile: String,
        field: String,
        message: String,
    },
    /// The requested profile is not declared in the configuration.
    #[error("Profile '{profile}' not found in configuration")]
    ProfileNotFound { profile: String },
}

impl ConfigError {
    pub(crate) fn shape(message: impl Into<String>) -> Self {
        Self::Shape {
            message: message.into(),
        }
    }
}

/// Failures while running an external program.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The program could not be found on `PATH`.
    #[error("`{program}` was not found; is it installed and on PATH?")]
    NotFound { program: String },
    /// The program ran and exited unsuccessfully.
    #[error("`{command}` exited abnormally (exit={exit_code:?})")]
    Failed {
        command: String,
        exit_code: Option<i32>,
    },
    /// Spawning or waiting on the program failed for another reason.
    #[error("Failed to run `{program}`")]
    Io {
        program: String,
        #[source]
        source: io::Error,
    },
}

impl ProcessError {
    /// Classify a spawn error, separating "program missing" from other I/O failures.
    pub fn from_spawn_error(program: impl Into<String>, source: io::Error) -> Self {
        let program = program.into();
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound { program }
        } else {
            Self::Io { program, source }
        }
    }
}

/// High-level failures while preparing or assembling an Odoo invocation.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// No version on the command line or in the profile.
    #[error("Odoo version is required: pass it as an argument or set `version` in the profile")]
    MissingVersion,
    /// The version is not of the form `<major>.<minor>`.
    #[error("Invalid Odoo version `{value}`")]
    InvalidVersion { value: String },
    /// The series has no Python interpreter mapping.
    #[error("Unsupported Odoo version {version}: no known Python interpreter mapping")]
    UnsupportedVersion { version: String },
    /// Upgrade mode was given no addons.
    #[error("No modules specified for upgrade")]
    NoModulesSpecified,
    /// Shell and upgrade need an explicit database.
    #[error("A database name is required for `{mode}`: pass --db or set `db` in the profile")]
    MissingDatabase { mode: &'static str },
    /// `dirs` found no user configuration directory.
    #[error("Could not determine the user configuration directory")]
    NoConfigDir,
    /// `dirs` found no home directory.
    #[error("Could not determine the home directory")]
    NoHomeDir,
    /// An external step failed.
    #[error(transparent)]
    Process(#[from] ProcessError),
}

/// Failures of the SQL client launcher.
#[derive(Debug, Error)]
pub enum SqlClientError {
    /// No database on the command line or in the profile.
    #[error("Database name is required. Either specify it as an argument or include it in the profile configuration.")]
    MissingDatabase,
    /// `harlequin` is not on PATH.
    #[error("Harlequin is not installed. Install it with: pip install harlequin[postgres]")]
    NotInstalled,
    /// Harlequin started but failed.
    #[error("Error starting Harlequin")]
    Failed(#[source] ProcessError),
}

impl From<ProcessError> for SqlClientError {
    fn from(value: ProcessError) -> Self {
        match value {
            ProcessError::NotFound { .. } => SqlClientError::NotInstalled,
            other => SqlClientError::Failed(other),
        }
    }
}
