use std::fmt;

use crate::lib::errors::RunnerError;

/// Odoo series supported by run-odoo and the Python interpreter each one runs on.
pub const PYTHON_VERSIONS: &[(OdooVersion, &str)] = &[
    (OdooVersion::new(16, 0), "3.7.0"),
    (OdooVersion::new(17, 0), "3.12.0"),
    (OdooVersion::new(18, 0), "3.12.0"),
];

/// Series used when neither the command line nor the profile names one.
pub const DEFAULT_VERSION: OdooVersion = OdooVersion::new(18, 0);

/// An Odoo series such as `16.0`; its display form is also the git branch name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OdooVersion {
    pub major: u16,
    pub minor: u16,
}

impl OdooVersion {
    pub const fn new(major: u16, minor: u16) -> Self {
        Self { major, minor }
    }

    /// Interpret a number such as `16.0` or `17`; fractional digits are tenths.
    pub fn from_number(value: f64) -> Result<Self, RunnerError> {
        let invalid = || RunnerError::InvalidVersion {
            value: value.to_string(),
        };
        if !value.is_finite() || value < 1.0 || value >= f64::from(u16::MAX) {
            return Err(invalid());
        }
        let major = value.trunc();
        let minor = ((value - major) * 10.0).round();
        if minor >= 10.0 {
            return Err(invalid());
        }
        Ok(Self::new(major as u16, minor as u16))
    }

    /// Interpret `"16.0"` or `"16"`.
    pub fn parse(value: &str) -> Result<Self, RunnerError> {
        let invalid = || RunnerError::InvalidVersion {
            value: value.to_string(),
        };
        let (major, minor) = value.trim().split_once('.').unwrap_or((value.trim(), "0"));
        let major = major.parse::<u16>().map_err(|_| invalid())?;
        let minor = minor.parse::<u16>().map_err(|_| invalid())?;
        if major == 0 {
            return Err(invalid());
        }
        Ok(Self::new(major, minor))
    }

    /// Python interpreter version for this series.
    pub fn python_version(&self) -> Result<&'static str, RunnerError> {
        PYTHON_VERSIONS
            .iter()
            .find(|(version, _)| version == self)
            .map(|(_, python)| *python)
            .ok_or_else(|| RunnerError::UnsupportedVersion {
                version: self.to_string(),
            })
    }

    /// Name of the pyenv virtual environment for this series.
    pub fn venv_name(&self) -> String {
        format!("venv-odoo{self}")
    }
}

impl fmt::Display for OdooVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}
