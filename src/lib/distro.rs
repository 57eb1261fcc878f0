//! Host distribution detection and the system packages Odoo needs to build its
//! Python dependencies.
use std::{fs, path::Path};

const OS_RELEASE: &str = "/etc/os-release";

/// Build dependencies on Debian and Ubuntu.
pub const DEBIAN_PACKAGES: &[&str] = &[
    "python3-dev",
    "libxml2-dev",
    "libxslt1-dev",
    "libevent-dev",
    "libsasl2-dev",
    "libldap2-dev",
    "libpq-dev",
    "libjpeg-dev",
    "libpng-dev",
    "libfreetype6-dev",
    "libffi-dev",
    "libssl-dev",
    "node-less",
    "postgresql-client",
];

/// Build dependencies on Fedora.
pub const FEDORA_PACKAGES: &[&str] = &[
    "python3-devel",
    "libxml2-devel",
    "libxslt-devel",
    "libevent-devel",
    "cyrus-sasl-devel",
    "openldap-devel",
    "libpq-devel",
    "libjpeg-turbo-devel",
    "libpng-devel",
    "freetype-devel",
    "libffi-devel",
    "openssl-devel",
    "postgresql",
];

/// Package manager family of the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Distro {
    Fedora,
    Debian,
    Unknown,
}

impl Distro {
    /// Detect from `/etc/os-release`; unreadable files yield `Unknown`.
    pub fn detect() -> Self {
        Self::detect_from(Path::new(OS_RELEASE))
    }

    pub fn detect_from(path: &Path) -> Self {
        fs::read_to_string(path)
            .map(|content| Self::from_os_release(&content))
            .unwrap_or(Distro::Unknown)
    }

    /// Classify using `ID` first, then `ID_LIKE`.
    pub fn from_os_release(content: &str) -> Self {
        let mut id = None;
        let mut id_like = None;
        for line in content.lines() {
            if let Some(value) = line.strip_prefix("ID=") {
                id = Some(unquote(value));
            } else if let Some(value) = line.strip_prefix("ID_LIKE=") {
                id_like = Some(unquote(value));
            }
        }

        let candidates = id
            .into_iter()
            .chain(id_like.iter().flat_map(|like| like.split_whitespace().map(str::to_string)));
        for candidate in candidates {
            match candidate.as_str() {
                "fedora" => return Distro::Fedora,
                "debian" | "ubuntu" => return Distro::Debian,
                _ => {}
            }
        }
        Distro::Unknown
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Distro::Fedora => "fedora",
            Distro::Debian => "debian",
            Distro::Unknown => "unknown",
        }
    }
}

fn unquote(value: &str) -> String {
    value.trim().trim_matches('"').trim_matches('\'').to_string()
}
