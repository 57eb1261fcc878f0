//! On-disk layout of one Odoo series and the steps that make it runnable:
//! source checkouts, a pyenv interpreter, a virtualenv and its dependencies.
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::lib::{
    distro::{Distro, DEBIAN_PACKAGES, FEDORA_PACKAGES},
    errors::RunnerError,
    paths,
    process::{CommandRunner, ExecContext, Invocation},
};

use super::versions::OdooVersion;

pub const ODOO_REPO_URL: &str = "https://github.com/odoo/odoo.git";
pub const ENTERPRISE_REPO_URL: &str = "git@github.com:odoo/enterprise.git";
pub const THEMES_REPO_URL: &str = "https://github.com/odoo/design-themes.git";

/// Written into the virtualenv once every dependency step has succeeded.
pub const READY_MARKER: &str = ".run_odoo_ready";

/// Directories and executables for one Odoo series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    pub version: OdooVersion,
    pub python_version: &'static str,
    pub checkout: PathBuf,
    pub enterprise_dir: PathBuf,
    pub themes_dir: PathBuf,
    pub venv_name: String,
    pub venv_dir: PathBuf,
}

impl Workspace {
    /// Layout rooted at explicit application and pyenv directories.
    pub fn new(
        app_dir: &Path,
        pyenv_root: &Path,
        version: OdooVersion,
    ) -> Result<Self, RunnerError> {
        let series = version.to_string();
        let venv_name = version.venv_name();
        Ok(Self {
            version,
            python_version: version.python_version()?,
            checkout: app_dir.join(&series).join("odoo"),
            enterprise_dir: app_dir.join("enterprise").join(&series),
            themes_dir: app_dir.join("themes").join(&series),
            venv_dir: pyenv_root.join("versions").join(&venv_name),
            venv_name,
        })
    }

    /// Layout under `RUN_ODOO_HOME` (or the user config dir) and `PYENV_ROOT`.
    pub fn resolve(version: OdooVersion) -> Result<Self, RunnerError> {
        Self::new(&paths::app_dir()?, &paths::pyenv_root()?, version)
    }

    pub fn venv_bin(&self) -> PathBuf {
        self.venv_dir.join("bin")
    }

    pub fn odoo_bin(&self) -> PathBuf {
        self.checkout.join("odoo-bin")
    }

    pub fn ready_marker(&self) -> PathBuf {
        self.venv_dir.join(READY_MARKER)
    }

    /// Context under which tools of the virtualenv run.
    pub fn venv_context(&self) -> ExecContext {
        ExecContext::default()
            .with_env("VIRTUAL_ENV", self.venv_dir.display().to_string())
            .with_path_prefix(self.venv_bin())
    }
}

/// Knobs for environment preparation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrepareOptions {
    /// `git pull` checkouts that already exist.
    pub update_sources: bool,
    /// Install distribution packages when creating a virtualenv.
    pub system_packages: bool,
}

impl Default for PrepareOptions {
    fn default() -> Self {
        Self {
            update_sources: false,
            system_packages: true,
        }
    }
}

/// Which optional source trees the invocation needs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sources {
    pub enterprise: bool,
    pub themes: bool,
}

/// Make sure every piece needed to run the series exists, creating what is missing.
pub async fn prepare(
    commands: &dyn CommandRunner,
    workspace: &Workspace,
    sources: Sources,
    options: PrepareOptions,
) -> Result<(), RunnerError> {
    let version = workspace.version;
    ensure_checkout(
        commands,
        ODOO_REPO_URL,
        &workspace.checkout,
        version,
        options.update_sources,
    )
    .await?;
    if sources.enterprise {
        ensure_checkout(
            commands,
            ENTERPRISE_REPO_URL,
            &workspace.enterprise_dir,
            version,
            options.update_sources,
        )
        .await?;
    }
    if sources.themes {
        ensure_checkout(
            commands,
            THEMES_REPO_URL,
            &workspace.themes_dir,
            version,
            options.update_sources,
        )
        .await?;
    }

    ensure_python(commands, workspace.python_version).await?;
    ensure_venv(commands, workspace, options).await
}

async fn ensure_checkout(
    commands: &dyn CommandRunner,
    url: &str,
    target: &Path,
    version: OdooVersion,
    update: bool,
) -> Result<(), RunnerError> {
    if target.join(".git").exists() {
        if update {
            info!(target: "run_odoo::environment", path = %target.display(), "Updating checkout");
            commands
                .run(
                    &Invocation::new("git")
                        .args(["pull", "--ff-only", "--quiet"])
                        .context(ExecContext::in_dir(target)),
                )
                .await?;
        } else {
            debug!(target: "run_odoo::environment", path = %target.display(), "Checkout present");
        }
        return Ok(());
    }

    println!("Cloning {url} ({version}) into {}", target.display());
    commands
        .run(
            &Invocation::new("git")
                .args(["clone", url, "--branch"])
                .arg(version.to_string())
                .args(["--single-branch", "--quiet"])
                .path_arg(target),
        )
        .await?;
    Ok(())
}

async fn ensure_python(
    commands: &dyn CommandRunner,
    python_version: &str,
) -> Result<(), RunnerError> {
    let installed = commands
        .probe(&Invocation::new("pyenv").args(["prefix", python_version]))
        .await?;
    if installed {
        debug!(target: "run_odoo::environment", python_version, "Interpreter present");
        return Ok(());
    }

    println!("Installing Python {python_version} with pyenv");
    commands
        .run(&Invocation::new("pyenv").args(["install", python_version]))
        .await?;
    Ok(())
}

async fn ensure_venv(
    commands: &dyn CommandRunner,
    workspace: &Workspace,
    options: PrepareOptions,
) -> Result<(), RunnerError> {
    if workspace.ready_marker().exists() {
        debug!(
            target: "run_odoo::environment",
            venv = %workspace.venv_dir.display(),
            "Virtualenv ready"
        );
        return Ok(());
    }

    if workspace.venv_dir.exists() {
        // A previous setup stopped between creation and the marker.
        warn!(
            target: "run_odoo::environment",
            venv = %workspace.venv_dir.display(),
            "Virtualenv incomplete; reinstalling dependencies"
        );
        println!(
            "Virtualenv {} is incomplete, reinstalling its dependencies",
            workspace.venv_name
        );
    } else {
        println!(
            "Creating virtualenv {} (Python {})",
            workspace.venv_name, workspace.python_version
        );
        commands
            .run(&Invocation::new("pyenv").args([
                "virtualenv",
                workspace.python_version,
                workspace.venv_name.as_str(),
            ]))
            .await?;
    }

    if options.system_packages {
        install_system_packages(commands, Distro::detect()).await?;
    }

    let pip = workspace.venv_bin().join("pip");
    let in_checkout = workspace
        .venv_context()
        .with_cwd(&workspace.checkout);
    for args in [
        ["install", "-e", "."].as_slice(),
        ["install", "-r", "requirements.txt"].as_slice(),
    ] {
        commands
            .run(
                &Invocation::new(&pip)
                    .args(args.iter().copied())
                    .context(in_checkout.clone()),
            )
            .await?;
    }

    commands
        .run(&Invocation::new("touch").path_arg(&workspace.ready_marker()))
        .await?;
    Ok(())
}

/// Install the native libraries Odoo's Python dependencies build against.
pub async fn install_system_packages(
    commands: &dyn CommandRunner,
    distro: Distro,
) -> Result<(), RunnerError> {
    info!(target: "run_odoo::environment", distro = distro.as_str(), "Installing system packages");
    match distro {
        Distro::Fedora => {
            commands
                .run(
                    &Invocation::new("sudo")
                        .args(["dnf", "install", "-y"])
                        .args(FEDORA_PACKAGES.iter().copied()),
                )
                .await?;
        }
        Distro::Debian => {
            commands
                .run(&Invocation::new("sudo").args(["apt-get", "update"]))
                .await?;
            commands
                .run(
                    &Invocation::new("sudo")
                        .args(["apt-get", "install", "-y"])
                        .args(DEBIAN_PACKAGES.iter().copied()),
                )
                .await?;
        }
        Distro::Unknown => {
            warn!(target: "run_odoo::environment", "Unrecognised distribution; skipping system packages");
            println!("Warning: unrecognised Linux distribution, skipping system package installation");
        }
    }
    Ok(())
}
