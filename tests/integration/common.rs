use std::{
    path::{Path, PathBuf},
    process::{Output, Stdio},
};

use anyhow::{Context, Result};
use tempfile::TempDir;
use tokio::process::Command;

pub const BINARY_PATH: &str = env!("CARGO_BIN_EXE_run-odoo");

/// Isolated home, config, checkout and pyenv directories for one binary run.
pub struct Sandbox {
    root: TempDir,
}

impl Sandbox {
    pub fn new() -> Result<Self> {
        let root = tempfile::tempdir().context("failed to create sandbox")?;
        for dir in ["home", "xdg", "app", "pyenv", "work"] {
            std::fs::create_dir_all(root.path().join(dir))
                .with_context(|| format!("failed to create sandbox/{dir}"))?;
        }
        Ok(Self { root })
    }

    pub fn path(&self, dir: &str) -> PathBuf {
        self.root.path().join(dir)
    }

    /// Working directory the binary starts in.
    pub fn work_dir(&self) -> PathBuf {
        self.path("work")
    }

    pub fn app_dir(&self) -> PathBuf {
        self.path("app")
    }

    pub async fn run(&self, args: &[&str]) -> Result<Output> {
        Command::new(BINARY_PATH)
            .args(args)
            .current_dir(self.work_dir())
            .env("HOME", self.path("home"))
            .env("XDG_CONFIG_HOME", self.path("xdg"))
            .env("RUN_ODOO_HOME", self.app_dir())
            .env("PYENV_ROOT", self.path("pyenv"))
            .env_remove("RUST_LOG")
            .stdin(Stdio::null())
            .output()
            .await
            .context("failed to run run-odoo")
    }
}

pub fn fixture(relative: &str) -> String {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    root.join("tests/fixtures").join(relative).display().to_string()
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// The dry-run line for the `odoo-bin` call.
pub fn odoo_line(output: &Output) -> String {
    stdout(output)
        .lines()
        .find(|line| line.starts_with("[dry-run]") && line.contains("odoo-bin"))
        .map(str::to_string)
        .unwrap_or_else(|| panic!("no odoo-bin line in output:\n{}", stdout(output)))
}

pub fn display(path: &Path) -> String {
    path.display().to_string()
}
