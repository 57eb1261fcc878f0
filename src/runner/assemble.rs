//! Turns a [`RunSpec`] into the ordered `odoo-bin` argument list.
use std::path::PathBuf;

use crate::lib::{paths, process::Invocation};

use super::{
    environment::Workspace,
    run_spec::{Mode, RunSpec},
};

const LOAD_MODULES: &str = "web,base";
const LOG_HANDLERS: &[&str] = &[":DEBUG", "py.warnings:INFO"];
const TIME_LIMIT_SECONDS: &str = "3600";

/// Addon directories in search order, before filtering out missing ones.
pub fn addons_path_candidates(spec: &RunSpec, workspace: &Workspace) -> Vec<PathBuf> {
    let mut candidates = vec![
        workspace.checkout.join("odoo").join("addons"),
        workspace.checkout.join("addons"),
    ];
    if spec.enterprise {
        candidates.push(workspace.enterprise_dir.clone());
    }
    if spec.themes {
        candidates.push(workspace.themes_dir.clone());
    }
    if let Some(custom) = &spec.custom_path {
        candidates.extend([
            custom.join("odoo").join("addons"),
            custom.join("addons"),
            custom.join("enterprise"),
        ]);
    }
    candidates
}

/// Existing addon directories, in search order.
pub fn resolve_addons_paths(spec: &RunSpec, workspace: &Workspace) -> Vec<PathBuf> {
    paths::existing(addons_path_candidates(spec, workspace))
}

/// Full argument list for `odoo-bin`.
pub fn build_args(spec: &RunSpec, addons_paths: &[PathBuf]) -> Vec<String> {
    let mut args = Vec::new();
    if spec.mode == Mode::Shell {
        args.push("shell".to_string());
    }

    push_pair(&mut args, "-d", &spec.database);
    if !addons_paths.is_empty() {
        push_pair(&mut args, "--addons-path", paths::join_comma(addons_paths));
    }
    push_pair(&mut args, "--http-interface", &spec.http_interface);
    push_pair(&mut args, "--http-port", spec.http_port.to_string());
    push_pair(&mut args, "--load", LOAD_MODULES);
    push_pair(&mut args, "--workers", spec.workers.to_string());
    push_pair(
        &mut args,
        "--max-cron-threads",
        spec.max_cron_threads.to_string(),
    );
    push_pair(&mut args, "--log-level", &spec.log_level);
    for handler in LOG_HANDLERS {
        push_pair(&mut args, "--log-handler", *handler);
    }
    if let Some(action) = spec.module_action {
        if !spec.addons.is_empty() {
            push_pair(&mut args, action.flag(), spec.addons.join(","));
        }
    }
    if spec.test_enable {
        args.push("--test-enable".to_string());
    }
    if spec.stop_after_init {
        args.push("--stop-after-init".to_string());
    }
    args.extend(spec.extra_params.iter().cloned());

    push_pair(&mut args, "--db_host", &spec.db_host);
    push_pair(&mut args, "--db_user", &spec.db_user);
    push_pair(&mut args, "--db_password", &spec.db_password);
    push_pair(&mut args, "--limit-time-cpu", TIME_LIMIT_SECONDS);
    push_pair(&mut args, "--limit-time-real", TIME_LIMIT_SECONDS);

    match spec.mode {
        Mode::Shell => args.push("--no-http".to_string()),
        Mode::Upgrade => {
            args.push("--stop-after-init".to_string());
            args.push("--no-http".to_string());
        }
        Mode::Run | Mode::Test => {}
    }
    args
}

/// `odoo-bin` call running inside the series' virtualenv.
pub fn odoo_invocation(spec: &RunSpec, workspace: &Workspace, addons_paths: &[PathBuf]) -> Invocation {
    Invocation::new(workspace.odoo_bin())
        .args(build_args(spec, addons_paths))
        .context(workspace.venv_context())
}

fn push_pair(args: &mut Vec<String>, flag: &str, value: impl Into<String>) {
    args.push(flag.to_string());
    args.push(value.into());
}
