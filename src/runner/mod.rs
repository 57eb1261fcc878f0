//! Odoo runner: prepares a series' environment, then assembles and executes the
//! `odoo-bin` invocation for one of the four modes.
pub mod assemble;
pub mod environment;
pub mod run_spec;
pub mod versions;

use tracing::{info, warn};

use crate::lib::{
    errors::RunnerError,
    process::{CommandRunner, Invocation, RunOutcome},
};

use self::{
    environment::{PrepareOptions, Sources, Workspace},
    run_spec::{Mode, RunSpec},
};

pub use self::{
    run_spec::{derive_database_name, RunOptions},
    versions::OdooVersion,
};

/// Drives one invocation through preparation and execution.
pub struct Runner<'a> {
    commands: &'a dyn CommandRunner,
    workspace: Workspace,
    prepare: PrepareOptions,
}

impl<'a> Runner<'a> {
    pub fn new(commands: &'a dyn CommandRunner, workspace: Workspace, prepare: PrepareOptions) -> Self {
        Self {
            commands,
            workspace,
            prepare,
        }
    }

    /// Prepare the environment, then run `odoo-bin` until it exits or is interrupted.
    pub async fn execute(&self, spec: &RunSpec) -> Result<RunOutcome, RunnerError> {
        if matches!(spec.mode, Mode::Run | Mode::Test) && spec.addons.is_empty() {
            println!("Warning: No modules specified for installation");
        }

        environment::prepare(
            self.commands,
            &self.workspace,
            Sources {
                enterprise: spec.enterprise,
                themes: spec.themes,
            },
            self.prepare,
        )
        .await?;

        let invocation = self.assemble(spec);
        info!(
            target: "run_odoo::runner",
            mode = spec.mode.as_str(),
            version = %spec.version,
            database = %spec.database,
            "Starting Odoo"
        );
        let outcome = self.commands.run_interactive(&invocation).await?;
        if outcome == RunOutcome::Interrupted {
            println!("\nOdoo stopped by user");
        }
        Ok(outcome)
    }

    /// Build the `odoo-bin` invocation, warning about missing addon directories.
    pub fn assemble(&self, spec: &RunSpec) -> Invocation {
        if spec.enterprise && !self.workspace.enterprise_dir.exists() {
            println!(
                "Warning: Enterprise addons path {} does not exist",
                self.workspace.enterprise_dir.display()
            );
        }
        let addons_paths = assemble::resolve_addons_paths(spec, &self.workspace);
        if addons_paths.is_empty() {
            warn!(target: "run_odoo::runner", "No addon directories found");
            println!("Warning: No addons paths found; starting without --addons-path");
        }
        assemble::odoo_invocation(spec, &self.workspace, &addons_paths)
    }
}
