//! CLI entrypoint module structure.
use anyhow::Result;
use tracing::debug;

use crate::{
    config::Config,
    lib::process::{CommandRunner, DryRunRunner, SystemRunner},
    runner::{
        environment::{PrepareOptions, Workspace},
        run_spec::{Mode, RunSpec},
        Runner,
    },
    sql::{self, ConnectionParams},
};

pub mod args;
pub mod exit;
pub mod profile;

pub use args::{CliArgs, CliCommand, HarlequinArgs, ModuleArgs, SetupArgs, TryModuleArgs};
pub use exit::CliExit;
pub use profile::{resolve_run_options, RunOverrides};

/// Execute one parsed command line.
pub async fn execute(args: CliArgs) -> Result<()> {
    let system = SystemRunner;
    let dry_run = DryRunRunner::new();
    let commands: &dyn CommandRunner = if args.dry_run { &dry_run } else { &system };

    let config = Config::find(args.config_path.as_deref())?;

    match args.command {
        CliCommand::TryModule(try_args) => {
            let invocation = OdooCommand {
                mode: Mode::Run,
                profile: try_args.common.profile_name(),
                overrides: try_args.overrides(),
                prepare: try_args.common.setup.prepare_options(),
            };
            invocation.run(&config, commands).await
        }
        CliCommand::TestModule(module_args) => {
            OdooCommand::from_module_args(Mode::Test, &module_args)
                .run(&config, commands)
                .await
        }
        CliCommand::UpgradeModule(module_args) => {
            OdooCommand::from_module_args(Mode::Upgrade, &module_args)
                .run(&config, commands)
                .await
        }
        CliCommand::Shell(module_args) => {
            OdooCommand::from_module_args(Mode::Shell, &module_args)
                .run(&config, commands)
                .await
        }
        CliCommand::Harlequin(sql_args) => {
            let profile = config.select_profile(sql_args.profile_name())?;
            let params = ConnectionParams::resolve(sql_args.overrides(), &profile)?;
            sql::launch(commands, &params).await?;
            Ok(())
        }
    }
}

struct OdooCommand<'a> {
    mode: Mode,
    profile: Option<&'a str>,
    overrides: RunOverrides,
    prepare: PrepareOptions,
}

impl<'a> OdooCommand<'a> {
    fn from_module_args(mode: Mode, args: &'a ModuleArgs) -> Self {
        Self {
            mode,
            profile: args.profile_name(),
            overrides: args.overrides(),
            prepare: args.setup.prepare_options(),
        }
    }

    async fn run(self, config: &Config, commands: &dyn CommandRunner) -> Result<()> {
        let profile = config.select_profile(self.profile)?;
        let options = resolve_run_options(self.overrides, &profile)?;
        let spec = RunSpec::for_mode(self.mode, options)?;
        let workspace = Workspace::resolve(spec.version)?;
        debug!(
            target: "run_odoo::cli",
            mode = self.mode.as_str(),
            checkout = %workspace.checkout.display(),
            "Resolved workspace"
        );

        Runner::new(commands, workspace, self.prepare)
            .execute(&spec)
            .await?;
        Ok(())
    }
}
