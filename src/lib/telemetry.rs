//! Telemetry initialization and external command span helpers.

use std::time::Instant;

use anyhow::Result;
use tracing::{info, info_span, Span};
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize `tracing` and format developer logs on stderr.
///
/// `RUST_LOG` wins when set; otherwise `warn`, or `debug` with `verbose`.
pub fn init_tracing(verbose: bool) -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let fallback = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_file(verbose)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to initialize tracing: {err}"))
}

/// Span helper recording the start and finish of one external command.
pub struct CommandSpan {
    span: Span,
    started_at: Instant,
    program: String,
}

impl CommandSpan {
    /// Start a span for `program`.
    pub fn start(program: &str, command_line: &str) -> Self {
        let span = info_span!(
            target: "run_odoo::process",
            "external_command",
            program
        );
        {
            let _entered = span.enter();
            info!(
                target: "run_odoo::process",
                command = command_line,
                "Starting external command"
            );
        }
        Self {
            span,
            started_at: Instant::now(),
            program: program.to_string(),
        }
    }

    /// Close the span while recording status and exit code.
    pub fn finish(self, status: &'static str, exit_code: Option<i32>) {
        let elapsed_ms = self.started_at.elapsed().as_millis();
        let _entered = self.span.enter();
        info!(
            target: "run_odoo::process",
            program = %self.program,
            status = status,
            exit_code = exit_code,
            elapsed_ms = elapsed_ms,
            "Completed external command"
        );
    }
}
