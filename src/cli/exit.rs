use std::process::ExitCode;

use anyhow::Error;

/// A failure that ends the process: a message for stderr and the exit code.
#[derive(Debug)]
pub struct CliExit {
    message: String,
    exit_code: ExitCode,
}

impl CliExit {
    pub fn from_error(err: impl Into<Error>) -> Self {
        let err = err.into();
        Self {
            message: format!("Error: {err:#}"),
            exit_code: ExitCode::FAILURE,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn report(self) -> ExitCode {
        eprintln!("{}", self.message);
        self.exit_code
    }
}
