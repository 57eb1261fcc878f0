//! Shared library modules providing error types, paths, process execution, and telemetry initialization.

pub mod distro;
pub mod errors;
pub mod paths;
pub mod process;
pub mod telemetry;
