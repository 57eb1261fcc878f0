//! Library crate root for run-odoo: configuration, environment preparation, Odoo
//! command assembly and the SQL client launcher.

#[path = "lib/mod.rs"]
pub mod lib_mod;
pub use lib_mod as lib;
pub mod cli;
pub mod config;
pub mod runner;
pub mod sql;
