//! CLI command implementations
//!
//! - `check`: lint commands (check, sexp)
//! - `config`: configuration and schema commands
//! - `util`: shared argument helpers

pub mod check;
pub mod config;
pub mod util;

pub use check::{cmd_check, cmd_sexp};
pub use config::{cmd_config, cmd_schema};
