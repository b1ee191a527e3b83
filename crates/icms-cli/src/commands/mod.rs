//! Subcommands of the `icms` binary.

pub mod batch;
pub mod config;
pub mod process;
