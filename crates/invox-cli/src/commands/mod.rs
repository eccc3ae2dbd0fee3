//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod fetch;
pub mod process;
pub mod run;
