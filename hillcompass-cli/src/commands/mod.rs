//! CLI subcommands.

pub mod config;
pub mod lookup;
pub mod run;
mod trace;
