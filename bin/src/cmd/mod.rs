//! CLI subcommand modules.
//!
//! This module contains the implementations for all almeria CLI subcommands.

pub(crate) mod config;
pub(crate) mod explain;
pub(crate) mod rank;
pub(crate) mod signals;
