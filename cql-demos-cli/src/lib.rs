//! cql-demos CLI - runnable example programs for a CQL database.
//!
//! Each subcommand is one self-contained example: connect, run a few
//! statements, log what comes back, close. The `embedded` command also
//! launches and stops a local server for testing.

pub mod cli;
pub mod commands;
pub mod config;
pub mod embedded;
pub mod error;
pub mod logging;
pub mod output;
