//! CLI module for membank - command-line interface and subcommands.

pub mod commands;

pub use commands::Cli;
