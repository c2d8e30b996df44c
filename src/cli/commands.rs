//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - serve: run the MCP server on stdio (default)
//! - tools: print the tool listing
//! - check: environment diagnostics

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Membank - memory bank tool server for chat clients
#[derive(Parser, Debug)]
#[command(name = "membank")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Run the MCP server over stdin/stdout
    Serve,

    /// Print the tool listing as JSON
    Tools,

    /// Check the capture interpreter, clipboard access and database
    Check,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_defaults_to_none() {
        let cli = Cli::try_parse_from(["membank"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.is_verbose());
    }

    #[test]
    fn test_parse_subcommands() {
        let cli = Cli::try_parse_from(["membank", "tools"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Tools));

        let cli = Cli::try_parse_from(["membank", "check"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Check));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["membank", "serve", "-v", "-c", "/tmp/membank.yml"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Serve));
        assert!(cli.is_verbose());
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/membank.yml")));
    }

    #[test]
    fn test_unknown_subcommand_rejected() {
        assert!(Cli::try_parse_from(["membank", "daemon"]).is_err());
    }
}
