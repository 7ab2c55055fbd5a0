//! Command-line interface for wayfinder.
//!
//! This module provides the CLI structure and command definitions for the
//! `wayfind` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AddCommand, ConfigCommand, ExportCommand, GuideCommand, ImportCommand, ListCommand,
    LocateCommand, RemoveCommand, ShowCommand, UpdateCommand,
};

/// wayfind - Indoor destination catalog and guidance
///
/// Manages a catalog of building destinations with spoken navigation
/// steps, matches ambient Wi-Fi/GPS observations against it, and prints
/// the step-by-step walkthrough a screen reader would announce.
#[derive(Debug, Parser)]
#[command(name = "wayfind")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List all destinations in the catalog
    List(ListCommand),

    /// Show one destination in full
    Show(ShowCommand),

    /// Add a destination from a JSON file
    Add(AddCommand),

    /// Replace an existing destination from a JSON file
    Update(UpdateCommand),

    /// Remove a destination
    Remove(RemoveCommand),

    /// Infer the nearest destination from an observation
    Locate(LocateCommand),

    /// Print the spoken walkthrough for a destination
    Guide(GuideCommand),

    /// Export the whole catalog as JSON
    Export(ExportCommand),

    /// Import a catalog snapshot, replacing the current catalog
    Import(ImportCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        crate::logging::Verbosity::from_flags(self.quiet, self.verbose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_verify() {
        // Verify the CLI structure is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_name() {
        assert_eq!(Cli::command().get_name(), "wayfind");
    }

    #[test]
    fn test_verbosity_quiet() {
        let cli = Cli::try_parse_from(["wayfind", "-q", "list"]).unwrap();
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Quiet);
    }

    #[test]
    fn test_verbosity_levels() {
        let cli = Cli::try_parse_from(["wayfind", "list"]).unwrap();
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Normal);

        let cli = Cli::try_parse_from(["wayfind", "-v", "list"]).unwrap();
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Verbose);

        let cli = Cli::try_parse_from(["wayfind", "-vv", "list"]).unwrap();
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Trace);
    }

    #[test]
    fn test_parse_list() {
        let cli = Cli::try_parse_from(["wayfind", "list", "--json"]).unwrap();
        assert!(matches!(cli.command, Command::List(ListCommand { json: true })));
    }

    #[test]
    fn test_parse_show() {
        let cli = Cli::try_parse_from(["wayfind", "show", "room01"]).unwrap();
        match cli.command {
            Command::Show(cmd) => assert_eq!(cmd.id, "room01"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_locate_with_fix() {
        let cli =
            Cli::try_parse_from(["wayfind", "locate", "--lat", "-2.52945", "--lon", "-44.3045"])
                .unwrap();
        match cli.command {
            Command::Locate(cmd) => {
                assert_eq!(cmd.lat, Some(-2.52945));
                assert_eq!(cmd.lon, Some(-44.3045));
                assert!(cmd.scan.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_locate_lat_requires_lon() {
        let result = Cli::try_parse_from(["wayfind", "locate", "--lat", "-2.5"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_locate_with_scan() {
        let cli = Cli::try_parse_from(["wayfind", "locate", "--scan", "scan.json"]).unwrap();
        match cli.command {
            Command::Locate(cmd) => {
                assert_eq!(cmd.scan, Some(PathBuf::from("scan.json")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_update() {
        let cli =
            Cli::try_parse_from(["wayfind", "update", "room01", "--file", "room.json"]).unwrap();
        match cli.command {
            Command::Update(cmd) => {
                assert_eq!(cmd.id, "room01");
                assert_eq!(cmd.file, PathBuf::from("room.json"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_update_requires_file() {
        assert!(Cli::try_parse_from(["wayfind", "update", "room01"]).is_err());
    }

    #[test]
    fn test_parse_guide() {
        let cli = Cli::try_parse_from(["wayfind", "guide", "library"]).unwrap();
        assert!(matches!(cli.command, Command::Guide(_)));
    }

    #[test]
    fn test_parse_import_requires_file() {
        assert!(Cli::try_parse_from(["wayfind", "import"]).is_err());
        assert!(Cli::try_parse_from(["wayfind", "import", "catalog.json"]).is_ok());
    }

    #[test]
    fn test_parse_with_config() {
        let cli = Cli::try_parse_from(["wayfind", "-c", "/custom/config.toml", "list"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_parse_config_subcommands() {
        assert!(Cli::try_parse_from(["wayfind", "config", "show"]).is_ok());
        assert!(Cli::try_parse_from(["wayfind", "config", "path"]).is_ok());
        assert!(Cli::try_parse_from(["wayfind", "config", "validate"]).is_ok());
    }
}
