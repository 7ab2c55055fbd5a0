//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Show command arguments.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Identifier of the waypoint to show
    pub id: String,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Add command arguments.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// JSON file with the waypoint to add (id is assigned on insert)
    #[arg(short, long, value_name = "FILE")]
    pub file: PathBuf,
}

/// Update command arguments.
#[derive(Debug, Args)]
pub struct UpdateCommand {
    /// Identifier of the waypoint to update
    pub id: String,

    /// JSON file with the replacement record (the id is kept)
    #[arg(short, long, value_name = "FILE")]
    pub file: PathBuf,
}

/// Remove command arguments.
#[derive(Debug, Args)]
pub struct RemoveCommand {
    /// Identifier of the waypoint to remove
    pub id: String,
}

/// Locate command arguments.
///
/// At least one of a GPS fix (`--lat`/`--lon`) or a Wi-Fi scan file must
/// be given.
#[derive(Debug, Args)]
pub struct LocateCommand {
    /// Observed latitude in decimal degrees
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Observed longitude in decimal degrees
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lon: Option<f64>,

    /// JSON file mapping access-point identifiers to observed dBm
    #[arg(short, long, value_name = "FILE")]
    pub scan: Option<PathBuf>,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Guide command arguments.
#[derive(Debug, Args)]
pub struct GuideCommand {
    /// Identifier of the destination waypoint
    pub id: String,
}

/// Export command arguments.
#[derive(Debug, Args)]
pub struct ExportCommand {
    /// Write the catalog snapshot to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Import command arguments.
#[derive(Debug, Args)]
pub struct ImportCommand {
    /// Catalog snapshot file to import (replaces the whole catalog)
    pub file: PathBuf,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_command_debug() {
        let cmd = LocateCommand {
            lat: Some(-2.52945),
            lon: Some(-44.3045),
            scan: None,
            json: false,
        };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("lat"));
        assert!(debug_str.contains("-2.52945"));
    }

    #[test]
    fn test_config_command_debug() {
        let cmd = ConfigCommand::Show { json: false };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Show"));
    }

    #[test]
    fn test_export_command_debug() {
        let cmd = ExportCommand {
            output: Some(PathBuf::from("catalog.json")),
        };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("catalog.json"));
    }
}
