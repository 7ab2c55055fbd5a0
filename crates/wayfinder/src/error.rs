//! Error types for wayfinder.
//!
//! This module defines all error types used throughout the wayfinder
//! crate, providing detailed context for debugging and user-friendly
//! error messages.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for wayfinder operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    // === Catalog Errors ===
    /// The requested waypoint does not exist.
    #[error("waypoint not found: {id}")]
    WaypointNotFound {
        /// Identifier that was looked up.
        id: String,
    },

    /// A waypoint record failed validation.
    #[error("invalid waypoint: {message}")]
    InvalidWaypoint {
        /// Description of the validation failure.
        message: String,
    },

    /// An imported catalog declared an unsupported format version.
    #[error("unsupported catalog version: {version}")]
    UnsupportedCatalogVersion {
        /// Version string from the import file.
        version: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for wayfinder operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a waypoint-not-found error.
    #[must_use]
    pub fn waypoint_not_found(id: impl Into<String>) -> Self {
        Self::WaypointNotFound { id: id.into() }
    }

    /// Create an invalid-waypoint error.
    #[must_use]
    pub fn invalid_waypoint(message: impl Into<String>) -> Self {
        Self::InvalidWaypoint {
            message: message.into(),
        }
    }

    /// Check if this error means a looked-up waypoint was missing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::WaypointNotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::waypoint_not_found("room01");
        assert_eq!(err.to_string(), "waypoint not found: room01");

        let err = Error::invalid_waypoint("name is empty");
        assert_eq!(err.to_string(), "invalid waypoint: name is empty");
    }

    #[test]
    fn test_error_is_not_found() {
        assert!(Error::waypoint_not_found("x").is_not_found());
        assert!(!Error::invalid_waypoint("x").is_not_found());
    }

    #[test]
    fn test_unsupported_catalog_version_display() {
        let err = Error::UnsupportedCatalogVersion {
            version: "9.0.0".to_string(),
        };
        assert!(err.to_string().contains("9.0.0"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }

    #[test]
    fn test_from_rusqlite_error() {
        let result = rusqlite::Connection::open_with_flags(
            "/nonexistent/path/db.sqlite",
            rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY,
        );
        if let Err(sqlite_err) = result {
            let err: Error = sqlite_err.into();
            assert!(matches!(err, Error::DatabaseQuery(_)));
        }
    }

    #[test]
    fn test_database_migration_error_display() {
        let err = Error::DatabaseMigration {
            message: "version mismatch".to_string(),
        };
        assert!(err.to_string().contains("version mismatch"));
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::ConfigValidation {
            message: "wifi_weight must not be negative".to_string(),
        };
        assert!(err.to_string().contains("wifi_weight"));
    }

    #[test]
    fn test_directory_create_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::DirectoryCreate {
            path: PathBuf::from("/root/forbidden"),
            source: io_err,
        };
        assert!(err.to_string().contains("/root/forbidden"));
    }
}
