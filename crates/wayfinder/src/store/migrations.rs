//! Catalog schema versioning.
//!
//! Each database carries the schema version it was written with in the
//! metadata table. Opening a database stamped by a newer build is an
//! error; stepwise migrations slot in here once a second schema version
//! exists.

use rusqlite::Connection;

use crate::error::{Error, Result};

use super::schema::SCHEMA_STATEMENTS;

/// The schema version this build reads and writes.
pub const CURRENT_VERSION: i32 = 1;

/// Key used to store the schema version in the metadata table.
const VERSION_KEY: &str = "schema_version";

/// Initialize the database schema.
///
/// Creates all tables and indexes if they don't exist, then reconciles
/// the stored schema version with [`CURRENT_VERSION`].
///
/// # Errors
///
/// Returns an error if schema creation fails or the database was written
/// by a newer version of the application.
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    for statement in SCHEMA_STATEMENTS {
        conn.execute(statement, [])?;
    }
    ensure_version(conn)
}

/// Reconcile the stored schema version with the supported one.
///
/// A fresh database is stamped with [`CURRENT_VERSION`]. A stamp newer
/// than this build supports is rejected; reinterpreting an unknown
/// schema risks corrupting the catalog.
fn ensure_version(conn: &Connection) -> Result<()> {
    let version = get_schema_version(conn)?;
    if version == 0 {
        return set_schema_version(conn, CURRENT_VERSION);
    }
    if version > CURRENT_VERSION {
        return Err(Error::DatabaseMigration {
            message: format!(
                "catalog schema version {version} is newer than supported version {CURRENT_VERSION}"
            ),
        });
    }
    // Version 1 is the base schema created by SCHEMA_STATEMENTS; there
    // is nothing to migrate between it and CURRENT_VERSION yet.
    Ok(())
}

/// Get the current schema version from the database.
///
/// Returns 0 if no version is set (fresh database).
fn get_schema_version(conn: &Connection) -> Result<i32> {
    let result: std::result::Result<String, rusqlite::Error> = conn.query_row(
        "SELECT value FROM metadata WHERE key = ?1",
        [VERSION_KEY],
        |row| row.get(0),
    );

    match result {
        Ok(value) => value.parse().map_err(|_| Error::DatabaseMigration {
            message: format!("invalid schema version: {value}"),
        }),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
        Err(e) => Err(e.into()),
    }
}

/// Set the schema version in the database.
fn set_schema_version(conn: &Connection, version: i32) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO metadata (key, value) VALUES (?1, ?2)",
        (VERSION_KEY, version.to_string()),
    )?;
    Ok(())
}
