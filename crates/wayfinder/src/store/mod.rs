//! Storage layer for wayfinder.
//!
//! This module provides `SQLite`-based persistent storage for the
//! waypoint catalog, including CRUD, first-open seeding, and whole-catalog
//! export/import.

pub mod migrations;
pub mod schema;
pub mod seed;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::waypoint::{GpsFix, NavigationStep, Waypoint, WaypointKind};

/// Catalog export format version.
pub const CATALOG_FORMAT_VERSION: &str = "1.0.0";

/// A full catalog snapshot for export/import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogExport {
    /// Export format version.
    pub version: String,
    /// When the snapshot was taken.
    pub last_updated: DateTime<Utc>,
    /// All waypoints in the catalog.
    pub waypoints: Vec<Waypoint>,
}

/// Storage engine for the waypoint catalog.
///
/// Provides persistent storage using `SQLite` with support for:
/// - Waypoint CRUD with steps and fingerprints stored relationally
/// - First-open seeding of the demo catalog
/// - Whole-catalog export and transactional import
#[derive(Debug)]
pub struct Store {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

impl Store {
    /// Open or create a catalog database at the given path.
    ///
    /// Creates the parent directories and database file if they don't
    /// exist. Initializes the schema if this is a new database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema
    /// initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        // WAL for better concurrent read performance; cascades rely on
        // foreign keys being enforced.
        conn.execute_batch(
            "PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL; PRAGMA foreign_keys=ON;",
        )?;

        migrations::initialize_schema(&conn)?;

        info!("Database opened successfully at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Create an in-memory store for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        migrations::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn,
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Insert a waypoint into the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the waypoint fails validation or the database
    /// operation fails.
    pub fn insert(&mut self, waypoint: &Waypoint) -> Result<()> {
        validate(waypoint)?;

        let tx = self.conn.transaction()?;
        insert_in_tx(&tx, waypoint)?;
        tx.commit()?;

        debug!("Inserted waypoint {} ({})", waypoint.name, waypoint.id);
        Ok(())
    }

    /// Get a waypoint by its identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn get(&self, id: &str) -> Result<Option<Waypoint>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, name, kind, lat, lon FROM waypoints WHERE id = ?1",
                [id],
                row_to_header,
            )
            .optional()?;

        let Some(header) = row else {
            return Ok(None);
        };
        Ok(Some(self.assemble(header)?))
    }

    /// List the whole catalog, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn list(&self) -> Result<Vec<Waypoint>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, kind, lat, lon FROM waypoints ORDER BY name, id")?;

        let headers = stmt
            .query_map([], row_to_header)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        headers
            .into_iter()
            .map(|header| self.assemble(header))
            .collect()
    }

    /// Replace an existing waypoint record wholesale.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WaypointNotFound`] if no waypoint has the given
    /// id, or an error if validation or the database operation fails.
    pub fn update(&mut self, waypoint: &Waypoint) -> Result<()> {
        validate(waypoint)?;

        let tx = self.conn.transaction()?;
        let affected = tx.execute("DELETE FROM waypoints WHERE id = ?1", [&waypoint.id])?;
        if affected == 0 {
            return Err(Error::waypoint_not_found(&waypoint.id));
        }
        insert_in_tx(&tx, waypoint)?;
        tx.commit()?;

        debug!("Updated waypoint {} ({})", waypoint.name, waypoint.id);
        Ok(())
    }

    /// Delete a waypoint by id.
    ///
    /// Returns `true` if a waypoint was deleted, `false` if not found.
    /// Steps and fingerprint readings cascade.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        let affected = self.conn.execute("DELETE FROM waypoints WHERE id = ?1", [id])?;
        Ok(affected > 0)
    }

    /// Count waypoints in the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn count(&self) -> Result<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM waypoints", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Seed the built-in demo catalog when the store is empty.
    ///
    /// Returns the number of waypoints inserted (zero when the store
    /// already had content).
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn seed_defaults(&mut self) -> Result<usize> {
        if self.count()? > 0 {
            return Ok(0);
        }

        let catalog = seed::default_catalog();
        let tx = self.conn.transaction()?;
        for waypoint in &catalog {
            insert_in_tx(&tx, waypoint)?;
        }
        tx.commit()?;

        info!("Seeded {} default waypoints", catalog.len());
        Ok(catalog.len())
    }

    /// Take a snapshot of the whole catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn export(&self) -> Result<CatalogExport> {
        Ok(CatalogExport {
            version: CATALOG_FORMAT_VERSION.to_string(),
            last_updated: Utc::now(),
            waypoints: self.list()?,
        })
    }

    /// Replace the whole catalog with an imported snapshot.
    ///
    /// The replacement is transactional: on any failure the previous
    /// catalog is left untouched. Returns the number of waypoints
    /// imported.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedCatalogVersion`] for snapshots from an
    /// incompatible format, or an error if validation or the database
    /// operation fails.
    pub fn import(&mut self, snapshot: &CatalogExport) -> Result<usize> {
        if !snapshot.version.starts_with("1.") {
            return Err(Error::UnsupportedCatalogVersion {
                version: snapshot.version.clone(),
            });
        }
        for waypoint in &snapshot.waypoints {
            validate(waypoint)?;
        }

        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM waypoints", [])?;
        for waypoint in &snapshot.waypoints {
            insert_in_tx(&tx, waypoint)?;
        }
        tx.commit()?;

        info!("Imported {} waypoints", snapshot.waypoints.len());
        Ok(snapshot.waypoints.len())
    }

    /// Attach steps and fingerprint readings to a waypoint header.
    fn assemble(&self, mut waypoint: Waypoint) -> Result<Waypoint> {
        let mut stmt = self.conn.prepare(
            r"
            SELECT instruction, rotation_deg, detail, distance_m
            FROM steps WHERE waypoint_id = ?1 ORDER BY seq
            ",
        )?;
        waypoint.steps = stmt
            .query_map([&waypoint.id], |row| {
                Ok(NavigationStep {
                    instruction: row.get(0)?,
                    rotation_deg: row.get(1)?,
                    detail: row.get(2)?,
                    distance_m: row.get(3)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut stmt = self
            .conn
            .prepare("SELECT ap, dbm FROM fingerprints WHERE waypoint_id = ?1")?;
        let readings = stmt
            .query_map([&waypoint.id], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        if !readings.is_empty() {
            waypoint.fingerprint = Some(readings.into_iter().collect());
        }

        Ok(waypoint)
    }
}

/// Check a waypoint before it touches the database.
fn validate(waypoint: &Waypoint) -> Result<()> {
    if waypoint.id.is_empty() {
        return Err(Error::invalid_waypoint("id must not be empty"));
    }
    if waypoint.name.trim().is_empty() {
        return Err(Error::invalid_waypoint("name must not be empty"));
    }
    if let Some(gps) = &waypoint.gps {
        if !gps.is_valid() {
            return Err(Error::invalid_waypoint(format!(
                "GPS fix out of range: lat {}, lon {}",
                gps.lat, gps.lon
            )));
        }
    }
    Ok(())
}

/// Insert a waypoint and its child rows inside an open transaction.
fn insert_in_tx(tx: &rusqlite::Transaction<'_>, waypoint: &Waypoint) -> Result<()> {
    tx.execute(
        "INSERT INTO waypoints (id, name, kind, lat, lon) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            waypoint.id,
            waypoint.name,
            waypoint.kind.to_string(),
            waypoint.gps.map(|g| g.lat),
            waypoint.gps.map(|g| g.lon),
        ],
    )?;

    for (seq, step) in waypoint.steps.iter().enumerate() {
        tx.execute(
            r"
            INSERT INTO steps (waypoint_id, seq, instruction, rotation_deg, detail, distance_m)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ",
            params![
                waypoint.id,
                i64::try_from(seq).unwrap_or(i64::MAX),
                step.instruction,
                step.rotation_deg,
                step.detail,
                step.distance_m,
            ],
        )?;
    }

    if let Some(fingerprint) = &waypoint.fingerprint {
        for (ap, dbm) in &fingerprint.0 {
            tx.execute(
                "INSERT INTO fingerprints (waypoint_id, ap, dbm) VALUES (?1, ?2, ?3)",
                params![waypoint.id, ap, dbm],
            )?;
        }
    }

    Ok(())
}

/// Convert a waypoint row to a header without steps or fingerprint.
fn row_to_header(row: &rusqlite::Row) -> rusqlite::Result<Waypoint> {
    let id: String = row.get(0)?;
    let name: String = row.get(1)?;
    let kind_str: String = row.get(2)?;
    let lat: Option<f64> = row.get(3)?;
    let lon: Option<f64> = row.get(4)?;

    let kind = kind_str.parse::<WaypointKind>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, e.into())
    })?;

    let gps = match (lat, lon) {
        (Some(lat), Some(lon)) => Some(GpsFix::new(lat, lon)),
        _ => None,
    };

    Ok(Waypoint {
        id,
        name,
        kind,
        gps,
        fingerprint: None,
        steps: Vec::new(),
    })
}
