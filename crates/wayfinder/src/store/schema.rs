//! `SQLite` schema definitions for wayfinder.
//!
//! This module contains the SQL statements for creating and managing
//! the catalog schema.

/// SQL statement to create the waypoints table.
pub const CREATE_WAYPOINTS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS waypoints (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    kind TEXT NOT NULL,
    lat REAL,
    lon REAL,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
)
";

/// SQL statement to create the navigation steps table.
///
/// `seq` preserves insertion order; steps are meaningless out of order.
pub const CREATE_STEPS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS steps (
    waypoint_id TEXT NOT NULL REFERENCES waypoints(id) ON DELETE CASCADE,
    seq INTEGER NOT NULL,
    instruction TEXT NOT NULL,
    rotation_deg REAL NOT NULL,
    detail TEXT NOT NULL,
    distance_m REAL,
    PRIMARY KEY (waypoint_id, seq)
)
";

/// SQL statement to create the Wi-Fi fingerprint readings table.
pub const CREATE_FINGERPRINTS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS fingerprints (
    waypoint_id TEXT NOT NULL REFERENCES waypoints(id) ON DELETE CASCADE,
    ap TEXT NOT NULL,
    dbm REAL NOT NULL,
    PRIMARY KEY (waypoint_id, ap)
)
";

/// SQL statement to create an index on waypoint names for ordered listing.
pub const CREATE_NAME_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_waypoints_name ON waypoints(name)
";

/// SQL statement to create an index on waypoint kind for filtering.
pub const CREATE_KIND_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_waypoints_kind ON waypoints(kind)
";

/// SQL statement to create the metadata table for storing key-value pairs.
pub const CREATE_METADATA_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)
";

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[
    CREATE_WAYPOINTS_TABLE,
    CREATE_STEPS_TABLE,
    CREATE_FINGERPRINTS_TABLE,
    CREATE_NAME_INDEX,
    CREATE_KIND_INDEX,
    CREATE_METADATA_TABLE,
];
