//! Core catalog types for wayfinder.
//!
//! This module defines the fundamental data structures for destination
//! records: the waypoint itself, its spoken navigation steps, and the
//! positioning hints (GPS fix, Wi-Fi fingerprint) used for matching.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The kind of place a waypoint describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaypointKind {
    /// A numbered or named room.
    Room,
    /// A restroom.
    Restroom,
    /// A laboratory or specialized classroom.
    Lab,
    /// A recreation area.
    Recreation,
    /// An auditorium or assembly hall.
    Auditorium,
    /// An administrative office.
    Office,
    /// A library.
    Library,
    /// A building entrance.
    Entrance,
    /// A hallway or corridor junction.
    Hallway,
}

impl std::fmt::Display for WaypointKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Room => "room",
            Self::Restroom => "restroom",
            Self::Lab => "lab",
            Self::Recreation => "recreation",
            Self::Auditorium => "auditorium",
            Self::Office => "office",
            Self::Library => "library",
            Self::Entrance => "entrance",
            Self::Hallway => "hallway",
        };
        write!(f, "{s}")
    }
}

impl FromStr for WaypointKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "room" => Ok(Self::Room),
            "restroom" => Ok(Self::Restroom),
            "lab" => Ok(Self::Lab),
            "recreation" => Ok(Self::Recreation),
            "auditorium" => Ok(Self::Auditorium),
            "office" => Ok(Self::Office),
            "library" => Ok(Self::Library),
            "entrance" => Ok(Self::Entrance),
            "hallway" => Ok(Self::Hallway),
            other => Err(format!("unknown waypoint kind: {other}")),
        }
    }
}

/// A GPS fix in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GpsFix {
    /// Latitude in decimal degrees, positive north.
    pub lat: f64,
    /// Longitude in decimal degrees, positive east.
    pub lon: f64,
}

impl GpsFix {
    /// Create a new fix.
    #[must_use]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Check that the fix lies within valid coordinate ranges.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

/// A Wi-Fi fingerprint: observed signal strength per access point.
///
/// Keys are access-point identifiers (typically BSSIDs), values are
/// signal strengths in dBm. A `BTreeMap` keeps iteration deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(pub BTreeMap<String, f64>);

impl Fingerprint {
    /// Create an empty fingerprint.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a signal strength reading for an access point.
    pub fn insert(&mut self, ap: impl Into<String>, dbm: f64) {
        self.0.insert(ap.into(), dbm);
    }

    /// Number of access points in the fingerprint.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check whether the fingerprint has no readings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Count the access points present in both fingerprints.
    #[must_use]
    pub fn shared_ap_count(&self, other: &Self) -> usize {
        self.0.keys().filter(|ap| other.0.contains_key(*ap)).count()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for Fingerprint {
    fn from_iter<T: IntoIterator<Item = (S, f64)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(ap, dbm)| (ap.into(), dbm)).collect())
    }
}

/// A single spoken navigation step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationStep {
    /// The primary instruction, e.g. "Turn right at the next corridor".
    pub instruction: String,

    /// Turn direction for the on-screen arrow, in degrees.
    /// 0 = straight ahead, 90 = right, -90 = left, 180 = turn around.
    pub rotation_deg: f64,

    /// Supplementary detail spoken after the instruction.
    pub detail: String,

    /// Approximate distance covered by this step, in meters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_m: Option<f64>,
}

impl NavigationStep {
    /// Create a step without a distance estimate.
    #[must_use]
    pub fn new(
        instruction: impl Into<String>,
        rotation_deg: f64,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            instruction: instruction.into(),
            rotation_deg,
            detail: detail.into(),
            distance_m: None,
        }
    }

    /// The text a screen reader or TTS engine should speak for this step.
    ///
    /// Combines instruction and detail as `"{instruction}. {detail}"`;
    /// an empty detail yields the instruction alone.
    #[must_use]
    pub fn spoken_text(&self) -> String {
        if self.detail.is_empty() {
            self.instruction.clone()
        } else {
            format!("{}. {}", self.instruction, self.detail)
        }
    }
}

/// A named destination with positioning hints and guidance steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    /// Unique identifier (UUID, assigned on creation).
    pub id: String,

    /// Human-readable destination name.
    pub name: String,

    /// What kind of place this is.
    pub kind: WaypointKind,

    /// Outdoor/backup position, if surveyed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gps: Option<GpsFix>,

    /// Indoor Wi-Fi fingerprint, if surveyed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<Fingerprint>,

    /// Ordered spoken navigation steps leading to this destination.
    pub steps: Vec<NavigationStep>,
}

impl Waypoint {
    /// Create a new waypoint with a freshly assigned UUID.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: WaypointKind, steps: Vec<NavigationStep>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            kind,
            gps: None,
            fingerprint: None,
            steps,
        }
    }

    /// Attach a GPS fix.
    #[must_use]
    pub fn with_gps(mut self, gps: GpsFix) -> Self {
        self.gps = Some(gps);
        self
    }

    /// Attach a Wi-Fi fingerprint.
    #[must_use]
    pub fn with_fingerprint(mut self, fingerprint: Fingerprint) -> Self {
        self.fingerprint = Some(fingerprint);
        self
    }

    /// Check whether this waypoint carries any positioning hint at all.
    ///
    /// Waypoints without a hint can still be navigated to by name but are
    /// never candidates for location matching.
    #[must_use]
    pub fn is_locatable(&self) -> bool {
        self.gps.is_some() || self.fingerprint.as_ref().is_some_and(|f| !f.is_empty())
    }
}
