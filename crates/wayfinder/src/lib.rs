//! `wayfinder` - Destination catalog, location matching, and spoken-guidance
//! sequencing for indoor navigation aids
//!
//! This library provides the core functionality behind a building guide for
//! visually-impaired users: a persistent catalog of destinations with spoken
//! navigation steps, a nearest-neighbor matcher over Wi-Fi fingerprints and
//! GPS fixes, and the step sequencing a presentation layer drives.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod geo;
pub mod guidance;
pub mod logging;
pub mod matcher;
pub mod store;
pub mod waypoint;

pub use config::Config;
pub use error::{Error, Result};
pub use guidance::{GuidanceEvent, GuidanceSession};
pub use logging::init_logging;
pub use matcher::{Match, Matcher, MatcherConfig, Observation};
pub use store::{CatalogExport, Store};
pub use waypoint::{Fingerprint, GpsFix, NavigationStep, Waypoint, WaypointKind};
