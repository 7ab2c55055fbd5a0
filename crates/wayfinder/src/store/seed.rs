//! Built-in demo catalog.
//!
//! A small building guide inserted on first open so the application is
//! usable before an administrator surveys the site. Mirrors the shape of
//! real catalogs: most waypoints carry steps only, one is fully surveyed
//! with both a GPS fix and a Wi-Fi fingerprint.

use crate::waypoint::{Fingerprint, GpsFix, NavigationStep, Waypoint, WaypointKind};

/// Build the default demo catalog.
#[must_use]
pub fn default_catalog() -> Vec<Waypoint> {
    vec![
        Waypoint::new(
            "Room 01",
            WaypointKind::Room,
            vec![
                NavigationStep::new(
                    "Go straight ahead following the tactile floor",
                    0.0,
                    "Walk about 10 paces",
                ),
                NavigationStep::new(
                    "Turn right at the next corridor",
                    90.0,
                    "You will hear a water fountain on your left",
                ),
                NavigationStep::new(
                    "Continue to the door with the tactile sign Room 01",
                    0.0,
                    "Another 8 to 12 paces",
                ),
            ],
        )
        .with_gps(GpsFix::new(-2.52945, -44.30450))
        .with_fingerprint(
            [
                ("AA:BB:CC:DD:EE:01", -50.0),
                ("AA:BB:CC:DD:EE:02", -60.0),
            ]
            .into_iter()
            .collect::<Fingerprint>(),
        ),
        Waypoint::new(
            "Room 02",
            WaypointKind::Room,
            vec![
                NavigationStep::new(
                    "Follow the main corridor",
                    0.0,
                    "Stay on the tactile floor for 15 paces",
                ),
                NavigationStep::new(
                    "Turn left after the water fountain",
                    -90.0,
                    "The sound of water signals you are close",
                ),
                NavigationStep::new(
                    "The Room 02 door will be on your right",
                    90.0,
                    "Braille plate on the door",
                ),
            ],
        ),
        Waypoint::new(
            "Front restrooms",
            WaypointKind::Restroom,
            vec![
                NavigationStep::new(
                    "From the main entrance, turn right",
                    90.0,
                    "Just past the entrance door",
                ),
                NavigationStep::new(
                    "Continue for 8 paces",
                    0.0,
                    "The restrooms will be on your left",
                ),
            ],
        ),
        Waypoint::new(
            "Computer lab",
            WaypointKind::Lab,
            vec![
                NavigationStep::new(
                    "Head to the left side corridor",
                    -90.0,
                    "Starting from the main entrance",
                ),
                NavigationStep::new(
                    "Continue for 15 paces",
                    0.0,
                    "The sound of computers signals you are close",
                ),
                NavigationStep::new(
                    "The computer lab is on your right",
                    90.0,
                    "Double door with tactile sign",
                ),
            ],
        ),
        Waypoint::new(
            "Auditorium",
            WaypointKind::Auditorium,
            vec![
                NavigationStep::new(
                    "From the entrance, head to the center of the building",
                    0.0,
                    "Follow the main tactile floor",
                ),
                NavigationStep::new(
                    "Turn left at the fork",
                    -90.0,
                    "Echoes signal the open space ahead",
                ),
                NavigationStep::new(
                    "The auditorium double doors are straight ahead",
                    0.0,
                    "Large handles with tactile sign",
                ),
            ],
        ),
        Waypoint::new(
            "Library",
            WaypointKind::Library,
            vec![
                NavigationStep::new(
                    "Go up to the upper floor",
                    0.0,
                    "Main staircase with handrail, 12 steps",
                ),
                NavigationStep::new(
                    "Continue straight past the staircase",
                    0.0,
                    "A quiet atmosphere signals you are close",
                ),
                NavigationStep::new(
                    "The library double door is straight ahead",
                    0.0,
                    "Muffled sound and the smell of books",
                ),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_is_not_empty() {
        assert!(!default_catalog().is_empty());
    }

    #[test]
    fn test_catalog_ids_are_unique() {
        let catalog = default_catalog();
        let mut ids: Vec<&str> = catalog.iter().map(|w| w.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn test_every_waypoint_has_steps() {
        for waypoint in default_catalog() {
            assert!(!waypoint.steps.is_empty(), "{} has no steps", waypoint.name);
        }
    }

    #[test]
    fn test_one_waypoint_is_fully_surveyed() {
        let surveyed = default_catalog()
            .into_iter()
            .filter(|w| w.gps.is_some() && w.fingerprint.is_some())
            .count();
        assert_eq!(surveyed, 1);
    }

    #[test]
    fn test_gps_fixes_are_valid() {
        for waypoint in default_catalog() {
            if let Some(gps) = waypoint.gps {
                assert!(gps.is_valid(), "{} has an invalid fix", waypoint.name);
            }
        }
    }
}
