//! Location matching over the waypoint catalog.
//!
//! The matcher infers which waypoint the user is standing at from an
//! ambient observation: a Wi-Fi scan (access point → dBm), a GPS fix, or
//! both. It is a deliberate nearest-neighbor scan over a small catalog,
//! not an indoor-positioning algorithm.
//!
//! Two distance metrics apply per candidate waypoint:
//!
//! - **Fingerprint distance**: the mean absolute dBm difference over
//!   access points present in both the observation and the waypoint's
//!   surveyed fingerprint.
//! - **GPS distance**: Haversine great-circle distance in meters.
//!
//! Each candidate's score is the weighted average of whichever metrics
//! were comparable, so Wi-Fi-only and GPS-only candidates compete on the
//! same scale. The lowest score wins.

use serde::{Deserialize, Serialize};

use crate::geo::haversine_m;
use crate::waypoint::{Fingerprint, GpsFix, Waypoint};

/// An ambient observation of the user's surroundings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Currently observed Wi-Fi signal strengths, if a scan is available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<Fingerprint>,

    /// Current GPS fix, if available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gps: Option<GpsFix>,
}

impl Observation {
    /// An observation with only a Wi-Fi scan.
    #[must_use]
    pub fn from_scan(fingerprint: Fingerprint) -> Self {
        Self {
            fingerprint: Some(fingerprint),
            gps: None,
        }
    }

    /// An observation with only a GPS fix.
    #[must_use]
    pub fn from_gps(gps: GpsFix) -> Self {
        Self {
            fingerprint: None,
            gps: Some(gps),
        }
    }

    /// Check whether the observation carries no usable signal.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.gps.is_none() && self.fingerprint.as_ref().map_or(true, Fingerprint::is_empty)
    }
}

/// Fixed weights and cutoffs for the matcher.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Weight of the fingerprint distance (per dBm of mean error).
    pub wifi_weight: f64,

    /// Weight of the GPS distance (per meter).
    ///
    /// The default of 0.1 puts 1 dBm of fingerprint error on par with
    /// 10 m of GPS error, so an indoor fingerprint dominates wherever
    /// one was surveyed.
    pub gps_weight: f64,

    /// Candidates whose only comparable metric is GPS are skipped when
    /// farther than this, in meters.
    pub max_gps_range_m: f64,

    /// Minimum access points shared between observation and reference
    /// for the fingerprint metric to count.
    pub min_shared_aps: usize,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            wifi_weight: 1.0,
            gps_weight: 0.1,
            max_gps_range_m: 150.0,
            min_shared_aps: 1,
        }
    }
}

/// The outcome of a successful match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Match {
    /// Identifier of the best-matching waypoint.
    pub waypoint_id: String,

    /// Name of the best-matching waypoint.
    pub waypoint_name: String,

    /// Combined weighted score; lower is closer.
    pub score: f64,

    /// Mean absolute dBm difference, when the fingerprint metric applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wifi_distance_dbm: Option<f64>,

    /// Great-circle distance in meters, when the GPS metric applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gps_distance_m: Option<f64>,
}

/// Mean absolute dBm difference over access points shared by both
/// fingerprints.
///
/// Returns `None` when fewer than `min_shared_aps` access points are
/// shared; a comparison over no common ground says nothing.
#[must_use]
pub fn fingerprint_distance(
    observed: &Fingerprint,
    reference: &Fingerprint,
    min_shared_aps: usize,
) -> Option<f64> {
    let shared: Vec<f64> = observed
        .0
        .iter()
        .filter_map(|(ap, dbm)| reference.0.get(ap).map(|ref_dbm| (dbm - ref_dbm).abs()))
        .collect();

    if shared.len() < min_shared_aps.max(1) {
        return None;
    }

    #[allow(clippy::cast_precision_loss)]
    Some(shared.iter().sum::<f64>() / shared.len() as f64)
}

/// Nearest-neighbor matcher over a waypoint catalog.
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    config: MatcherConfig,
}

impl Matcher {
    /// Create a matcher with the given weights and cutoffs.
    #[must_use]
    pub const fn new(config: MatcherConfig) -> Self {
        Self { config }
    }

    /// Find the waypoint best matching the observation.
    ///
    /// Scans the catalog linearly; per waypoint, computes whichever of
    /// the two metrics are comparable and combines them as a weighted
    /// average. Returns `None` when the observation is empty or no
    /// waypoint shares a comparable signal. Ties keep the earlier
    /// catalog entry.
    #[must_use]
    pub fn best_match(&self, catalog: &[Waypoint], observation: &Observation) -> Option<Match> {
        if observation.is_empty() {
            return None;
        }

        let mut best: Option<Match> = None;

        for waypoint in catalog {
            let Some(candidate) = self.score(waypoint, observation) else {
                continue;
            };
            match &best {
                Some(current) if candidate.score >= current.score => {}
                _ => best = Some(candidate),
            }
        }

        best
    }

    /// Score a single waypoint against the observation, or `None` when
    /// nothing is comparable.
    fn score(&self, waypoint: &Waypoint, observation: &Observation) -> Option<Match> {
        let wifi_distance_dbm = match (&observation.fingerprint, &waypoint.fingerprint) {
            (Some(observed), Some(reference)) => {
                fingerprint_distance(observed, reference, self.config.min_shared_aps)
            }
            _ => None,
        };

        let gps_distance_m = match (&observation.gps, &waypoint.gps) {
            (Some(fix), Some(surveyed)) => Some(haversine_m(fix, surveyed)),
            _ => None,
        };

        // A GPS-only candidate beyond the range cutoff is no candidate;
        // a building guide must not match a room across town.
        if wifi_distance_dbm.is_none() {
            match gps_distance_m {
                Some(d) if d <= self.config.max_gps_range_m => {}
                _ => return None,
            }
        }

        let mut weighted_sum = 0.0;
        let mut weight_total = 0.0;
        if let Some(d) = wifi_distance_dbm {
            weighted_sum += self.config.wifi_weight * d;
            weight_total += self.config.wifi_weight;
        }
        if let Some(d) = gps_distance_m {
            weighted_sum += self.config.gps_weight * d;
            weight_total += self.config.gps_weight;
        }
        if weight_total <= 0.0 {
            return None;
        }

        Some(Match {
            waypoint_id: waypoint.id.clone(),
            waypoint_name: waypoint.name.clone(),
            score: weighted_sum / weight_total,
            wifi_distance_dbm,
            gps_distance_m,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::waypoint::{NavigationStep, WaypointKind};

    fn fp(pairs: &[(&str, f64)]) -> Fingerprint {
        pairs.iter().map(|&(ap, dbm)| (ap, dbm)).collect()
    }

    fn waypoint(name: &str) -> Waypoint {
        Waypoint::new(
            name,
            WaypointKind::Room,
            vec![NavigationStep::new("Go straight ahead", 0.0, "")],
        )
    }

    #[test]
    fn test_fingerprint_distance_mean_abs() {
        let observed = fp(&[("ap1", -52.0), ("ap2", -66.0)]);
        let reference = fp(&[("ap1", -50.0), ("ap2", -60.0)]);

        let d = fingerprint_distance(&observed, &reference, 1).unwrap();
        assert!((d - 4.0).abs() < 1e-9); // (2 + 6) / 2
    }

    #[test]
    fn test_fingerprint_distance_ignores_unshared_aps() {
        let observed = fp(&[("ap1", -52.0), ("ap9", -30.0)]);
        let reference = fp(&[("ap1", -50.0), ("ap2", -60.0)]);

        let d = fingerprint_distance(&observed, &reference, 1).unwrap();
        assert!((d - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_fingerprint_distance_no_shared_aps() {
        let observed = fp(&[("ap8", -52.0)]);
        let reference = fp(&[("ap1", -50.0)]);

        assert!(fingerprint_distance(&observed, &reference, 1).is_none());
    }

    #[test]
    fn test_fingerprint_distance_min_shared_threshold() {
        let observed = fp(&[("ap1", -52.0)]);
        let reference = fp(&[("ap1", -50.0), ("ap2", -60.0)]);

        assert!(fingerprint_distance(&observed, &reference, 1).is_some());
        assert!(fingerprint_distance(&observed, &reference, 2).is_none());
    }

    #[test]
    fn test_empty_observation_no_match() {
        let catalog = vec![waypoint("Room 1").with_gps(GpsFix::new(0.0, 0.0))];
        let matcher = Matcher::default();

        assert!(matcher.best_match(&catalog, &Observation::default()).is_none());

        let empty_scan = Observation::from_scan(Fingerprint::new());
        assert!(matcher.best_match(&catalog, &empty_scan).is_none());
    }

    #[test]
    fn test_empty_catalog_no_match() {
        let matcher = Matcher::default();
        let obs = Observation::from_gps(GpsFix::new(0.0, 0.0));
        assert!(matcher.best_match(&[], &obs).is_none());
    }

    #[test]
    fn test_wifi_only_match() {
        let catalog = vec![
            waypoint("Room 1").with_fingerprint(fp(&[("ap1", -50.0), ("ap2", -60.0)])),
            waypoint("Room 2").with_fingerprint(fp(&[("ap1", -80.0), ("ap2", -85.0)])),
        ];
        let obs = Observation::from_scan(fp(&[("ap1", -52.0), ("ap2", -61.0)]));

        let m = Matcher::default().best_match(&catalog, &obs).unwrap();
        assert_eq!(m.waypoint_name, "Room 1");
        assert!(m.wifi_distance_dbm.is_some());
        assert!(m.gps_distance_m.is_none());
    }

    #[test]
    fn test_gps_only_match() {
        let catalog = vec![
            waypoint("Near").with_gps(GpsFix::new(-2.52945, -44.30450)),
            waypoint("Far").with_gps(GpsFix::new(-2.52945, -44.30500)),
        ];
        let obs = Observation::from_gps(GpsFix::new(-2.52946, -44.30451));

        let m = Matcher::default().best_match(&catalog, &obs).unwrap();
        assert_eq!(m.waypoint_name, "Near");
        assert!(m.gps_distance_m.unwrap() < 5.0);
    }

    #[test]
    fn test_gps_only_candidate_beyond_range_skipped() {
        // ~1.1 km away: outside the default 150 m cutoff.
        let catalog = vec![waypoint("Other building").with_gps(GpsFix::new(-2.54, -44.3045))];
        let obs = Observation::from_gps(GpsFix::new(-2.53, -44.3045));

        assert!(Matcher::default().best_match(&catalog, &obs).is_none());
    }

    #[test]
    fn test_range_cutoff_not_applied_when_fingerprint_comparable() {
        let catalog = vec![waypoint("Room 1")
            .with_gps(GpsFix::new(-2.54, -44.3045))
            .with_fingerprint(fp(&[("ap1", -50.0)]))];
        let obs = Observation {
            fingerprint: Some(fp(&[("ap1", -51.0)])),
            gps: Some(GpsFix::new(-2.53, -44.3045)),
        };

        let m = Matcher::default().best_match(&catalog, &obs).unwrap();
        assert!(m.wifi_distance_dbm.is_some());
        assert!(m.gps_distance_m.is_some());
    }

    #[test]
    fn test_combined_score_is_weighted_average() {
        let config = MatcherConfig::default();
        let catalog = vec![waypoint("Room 1")
            .with_gps(GpsFix::new(0.0, 0.0))
            .with_fingerprint(fp(&[("ap1", -50.0)]))];
        let obs = Observation {
            fingerprint: Some(fp(&[("ap1", -54.0)])),
            gps: Some(GpsFix::new(0.0, 0.0)),
        };

        let m = Matcher::new(config).best_match(&catalog, &obs).unwrap();
        // wifi 4 dBm at weight 1.0, gps 0 m at weight 0.1:
        // (1.0 * 4 + 0.1 * 0) / 1.1
        let expected = 4.0 / 1.1;
        assert!((m.score - expected).abs() < 1e-9, "got {}", m.score);
    }

    #[test]
    fn test_mixed_catalog_wifi_dominates_nearby_gps() {
        // A perfect fingerprint match should beat a GPS candidate a few
        // meters away, per the default weighting.
        let catalog = vec![
            waypoint("GPS only").with_gps(GpsFix::new(-2.52945, -44.30450)),
            waypoint("Surveyed").with_fingerprint(fp(&[("ap1", -50.0), ("ap2", -60.0)])),
        ];
        let obs = Observation {
            fingerprint: Some(fp(&[("ap1", -50.0), ("ap2", -60.0)])),
            gps: Some(GpsFix::new(-2.52950, -44.30450)),
        };

        let m = Matcher::default().best_match(&catalog, &obs).unwrap();
        assert_eq!(m.waypoint_name, "Surveyed");
        assert_eq!(m.score, 0.0);
    }

    #[test]
    fn test_tie_keeps_first_catalog_entry() {
        let catalog = vec![
            waypoint("First").with_fingerprint(fp(&[("ap1", -50.0)])),
            waypoint("Second").with_fingerprint(fp(&[("ap1", -50.0)])),
        ];
        let obs = Observation::from_scan(fp(&[("ap1", -55.0)]));

        let m = Matcher::default().best_match(&catalog, &obs).unwrap();
        assert_eq!(m.waypoint_name, "First");
    }

    #[test]
    fn test_unlocatable_waypoints_never_match() {
        let catalog = vec![waypoint("No hints")];
        let obs = Observation {
            fingerprint: Some(fp(&[("ap1", -50.0)])),
            gps: Some(GpsFix::new(0.0, 0.0)),
        };

        assert!(Matcher::default().best_match(&catalog, &obs).is_none());
    }

    #[test]
    fn test_match_serializes_without_absent_metrics() {
        let catalog = vec![waypoint("Room 1").with_fingerprint(fp(&[("ap1", -50.0)]))];
        let obs = Observation::from_scan(fp(&[("ap1", -50.0)]));

        let m = Matcher::default().best_match(&catalog, &obs).unwrap();
        let json = serde_json::to_string(&m).unwrap();
        assert!(json.contains("wifi_distance_dbm"));
        assert!(!json.contains("gps_distance_m"));
    }

    #[test]
    fn test_default_config() {
        let config = MatcherConfig::default();
        assert!((config.wifi_weight - 1.0).abs() < f64::EPSILON);
        assert!((config.gps_weight - 0.1).abs() < f64::EPSILON);
        assert!((config.max_gps_range_m - 150.0).abs() < f64::EPSILON);
        assert_eq!(config.min_shared_aps, 1);
    }
}
