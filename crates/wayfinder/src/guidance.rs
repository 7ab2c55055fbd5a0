//! Guidance step sequencing.
//!
//! A [`GuidanceSession`] walks a user through a waypoint's navigation
//! steps one tap at a time: it tracks the current step, produces the text
//! a TTS engine should speak, and reports arrival. Rendering and audio
//! playback belong to the caller.

use crate::waypoint::{NavigationStep, Waypoint};

/// What happened after advancing the session.
#[derive(Debug, Clone, PartialEq)]
pub enum GuidanceEvent {
    /// Moved on to another step.
    Step(NavigationStep),
    /// All steps are done; the arrival announcement should be spoken.
    Arrived,
}

/// An in-progress walkthrough of one waypoint's steps.
#[derive(Debug, Clone)]
pub struct GuidanceSession {
    waypoint: Waypoint,
    current: usize,
}

impl GuidanceSession {
    /// Start a session at the first step of the waypoint.
    #[must_use]
    pub fn new(waypoint: Waypoint) -> Self {
        Self {
            waypoint,
            current: 0,
        }
    }

    /// The waypoint being navigated to.
    #[must_use]
    pub fn waypoint(&self) -> &Waypoint {
        &self.waypoint
    }

    /// The current step, or `None` once arrived (or for a waypoint
    /// without steps).
    #[must_use]
    pub fn current_step(&self) -> Option<&NavigationStep> {
        self.waypoint.steps.get(self.current)
    }

    /// One-based step counter, as `(current, total)`.
    ///
    /// Matches the "step i of n" announcement; `current` clamps to
    /// `total`, so an arrived session reports `(n, n)` and a waypoint
    /// without steps reports `(0, 0)`.
    #[must_use]
    pub fn step_counter(&self) -> (usize, usize) {
        let total = self.waypoint.steps.len();
        ((self.current + 1).min(total), total)
    }

    /// Arrow rotation for the current step, in degrees.
    #[must_use]
    pub fn rotation_deg(&self) -> f64 {
        self.current_step().map_or(0.0, |s| s.rotation_deg)
    }

    /// Whether the current step is the last one before arrival.
    #[must_use]
    pub fn is_last_step(&self) -> bool {
        self.current + 1 >= self.waypoint.steps.len()
    }

    /// Whether the session has walked past the final step.
    #[must_use]
    pub fn is_arrived(&self) -> bool {
        self.current >= self.waypoint.steps.len()
    }

    /// The text to speak for the current step, or the arrival
    /// announcement once done.
    #[must_use]
    pub fn spoken_text(&self) -> String {
        self.current_step()
            .map_or_else(|| self.arrival_text(), NavigationStep::spoken_text)
    }

    /// The arrival announcement.
    #[must_use]
    pub fn arrival_text(&self) -> String {
        format!(
            "You have arrived at {}. Navigation complete.",
            self.waypoint.name
        )
    }

    /// Advance to the next step.
    ///
    /// Returns the new current step, or [`GuidanceEvent::Arrived`] when
    /// the final step has been completed. Advancing past arrival keeps
    /// returning `Arrived`.
    pub fn advance(&mut self) -> GuidanceEvent {
        if self.current < self.waypoint.steps.len() {
            self.current += 1;
        }
        match self.current_step() {
            Some(step) => GuidanceEvent::Step(step.clone()),
            None => GuidanceEvent::Arrived,
        }
    }
}
