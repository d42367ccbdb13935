//! Host-agnostic gesture events.
//!
//! The host's gesture recognizer maps its native pan callbacks to
//! [`PanGesture`]. Locations are in the parent's coordinate space, times are
//! in seconds on the same clock that drives `ScrollView::update`.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// One phase of a continuous pan (drag) gesture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum PanGesture {
    /// Finger went down and the recognizer committed to a pan.
    Began { location: Point, time: f64 },
    /// Finger moved.
    Changed { location: Point, time: f64 },
    /// Finger lifted.
    Ended { location: Point, time: f64 },
    /// The recognizer gave up on the gesture (system interruption, etc.).
    Cancelled { time: f64 },
}

impl PanGesture {
    /// Timestamp of the event.
    pub fn time(&self) -> f64 {
        match *self {
            PanGesture::Began { time, .. }
            | PanGesture::Changed { time, .. }
            | PanGesture::Ended { time, .. }
            | PanGesture::Cancelled { time } => time,
        }
    }

    /// Finger location, if the phase carries one.
    pub fn location(&self) -> Option<Point> {
        match *self {
            PanGesture::Began { location, .. }
            | PanGesture::Changed { location, .. }
            | PanGesture::Ended { location, .. } => Some(location),
            PanGesture::Cancelled { .. } => None,
        }
    }

    /// Whether this event finishes the gesture.
    pub fn is_terminal(&self) -> bool {
        matches!(self, PanGesture::Ended { .. } | PanGesture::Cancelled { .. })
    }
}
