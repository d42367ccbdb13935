//! Foundation types for scrollkit.
//!
//! This crate holds the host-agnostic pieces shared by the widget crate and
//! any embedding host: 2D geometry, gesture events, configuration, and the
//! error type.

pub mod config;
pub mod error;
pub mod geometry;
pub mod input;

pub use config::{PhysicsConfig, ScrollConfig, ScrollFlags};
pub use error::{Result, ScrollError};
pub use geometry::{Axis, Point, Rect, Size};
pub use input::PanGesture;
