//! Scroll view configuration.
//!
//! A [`ScrollConfig`] bundles the behavior switches with the physics tuning.
//! Every field has a default, so a TOML file only needs the keys it changes:
//!
//! ```toml
//! [flags]
//! paging_enabled = true
//! vertical_scroll_enabled = false
//!
//! [physics]
//! friction = 5.0
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScrollError};

/// Behavior switches read by the gesture and update logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrollFlags {
    /// Allow overscroll with rubber-band resistance and spring back.
    #[serde(default = "default_true")]
    pub bounces: bool,
    /// Settle onto viewport-sized pages after a gesture.
    #[serde(default)]
    pub paging_enabled: bool,
    #[serde(default = "default_true")]
    pub horizontal_scroll_enabled: bool,
    #[serde(default = "default_true")]
    pub vertical_scroll_enabled: bool,
    /// Host Y axis points down instead of up.
    #[serde(default)]
    pub flip_y_coordinates: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ScrollFlags {
    fn default() -> Self {
        Self {
            bounces: true,
            paging_enabled: false,
            horizontal_scroll_enabled: true,
            vertical_scroll_enabled: true,
            flip_y_coordinates: false,
        }
    }
}

/// Deceleration, bounce and animation tuning. Velocities are in points per
/// second, durations in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Exponential velocity decay rate while decelerating.
    pub friction: f32,
    /// Speed below which motion is considered stopped.
    pub min_velocity: f32,
    /// Spring constant pulling an overscrolled position back to its bound.
    pub spring_stiffness: f32,
    /// Fraction of a drag delta applied beyond the bounds.
    pub rubber_band_resistance: f32,
    /// Weight of the newest sample in the smoothed drag velocity.
    pub velocity_smoothing: f32,
    /// Release speed that advances a full page regardless of distance.
    pub page_flick_velocity: f32,
    pub page_snap_duration: f32,
    /// Duration of animated programmatic scrolls.
    pub animation_duration: f32,
    /// Longest frame step integrated in one `update`.
    pub max_frame_delta: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            friction: 4.0,
            min_velocity: 8.0,
            spring_stiffness: 180.0,
            rubber_band_resistance: 0.5,
            velocity_smoothing: 0.3,
            page_flick_velocity: 300.0,
            page_snap_duration: 0.3,
            animation_duration: 0.3,
            max_frame_delta: 0.1,
        }
    }
}

impl PhysicsConfig {
    /// Reject tuning values that would stall or explode the simulation.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("friction", self.friction),
            ("min_velocity", self.min_velocity),
            ("spring_stiffness", self.spring_stiffness),
            ("page_flick_velocity", self.page_flick_velocity),
            ("max_frame_delta", self.max_frame_delta),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ScrollError::Config(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        let non_negative = [
            ("page_snap_duration", self.page_snap_duration),
            ("animation_duration", self.animation_duration),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ScrollError::Config(format!(
                    "{name} must not be negative, got {value}"
                )));
            }
        }

        let fractions = [
            ("rubber_band_resistance", self.rubber_band_resistance),
            ("velocity_smoothing", self.velocity_smoothing),
        ];
        for (name, value) in fractions {
            if !(0.0..=1.0).contains(&value) {
                return Err(ScrollError::Config(format!(
                    "{name} must be within 0..=1, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Complete configuration for a scroll view.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrollConfig {
    #[serde(default)]
    pub flags: ScrollFlags,
    #[serde(default)]
    pub physics: PhysicsConfig,
}

impl ScrollConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: ScrollConfig = toml::from_str(text)?;
        config.physics.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&text)?;
        log::debug!("Loaded scroll config from {}", path.display());
        Ok(config)
    }
}
