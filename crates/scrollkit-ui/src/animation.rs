//! Animation primitives: easing functions and tweens.
//!
//! Durations and time steps are in seconds, matching the host frame clock.

use scrollkit_types::Point;

/// Standard easing functions.
///
/// Input `t` is clamped to `[0.0, 1.0]`. Output is the eased value.
pub mod easing {
    /// Linear easing (no acceleration).
    pub fn linear(t: f32) -> f32 {
        t.clamp(0.0, 1.0)
    }

    /// Cubic ease-out (fast start, slow end). Used for page snaps so the
    /// motion continues the release velocity.
    pub fn ease_out_cubic(t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        let t1 = t - 1.0;
        t1 * t1 * t1 + 1.0
    }

    /// Cubic ease-in-out (smooth start and end).
    pub fn ease_in_out_cubic(t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        if t < 0.5 {
            4.0 * t * t * t
        } else {
            (t - 1.0) * (2.0 * t - 2.0) * (2.0 * t - 2.0) + 1.0
        }
    }
}

/// A running animation that interpolates between two values.
#[derive(Debug, Clone, Copy)]
pub struct Tween {
    pub start: f32,
    pub end: f32,
    /// Total duration in seconds.
    pub duration: f32,
    /// Elapsed time in seconds.
    pub elapsed: f32,
    pub easing: fn(f32) -> f32,
}

impl Tween {
    pub fn new(start: f32, end: f32, duration: f32, easing: fn(f32) -> f32) -> Self {
        Self {
            start,
            end,
            duration: duration.max(0.0),
            elapsed: 0.0,
            easing,
        }
    }

    /// Advance by `dt` seconds and return the current interpolated value.
    pub fn tick(&mut self, dt: f32) -> f32 {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
        self.value()
    }

    /// Check if the animation has completed.
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Current value without advancing time. Exactly `end` once finished.
    pub fn value(&self) -> f32 {
        if self.is_finished() {
            return self.end;
        }
        let t = if self.duration > 0.0 {
            self.elapsed / self.duration
        } else {
            1.0
        };
        let eased = (self.easing)(t);
        self.start + (self.end - self.start) * eased
    }
}

/// Tween between two points over time.
#[derive(Debug, Clone, Copy)]
pub struct PointTween {
    pub start: Point,
    pub end: Point,
    tween: Tween,
}

impl PointTween {
    pub fn new(start: Point, end: Point, duration: f32, easing: fn(f32) -> f32) -> Self {
        Self {
            start,
            end,
            tween: Tween::new(0.0, 1.0, duration, easing),
        }
    }

    /// Advance by `dt` seconds and return the current interpolated point.
    pub fn tick(&mut self, dt: f32) -> Point {
        let t = self.tween.tick(dt);
        if self.tween.is_finished() {
            return self.end;
        }
        self.start + (self.end - self.start) * t
    }

    pub fn is_finished(&self) -> bool {
        self.tween.is_finished()
    }
}
