//! Kinetic scrolling along one axis: rubber-band drags, exponential
//! deceleration, and a critically damped spring for bounce back.
//!
//! Offsets grow toward the end of the content. Velocities are in points
//! per second and share the offset's sign convention.

use scrollkit_types::{PhysicsConfig, Point};

/// Largest integration step. Keeps the spring stable on long frames.
const MAX_SUBSTEP: f32 = 1.0 / 120.0;

/// Overshoot below this snaps onto the bound when the motion is slow.
const SETTLE_DISTANCE: f32 = 0.5;

/// Shortest sample interval used for drag velocity estimates.
const MIN_SAMPLE_DT: f32 = 0.001;

/// Signed distance outside `[min, max]`, zero when inside.
pub fn overshoot(offset: f32, min: f32, max: f32) -> f32 {
    if offset < min {
        offset - min
    } else if offset > max {
        offset - max
    } else {
        0.0
    }
}

/// Apply a drag delta to `offset`.
///
/// Without bounce the result is clamped. With bounce, the part of the
/// movement that happens outside the bounds is scaled by `resistance`.
pub fn drag_offset(
    offset: f32,
    delta: f32,
    min: f32,
    max: f32,
    bounces: bool,
    resistance: f32,
) -> f32 {
    if !bounces {
        return (offset + delta).clamp(min, max);
    }

    let mut p = offset;
    let mut d = delta;
    // At most three regions: outside, inside, outside on the far side.
    for _ in 0..3 {
        if d == 0.0 {
            break;
        }
        let outside = p < min || p > max || (p == min && d < 0.0) || (p == max && d > 0.0);
        if outside {
            if resistance <= 0.0 {
                break;
            }
            let entry = if p < min && d > 0.0 {
                Some(min)
            } else if p > max && d < 0.0 {
                Some(max)
            } else {
                None
            };
            match entry {
                Some(bound) if (d * resistance).abs() > (bound - p).abs() => {
                    d -= (bound - p) / resistance;
                    p = bound;
                }
                _ => {
                    p += d * resistance;
                    d = 0.0;
                }
            }
        } else {
            let bound = if d > 0.0 { max } else { min };
            let room = bound - p;
            if d.abs() <= room.abs() {
                p += d;
                d = 0.0;
            } else {
                p = bound;
                d -= room;
            }
        }
    }
    p
}

/// Blend a new drag sample into the running velocity estimate.
pub fn smooth_velocity(previous: Point, delta: Point, dt: f32, smoothing: f32) -> Point {
    let dt = dt.max(MIN_SAMPLE_DT);
    let instant = delta * (1.0 / dt);
    previous * (1.0 - smoothing) + instant * smoothing
}

/// Post-release motion state of one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisMotion {
    pub offset: f32,
    pub velocity: f32,
}

impl AxisMotion {
    pub fn new(offset: f32, velocity: f32) -> Self {
        Self { offset, velocity }
    }

    /// Whether releasing in this state produces any motion.
    pub fn needs_motion(&self, min: f32, max: f32, physics: &PhysicsConfig) -> bool {
        self.velocity.abs() >= physics.min_velocity || overshoot(self.offset, min, max) != 0.0
    }

    /// Advance by `dt` seconds. Returns `true` while the axis is still moving.
    pub fn step(
        &mut self,
        dt: f32,
        min: f32,
        max: f32,
        bounces: bool,
        physics: &PhysicsConfig,
    ) -> bool {
        let mut remaining = dt.max(0.0);
        while remaining > 0.0 {
            let h = remaining.min(MAX_SUBSTEP);
            remaining -= h;
            self.substep(h, min, max, bounces, physics);
        }
        self.settle(min, max, physics)
    }

    fn substep(&mut self, h: f32, min: f32, max: f32, bounces: bool, physics: &PhysicsConfig) {
        let over = overshoot(self.offset, min, max);
        if over != 0.0 {
            if !bounces {
                self.offset = self.offset.clamp(min, max);
                self.velocity = 0.0;
                return;
            }
            let k = physics.spring_stiffness;
            let damping = 2.0 * k.sqrt();
            self.velocity += (-k * over - damping * self.velocity) * h;
            self.offset += self.velocity * h;
            // The spring never carries the offset through its bound.
            let after = overshoot(self.offset, min, max);
            if after == 0.0 || after.signum() != over.signum() {
                self.offset = if over > 0.0 { max } else { min };
                self.velocity = 0.0;
            }
        } else {
            self.offset += self.velocity * h;
            self.velocity *= (-physics.friction * h).exp();
            if !bounces && overshoot(self.offset, min, max) != 0.0 {
                self.offset = self.offset.clamp(min, max);
                self.velocity = 0.0;
            }
        }
    }

    fn settle(&mut self, min: f32, max: f32, physics: &PhysicsConfig) -> bool {
        if self.velocity.abs() >= physics.min_velocity {
            return true;
        }
        let over = overshoot(self.offset, min, max);
        if over == 0.0 {
            self.velocity = 0.0;
            false
        } else if over.abs() < SETTLE_DISTANCE {
            self.offset = self.offset.clamp(min, max);
            self.velocity = 0.0;
            false
        } else {
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn physics() -> PhysicsConfig {
        PhysicsConfig::default()
    }

    /// Step at 60 fps until at rest, returning the number of frames taken.
    fn run_to_rest(m: &mut AxisMotion, min: f32, max: f32, bounces: bool) -> usize {
        let p = physics();
        for frame in 1..=600 {
            if !m.step(1.0 / 60.0, min, max, bounces, &p) {
                return frame;
            }
        }
        panic!("motion did not settle: {m:?}");
    }

    #[test]
    fn overshoot_sign() {
        assert_eq!(overshoot(-5.0, 0.0, 100.0), -5.0);
        assert_eq!(overshoot(50.0, 0.0, 100.0), 0.0);
        assert_eq!(overshoot(130.0, 0.0, 100.0), 30.0);
    }

    #[test]
    fn drag_inside_is_one_to_one() {
        assert_eq!(drag_offset(10.0, 25.0, 0.0, 100.0, true, 0.5), 35.0);
        assert_eq!(drag_offset(10.0, -5.0, 0.0, 100.0, true, 0.5), 5.0);
    }

    #[test]
    fn drag_without_bounce_clamps() {
        assert_eq!(drag_offset(90.0, 50.0, 0.0, 100.0, false, 0.5), 100.0);
        assert_eq!(drag_offset(10.0, -50.0, 0.0, 100.0, false, 0.5), 0.0);
    }

    #[test]
    fn drag_past_bound_applies_resistance() {
        // 10 free, 40 at half rate.
        assert_eq!(drag_offset(90.0, 50.0, 0.0, 100.0, true, 0.5), 120.0);
        assert_eq!(drag_offset(0.0, -20.0, 0.0, 100.0, true, 0.5), -10.0);
    }

    #[test]
    fn drag_back_from_overscroll_reenters() {
        // 10 points outside need 20 of drag at half rate, the rest is free.
        assert_eq!(drag_offset(-10.0, 30.0, 0.0, 100.0, true, 0.5), 10.0);
        assert_eq!(drag_offset(110.0, -10.0, 0.0, 100.0, true, 0.5), 105.0);
    }

    #[test]
    fn drag_across_whole_range_hits_both_regions() {
        // Start 10 above max, drag back 20 (resisted), 100 free, then 10 beyond min.
        let p = drag_offset(110.0, -140.0, 0.0, 100.0, true, 0.5);
        assert_eq!(p, -10.0);
    }

    #[test]
    fn zero_resistance_pins_overscroll() {
        assert_eq!(drag_offset(100.0, 30.0, 0.0, 100.0, true, 0.0), 100.0);
    }

    #[test]
    fn velocity_smoothing_blends() {
        let v = smooth_velocity(Point::new(100.0, 0.0), Point::new(10.0, -5.0), 0.1, 0.5);
        assert!((v.x - 100.0).abs() < 1e-3);
        assert!((v.y + 25.0).abs() < 1e-3);
    }

    #[test]
    fn velocity_smoothing_tolerates_zero_dt() {
        let v = smooth_velocity(Point::ZERO, Point::new(1.0, 0.0), 0.0, 1.0);
        assert!(v.x.is_finite());
    }

    #[test]
    fn deceleration_slows_and_stops() {
        let mut m = AxisMotion::new(0.0, 600.0);
        let frames = run_to_rest(&mut m, 0.0, 10_000.0, true);
        assert!(frames > 10);
        assert_eq!(m.velocity, 0.0);
        // Distance travelled approaches v0 / friction.
        let expected = 600.0 / physics().friction;
        assert!((m.offset - expected).abs() < expected * 0.1, "offset {}", m.offset);
    }

    #[test]
    fn deceleration_without_bounce_stops_at_edge() {
        let mut m = AxisMotion::new(90.0, 2000.0);
        run_to_rest(&mut m, 0.0, 100.0, false);
        assert_eq!(m.offset, 100.0);
    }

    #[test]
    fn bounce_returns_to_bound() {
        let mut m = AxisMotion::new(90.0, 2000.0);
        let mut peak: f32 = 0.0;
        let p = physics();
        for _ in 0..600 {
            let moving = m.step(1.0 / 60.0, 0.0, 100.0, true, &p);
            peak = peak.max(m.offset);
            if !moving {
                break;
            }
        }
        assert!(peak > 100.0, "should overshoot before springing back");
        assert_eq!(m.offset, 100.0);
        assert_eq!(m.velocity, 0.0);
    }

    #[test]
    fn released_overscroll_springs_back() {
        let mut m = AxisMotion::new(-40.0, 0.0);
        assert!(m.needs_motion(0.0, 100.0, &physics()));
        run_to_rest(&mut m, 0.0, 100.0, true);
        assert_eq!(m.offset, 0.0);
    }

    #[test]
    fn slow_release_inside_needs_no_motion() {
        let m = AxisMotion::new(50.0, 1.0);
        assert!(!m.needs_motion(0.0, 100.0, &physics()));
    }

    #[test]
    fn negative_dt_is_a_no_op() {
        let mut m = AxisMotion::new(10.0, 500.0);
        m.step(-1.0, 0.0, 100.0, true, &physics());
        assert_eq!(m.offset, 10.0);
    }
}
