//! ScrollView widget: a content node panned and decelerated inside a
//! fixed-size viewport, with optional paging and bounce.
//!
//! # Coordinates
//!
//! The scroll position is measured from the content's leading (left) and
//! top edges: `(0, 0)` shows the top-left corner, and both components grow
//! toward the end of the content. How that maps onto the host depends on
//! `flip_y_coordinates`:
//!
//! - unflipped (Y up, the scene-graph default): the content node's minimum
//!   corner sits at `(-x, viewport_h - content_h + y)` so its top edge lines
//!   up with the viewport's top edge at `y = 0`.
//! - flipped (Y down): the content node sits at `(-x, -y)`.

use std::rc::{Rc, Weak};

use scrollkit_types::{
    Axis, PanGesture, PhysicsConfig, Point, Rect, Result, ScrollConfig, ScrollError, ScrollFlags,
    Size,
};

use crate::animation::{PointTween, easing};
use crate::delegate::ScrollViewDelegate;
use crate::node::ContentNode;
use crate::paging;
use crate::physics::{self, AxisMotion};


/// A drag that pauses longer than this before lifting releases with no
/// velocity.
const STALE_DRAG_SECS: f64 = 0.1;

/// Positions closer than this are considered equal when deciding whether a
/// snap or page change is needed.
const POSITION_EPSILON: f32 = 0.01;

/// Motion phase of a scroll view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollPhase {
    /// At rest.
    Idle,
    /// Following a pan gesture.
    Dragging,
    /// Inertial motion or bounce back after a release.
    Decelerating,
    /// Eased animation toward a fixed target: a page snap after a release,
    /// or an animated programmatic scroll.
    Snapping,
}

struct DragState {
    last_location: Point,
    last_time: f64,
}

struct Animation {
    tween: PointTween,
    /// Page snaps after a release report as deceleration to the delegate.
    decelerating: bool,
}

/// A scrollable viewport onto a content node.
///
/// There is no `Default` impl: a content node and a viewport
/// size are required.
///
/// ```
/// use scrollkit_ui::{ScrollView, Size, SpriteNode};
///
/// let content = SpriteNode::new("level", Size::new(960.0, 320.0));
/// let mut view = ScrollView::new(content, Size::new(320.0, 320.0))?;
/// view.set_paging_enabled(true);
/// assert_eq!(view.num_horizontal_pages(), 3);
///
/// view.set_horizontal_page(2, false);
/// assert_eq!(view.scroll_position().x, 640.0);
/// # Ok::<(), scrollkit_ui::ScrollError>(())
/// ```
///
/// ```compile_fail
/// use scrollkit_ui::{ScrollView, SpriteNode};
///
/// let view: ScrollView<SpriteNode> = ScrollView::default();
/// ```
pub struct ScrollView<N: ContentNode> {
    content: N,
    viewport: Size,
    /// Frame origin in the parent's coordinate space.
    position: Point,
    scroll_position: Point,
    horizontal_page: usize,
    vertical_page: usize,
    flags: ScrollFlags,
    physics: PhysicsConfig,
    phase: ScrollPhase,
    velocity: Point,
    drag: Option<DragState>,
    animation: Option<Animation>,
    last_update: Option<f64>,
    delegate: Option<Weak<dyn ScrollViewDelegate<N>>>,
}

impl<N: ContentNode> ScrollView<N> {
    /// Create a scroll view with default flags and physics.
    pub fn new(content: N, size: Size) -> Result<Self> {
        Self::with_config(content, size, ScrollConfig::default())
    }

    /// Factory alias for [`ScrollView::new`].
    pub fn with_content_node(content: N, size: Size) -> Result<Self> {
        Self::new(content, size)
    }

    /// Create a scroll view from an explicit configuration.
    pub fn with_config(content: N, size: Size, config: ScrollConfig) -> Result<Self> {
        validate_viewport(size)?;
        config.physics.validate()?;
        let mut view = Self {
            content,
            viewport: size,
            position: Point::ZERO,
            scroll_position: Point::ZERO,
            horizontal_page: 0,
            vertical_page: 0,
            flags: config.flags,
            physics: config.physics,
            phase: ScrollPhase::Idle,
            velocity: Point::ZERO,
            drag: None,
            animation: None,
            last_update: None,
            delegate: None,
        };
        view.place_content();
        log::debug!(
            "ScrollView created: viewport {}x{}, content {}x{}",
            size.width,
            size.height,
            view.content.size().width,
            view.content.size().height,
        );
        Ok(view)
    }

    // -- Content and geometry --

    pub fn content_node(&self) -> &N {
        &self.content
    }

    /// Mutable access to the content node. Size changes are picked up on
    /// the next `update`.
    pub fn content_node_mut(&mut self) -> &mut N {
        &mut self.content
    }

    /// Swap in a new content node, returning the old one. Position and
    /// pages are re-clamped to the new content.
    pub fn set_content_node(&mut self, content: N) -> N {
        let old = std::mem::replace(&mut self.content, content);
        self.stop_motion();
        self.place_content();
        self.reconcile_bounds();
        old
    }

    pub fn viewport_size(&self) -> Size {
        self.viewport
    }

    /// Resize the viewport. Rejects non-positive or non-finite sizes.
    pub fn set_viewport_size(&mut self, size: Size) -> Result<()> {
        validate_viewport(size)?;
        self.viewport = size;
        self.stop_motion();
        self.place_content();
        self.reconcile_bounds();
        Ok(())
    }

    /// Frame origin within the parent.
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    /// The widget's frame in parent coordinates.
    pub fn frame(&self) -> Rect {
        Rect::new(self.position, self.viewport)
    }

    /// Where the content node's minimum corner is placed, relative to the
    /// viewport's minimum corner.
    pub fn content_offset(&self) -> Point {
        let x = -self.scroll_position.x;
        let y = if self.flags.flip_y_coordinates {
            -self.scroll_position.y
        } else {
            self.viewport.height - self.content.size().height + self.scroll_position.y
        };
        Point::new(x, y)
    }

    // -- Derived bounds --

    pub fn min_scroll_x(&self) -> f32 {
        0.0
    }

    pub fn min_scroll_y(&self) -> f32 {
        0.0
    }

    pub fn max_scroll_x(&self) -> f32 {
        paging::max_scroll(self.content.size().width, self.viewport.width)
    }

    pub fn max_scroll_y(&self) -> f32 {
        paging::max_scroll(self.content.size().height, self.viewport.height)
    }

    pub fn num_horizontal_pages(&self) -> usize {
        paging::page_count(self.content.size().width, self.viewport.width)
    }

    pub fn num_vertical_pages(&self) -> usize {
        paging::page_count(self.content.size().height, self.viewport.height)
    }

    fn bounds(&self, axis: Axis) -> (f32, f32) {
        match axis {
            Axis::Horizontal => (self.min_scroll_x(), self.max_scroll_x()),
            Axis::Vertical => (self.min_scroll_y(), self.max_scroll_y()),
        }
    }

    fn extents(&self, axis: Axis) -> (f32, f32) {
        (self.content.size().get(axis), self.viewport.get(axis))
    }

    // -- State queries --

    pub fn scroll_position(&self) -> Point {
        self.scroll_position
    }

    pub fn horizontal_page(&self) -> usize {
        self.horizontal_page
    }

    pub fn vertical_page(&self) -> usize {
        self.vertical_page
    }

    pub fn phase(&self) -> ScrollPhase {
        self.phase
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == ScrollPhase::Dragging
    }

    /// True during inertial motion, bounce back, or a post-release page snap.
    pub fn is_decelerating(&self) -> bool {
        match self.phase {
            ScrollPhase::Decelerating => true,
            ScrollPhase::Snapping => self.animation.as_ref().is_some_and(|a| a.decelerating),
            ScrollPhase::Idle | ScrollPhase::Dragging => false,
        }
    }

    /// Current scroll velocity in points per second.
    pub fn velocity(&self) -> Point {
        self.velocity
    }

    pub fn physics(&self) -> &PhysicsConfig {
        &self.physics
    }

    // -- Flags --

    pub fn bounces(&self) -> bool {
        self.flags.bounces
    }

    pub fn set_bounces(&mut self, bounces: bool) {
        self.flags.bounces = bounces;
    }

    pub fn paging_enabled(&self) -> bool {
        self.flags.paging_enabled
    }

    pub fn set_paging_enabled(&mut self, enabled: bool) {
        self.flags.paging_enabled = enabled;
    }

    pub fn horizontal_scroll_enabled(&self) -> bool {
        self.flags.horizontal_scroll_enabled
    }

    pub fn set_horizontal_scroll_enabled(&mut self, enabled: bool) {
        self.flags.horizontal_scroll_enabled = enabled;
        if !enabled {
            self.freeze_axis(Axis::Horizontal);
        }
    }

    pub fn vertical_scroll_enabled(&self) -> bool {
        self.flags.vertical_scroll_enabled
    }

    pub fn set_vertical_scroll_enabled(&mut self, enabled: bool) {
        self.flags.vertical_scroll_enabled = enabled;
        if !enabled {
            self.freeze_axis(Axis::Vertical);
        }
    }

    pub fn flip_y_coordinates(&self) -> bool {
        self.flags.flip_y_coordinates
    }

    pub fn set_flip_y_coordinates(&mut self, flip: bool) {
        self.flags.flip_y_coordinates = flip;
        self.place_content();
    }

    pub fn flags(&self) -> ScrollFlags {
        self.flags
    }

    fn axis_enabled(&self, axis: Axis) -> bool {
        match axis {
            Axis::Horizontal => self.flags.horizontal_scroll_enabled,
            Axis::Vertical => self.flags.vertical_scroll_enabled,
        }
    }

    /// Stop all motion on a newly disabled axis.
    fn freeze_axis(&mut self, axis: Axis) {
        self.velocity.set(axis, 0.0);
        let current = self.scroll_position.get(axis);
        if let Some(anim) = self.animation.as_mut() {
            anim.tween.start.set(axis, current);
            anim.tween.end.set(axis, current);
        }
    }

    // -- Delegate --

    /// Register an observer. Only a weak reference is kept.
    pub fn set_delegate<D: ScrollViewDelegate<N> + 'static>(&mut self, delegate: &Rc<D>) {
        let weak: Weak<D> = Rc::downgrade(delegate);
        let weak: Weak<dyn ScrollViewDelegate<N>> = weak;
        self.delegate = Some(weak);
    }

    pub fn clear_delegate(&mut self) {
        self.delegate = None;
    }

    /// The delegate, if one is set and still alive.
    pub fn delegate(&self) -> Option<Rc<dyn ScrollViewDelegate<N>>> {
        self.delegate.as_ref().and_then(Weak::upgrade)
    }

    fn notify(&self, f: impl FnOnce(&dyn ScrollViewDelegate<N>, &Self)) {
        if let Some(delegate) = self.delegate() {
            f(&*delegate, self);
        }
    }

    // -- Programmatic navigation --

    /// Scroll to `target`. Each enabled axis is clamped to its bounds;
    /// disabled axes keep their current value.
    pub fn set_scroll_position(&mut self, target: Point, animated: bool) {
        if !target.is_finite() {
            log::warn!("Ignoring non-finite scroll position {target:?}");
            return;
        }
        let mut clamped = self.scroll_position;
        for axis in Axis::BOTH {
            if self.axis_enabled(axis) {
                let (min, max) = self.bounds(axis);
                clamped.set(axis, target.get(axis).clamp(min, max));
            }
        }
        if !animated {
            self.sync_pages(clamped);
        }
        self.move_to(clamped, animated);
    }

    /// Show horizontal page `page`, clamped to the last page. Ignored when
    /// horizontal scrolling is disabled.
    pub fn set_horizontal_page(&mut self, page: usize, animated: bool) {
        self.set_page(Axis::Horizontal, page, animated);
    }

    /// Show vertical page `page`, clamped to the last page. Ignored when
    /// vertical scrolling is disabled.
    pub fn set_vertical_page(&mut self, page: usize, animated: bool) {
        self.set_page(Axis::Vertical, page, animated);
    }

    fn set_page(&mut self, axis: Axis, page: usize, animated: bool) {
        if !self.axis_enabled(axis) {
            log::debug!("Ignoring page change on disabled {axis:?} axis");
            return;
        }
        let (content, viewport) = self.extents(axis);
        let page = page.min(paging::page_count(content, viewport) - 1);
        match axis {
            Axis::Horizontal => self.horizontal_page = page,
            Axis::Vertical => self.vertical_page = page,
        }
        // Chain onto an in-flight programmatic animation on the other axis.
        let mut target = self
            .animation
            .as_ref()
            .filter(|a| !a.decelerating)
            .map_or(self.scroll_position, |a| a.tween.end);
        target.set(axis, paging::page_offset(page, content, viewport));
        if !animated {
            // The chained target can move the other axis as well.
            self.sync_pages(target);
        }
        self.move_to(target, animated);
    }

    /// Cancel any motion and go to `target` (already clamped).
    fn move_to(&mut self, target: Point, animated: bool) {
        self.animation = None;
        self.velocity = Point::ZERO;
        let dragging = self.phase == ScrollPhase::Dragging;
        let distance = (target - self.scroll_position).length();
        if animated && !dragging && distance > POSITION_EPSILON {
            self.animation = Some(Animation {
                tween: PointTween::new(
                    self.scroll_position,
                    target,
                    self.physics.animation_duration,
                    easing::ease_in_out_cubic,
                ),
                decelerating: false,
            });
            self.set_phase(ScrollPhase::Snapping);
        } else {
            if !dragging {
                self.set_phase(ScrollPhase::Idle);
            }
            self.scroll_to(target);
        }
    }

    // -- Gesture input --

    /// Gesture-recognizer gate: only touches inside the frame start a pan.
    pub fn should_receive_touch(&self, location: Point) -> bool {
        self.frame().contains(location)
    }

    /// Feed one pan gesture event from the host's recognizer.
    pub fn handle_pan(&mut self, gesture: &PanGesture) {
        if gesture.location().is_some_and(|p| !p.is_finite()) {
            log::warn!("Ignoring pan event with non-finite location {gesture:?}");
            return;
        }
        match *gesture {
            PanGesture::Began { location, time } => self.begin_drag(location, time),
            PanGesture::Changed { location, time } => {
                if self.drag.is_none() {
                    log::debug!("Pan change without a began event, ignoring");
                    return;
                }
                self.drag_to(location, time);
            }
            PanGesture::Ended { location, time } => {
                let Some(drag) = self.drag.as_ref() else {
                    log::debug!("Pan end without a began event, ignoring");
                    return;
                };
                let paused = time - drag.last_time > STALE_DRAG_SECS;
                let moved = location != drag.last_location;
                if moved {
                    self.drag_to(location, time);
                }
                if paused {
                    self.velocity = Point::ZERO;
                }
                self.release();
            }
            PanGesture::Cancelled { .. } => {
                if self.drag.is_none() {
                    return;
                }
                self.velocity = Point::ZERO;
                self.release();
            }
        }
    }

    /// A tap inside the frame halts free deceleration in place. Bounce back
    /// and page snaps run to completion. Returns whether the motion halted.
    pub fn handle_tap(&mut self, location: Point) -> bool {
        if !self.should_receive_touch(location) || self.phase != ScrollPhase::Decelerating {
            return false;
        }
        let overscrolled = Axis::BOTH.into_iter().any(|axis| {
            let (min, max) = self.bounds(axis);
            physics::overshoot(self.scroll_position.get(axis), min, max) != 0.0
        });
        if overscrolled {
            return false;
        }
        log::debug!("Tap halted deceleration at {:?}", self.scroll_position);
        self.finish_motion(true);
        true
    }

    fn begin_drag(&mut self, location: Point, time: f64) {
        if self.phase == ScrollPhase::Dragging {
            log::debug!("Pan began while already dragging, restarting drag");
        }
        self.animation = None;
        self.velocity = Point::ZERO;
        self.drag = Some(DragState {
            last_location: location,
            last_time: time,
        });
        self.set_phase(ScrollPhase::Dragging);
        self.notify(|d, sv| d.scroll_view_will_begin_dragging(sv));
    }

    fn drag_to(&mut self, location: Point, time: f64) {
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        let translation = location - drag.last_location;
        let dt = (time - drag.last_time) as f32;
        drag.last_location = location;
        drag.last_time = time;

        let delta = self.scroll_delta(translation);
        let mut target = self.scroll_position;
        let mut sample = Point::ZERO;
        for axis in Axis::BOTH {
            if !self.axis_enabled(axis) {
                continue;
            }
            let (min, max) = self.bounds(axis);
            target.set(
                axis,
                physics::drag_offset(
                    self.scroll_position.get(axis),
                    delta.get(axis),
                    min,
                    max,
                    self.flags.bounces,
                    self.physics.rubber_band_resistance,
                ),
            );
            sample.set(axis, delta.get(axis));
        }
        self.velocity =
            physics::smooth_velocity(self.velocity, sample, dt, self.physics.velocity_smoothing);
        self.scroll_to(target);
    }

    /// Convert a finger translation into a scroll delta.
    fn scroll_delta(&self, translation: Point) -> Point {
        let y = if self.flags.flip_y_coordinates {
            -translation.y
        } else {
            translation.y
        };
        Point::new(-translation.x, y)
    }

    fn release(&mut self) {
        self.drag = None;
        let decelerate = if self.flags.paging_enabled {
            self.begin_page_snap()
        } else {
            self.begin_deceleration()
        };
        self.notify(|d, sv| d.scroll_view_did_end_dragging(sv, decelerate));
        if decelerate {
            self.notify(|d, sv| d.scroll_view_will_begin_decelerating(sv));
        } else {
            self.velocity = Point::ZERO;
            self.set_phase(ScrollPhase::Idle);
            self.sync_pages(self.scroll_position);
        }
    }

    fn begin_deceleration(&mut self) -> bool {
        let moving = Axis::BOTH.into_iter().any(|axis| {
            if !self.axis_enabled(axis) {
                return false;
            }
            let (min, max) = self.bounds(axis);
            let motion = AxisMotion::new(self.scroll_position.get(axis), self.velocity.get(axis));
            motion.needs_motion(min, max, &self.physics)
        });
        if moving {
            self.set_phase(ScrollPhase::Decelerating);
        }
        moving
    }

    fn begin_page_snap(&mut self) -> bool {
        let mut target = self.scroll_position;
        for axis in Axis::BOTH {
            if !self.axis_enabled(axis) {
                continue;
            }
            let (content, viewport) = self.extents(axis);
            let page = paging::release_page(
                self.scroll_position.get(axis),
                self.velocity.get(axis),
                self.physics.page_flick_velocity,
                content,
                viewport,
            );
            target.set(axis, paging::page_offset(page, content, viewport));
        }
        self.velocity = Point::ZERO;
        if (target - self.scroll_position).length() <= POSITION_EPSILON {
            return false;
        }
        self.animation = Some(Animation {
            tween: PointTween::new(
                self.scroll_position,
                target,
                self.physics.page_snap_duration,
                easing::ease_out_cubic,
            ),
            decelerating: true,
        });
        self.set_phase(ScrollPhase::Snapping);
        true
    }

    // -- Frame update --

    /// Advance motion to `current_time` (seconds, non-decreasing). Call once
    /// per rendered frame.
    pub fn update(&mut self, current_time: f64) {
        let dt = match self.last_update {
            None => 0.0,
            Some(prev) if current_time < prev => {
                log::warn!("Frame time went backwards ({prev} -> {current_time})");
                0.0
            }
            Some(prev) => ((current_time - prev) as f32).min(self.physics.max_frame_delta),
        };
        self.last_update = Some(current_time);

        match self.phase {
            ScrollPhase::Decelerating => self.step_deceleration(dt),
            ScrollPhase::Snapping => self.step_animation(dt),
            ScrollPhase::Idle => self.reconcile_bounds(),
            ScrollPhase::Dragging => {}
        }
    }

    fn step_deceleration(&mut self, dt: f32) {
        log::trace!("decelerate dt={dt} v={:?}", self.velocity);
        let mut target = self.scroll_position;
        let mut velocity = Point::ZERO;
        let mut moving = false;
        for axis in Axis::BOTH {
            if !self.axis_enabled(axis) {
                continue;
            }
            let (min, max) = self.bounds(axis);
            let mut motion =
                AxisMotion::new(self.scroll_position.get(axis), self.velocity.get(axis));
            moving |= motion.step(dt, min, max, self.flags.bounces, &self.physics);
            target.set(axis, motion.offset);
            velocity.set(axis, motion.velocity);
        }
        self.velocity = velocity;
        if !moving {
            target = self.clamp_to_bounds(target);
            self.sync_pages(target);
        }
        self.scroll_to(target);
        if !moving {
            self.finish_motion(true);
        }
    }

    fn step_animation(&mut self, dt: f32) {
        let Some(anim) = self.animation.as_mut() else {
            self.set_phase(ScrollPhase::Idle);
            return;
        };
        let mut target = anim.tween.tick(dt);
        let finished = anim.tween.is_finished();
        let decelerating = anim.decelerating;
        if finished {
            // Bounds may have changed while the tween ran.
            target = self.clamp_to_bounds(target);
            self.sync_pages(target);
        }
        self.scroll_to(target);
        if finished {
            self.finish_motion(decelerating);
        }
    }

    fn finish_motion(&mut self, decelerated: bool) {
        self.animation = None;
        self.velocity = Point::ZERO;
        self.set_phase(ScrollPhase::Idle);
        self.reconcile_bounds();
        if decelerated {
            self.notify(|d, sv| d.scroll_view_did_end_decelerating(sv));
        }
    }

    fn stop_motion(&mut self) {
        if self.phase != ScrollPhase::Dragging {
            self.animation = None;
            self.velocity = Point::ZERO;
            self.set_phase(ScrollPhase::Idle);
        }
    }

    // -- Position plumbing --

    /// Clamp an idle view into its bounds (content or viewport changed)
    /// and bring the page indices in line with the position.
    fn reconcile_bounds(&mut self) {
        if self.phase != ScrollPhase::Idle {
            return;
        }
        let clamped = self.clamp_to_bounds(self.scroll_position);
        self.sync_pages(clamped);
        self.scroll_to(clamped);
    }

    /// `position` clamped to the bounds on both axes, enabled or not.
    fn clamp_to_bounds(&self, position: Point) -> Point {
        let mut clamped = position;
        for axis in Axis::BOTH {
            let (min, max) = self.bounds(axis);
            clamped.set(axis, clamped.get(axis).clamp(min, max));
        }
        clamped
    }

    /// Update page indices for `position`, keeping the current page when
    /// `position` already shows it. Called before the move is applied so
    /// `did_scroll` observers read matching pages.
    fn sync_pages(&mut self, position: Point) {
        for axis in Axis::BOTH {
            let (content, viewport) = self.extents(axis);
            let offset = position.get(axis);
            let current = match axis {
                Axis::Horizontal => self.horizontal_page,
                Axis::Vertical => self.vertical_page,
            };
            let last = paging::page_count(content, viewport) - 1;
            let on_current = current <= last
                && (paging::page_offset(current, content, viewport) - offset).abs()
                    <= POSITION_EPSILON;
            if on_current {
                continue;
            }
            let page = paging::nearest_page(offset, content, viewport);
            match axis {
                Axis::Horizontal => self.horizontal_page = page,
                Axis::Vertical => self.vertical_page = page,
            }
        }
    }

    /// Move to `target`, place the content node, and notify once if the
    /// position changed.
    fn scroll_to(&mut self, target: Point) {
        if target == self.scroll_position {
            return;
        }
        self.scroll_position = target;
        self.place_content();
        self.notify(|d, sv| d.scroll_view_did_scroll(sv));
    }

    fn place_content(&mut self) {
        let offset = self.content_offset();
        self.content.set_position(offset);
    }

    fn set_phase(&mut self, phase: ScrollPhase) {
        if self.phase != phase {
            log::debug!("ScrollView phase {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
        }
    }
}

fn validate_viewport(size: Size) -> Result<()> {
    if size.is_positive() {
        Ok(())
    } else {
        Err(ScrollError::InvalidViewport(format!(
            "viewport must be finite and positive, got {}x{}",
            size.width, size.height
        )))
    }
}
